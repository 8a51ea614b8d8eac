pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Immutable snapshot of a type's instance fields and candidate methods.
///
/// Built once per type by the extraction pass and handed to the scorer
/// unchanged. `name` is module-qualified (e.g. `parser::Tokenizer`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TypeSnapshot {
    pub name: String,
    pub file: PathBuf,
    pub line: usize,
    /// Named instance fields declared directly on this type.
    pub fields: HashSet<String>,
    /// Candidate methods with their accessed-field sets.
    pub methods: Vec<MethodFieldAccess>,
}

impl TypeSnapshot {
    pub fn new(name: String, file: PathBuf, line: usize) -> Self {
        Self {
            name,
            file,
            line,
            fields: HashSet::new(),
            methods: Vec::new(),
        }
    }
}

/// The set of fields a single candidate method's body references directly.
///
/// Only fields declared on the owning type are recorded; references that
/// reach fields through calls are not followed. An empty set is a valid
/// state and means the method touches none of the type's fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MethodFieldAccess {
    pub method: String,
    pub fields: HashSet<String>,
}

impl MethodFieldAccess {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            fields: HashSet::new(),
        }
    }

    pub fn with_fields<I, S>(method: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: method.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// A type flagged for low cohesion, attached to its source location.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CohesionFinding {
    pub type_name: String,
    pub file: PathBuf,
    pub line: usize,
    pub field_count: usize,
    pub method_count: usize,
    pub disjoint_pairs: usize,
    pub total_pairs: usize,
    /// Fraction of method pairs sharing no field, in [0, 1].
    pub score: f64,
}

impl CohesionFinding {
    /// Score rendered to two decimal places, the form reports display.
    pub fn formatted_score(&self) -> String {
        format!("{:.2}", self.score)
    }
}

/// Aggregate results for one analysis run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub project_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub files_analyzed: usize,
    /// Types that met the size guards and were scored.
    pub types_examined: usize,
    /// Types skipped for having too few fields or methods.
    pub types_skipped: usize,
    pub findings: Vec<CohesionFinding>,
}

impl AnalysisResults {
    pub fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            timestamp: Utc::now(),
            files_analyzed: 0,
            types_examined: 0,
            types_skipped: 0,
            findings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_score_is_two_decimals() {
        let finding = CohesionFinding {
            type_name: "Widget".to_string(),
            file: PathBuf::from("src/widget.rs"),
            line: 10,
            field_count: 5,
            method_count: 5,
            disjoint_pairs: 7,
            total_pairs: 10,
            score: 0.7,
        };
        assert_eq!(finding.formatted_score(), "0.70");

        let exact = CohesionFinding { score: 1.0, ..finding };
        assert_eq!(exact.formatted_score(), "1.00");
    }

    #[test]
    fn method_access_builders() {
        let empty = MethodFieldAccess::new("reset");
        assert!(empty.fields.is_empty());

        let populated = MethodFieldAccess::with_fields("update", ["a", "b"]);
        assert_eq!(populated.fields.len(), 2);
        assert!(populated.fields.contains("a"));
    }
}
