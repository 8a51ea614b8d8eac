/// Lack-of-cohesion-of-methods (LCOM) scoring.
///
/// A type's cohesion is measured as the fraction of unordered method pairs
/// whose accessed-field sets are disjoint. High ratios mean the methods
/// operate on unrelated slices of the type's state, which usually signals
/// a type doing several unrelated things at once.
use crate::core::{CohesionFinding, MethodFieldAccess, TypeSnapshot};
use serde::{Deserialize, Serialize};

/// Policy thresholds for the scorer.
///
/// The 5/5/0.5 defaults come from the rule's documented intent; they are
/// configuration, not law, and can be overridden from `.cohesionmap.toml`
/// or the CLI.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CohesionThresholds {
    /// Minimum instance fields before a type is worth scoring.
    #[serde(default = "default_min_fields")]
    pub min_fields: usize,

    /// Minimum candidate methods before a type is worth scoring.
    #[serde(default = "default_min_methods")]
    pub min_methods: usize,

    /// Fraction of disjoint pairs above which a finding is emitted.
    /// The comparison is strict: a score equal to this value is not
    /// flagged.
    #[serde(default = "default_disjoint_ratio")]
    pub disjoint_ratio: f64,
}

pub fn default_min_fields() -> usize {
    5
}

pub fn default_min_methods() -> usize {
    5
}

pub fn default_disjoint_ratio() -> f64 {
    0.5
}

impl Default for CohesionThresholds {
    fn default() -> Self {
        Self {
            min_fields: default_min_fields(),
            min_methods: default_min_methods(),
            disjoint_ratio: default_disjoint_ratio(),
        }
    }
}

impl CohesionThresholds {
    /// Validate threshold values are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_fields == 0 {
            return Err("min_fields must be at least 1".to_string());
        }
        if self.min_methods < 2 {
            return Err("min_methods must be at least 2 to form a pair".to_string());
        }
        if !(0.0..=1.0).contains(&self.disjoint_ratio) {
            return Err(format!(
                "disjoint_ratio must be between 0.0 and 1.0, got {}",
                self.disjoint_ratio
            ));
        }
        Ok(())
    }
}

/// Raw outcome of the pair scan, before the threshold decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairScan {
    pub disjoint_pairs: usize,
    pub total_pairs: usize,
    pub score: f64,
}

/// Scores type snapshots against the configured thresholds.
#[derive(Clone, Debug, Default)]
pub struct CohesionScorer {
    thresholds: CohesionThresholds,
}

impl CohesionScorer {
    pub fn new(thresholds: CohesionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &CohesionThresholds {
        &self.thresholds
    }

    /// Score a snapshot, returning a finding when the type qualifies and
    /// exceeds the disjoint-ratio threshold.
    ///
    /// `None` covers both "not applicable" (too few fields or methods,
    /// no pairs to compare) and "cohesive enough". This is a total
    /// function: degenerate input never errors.
    pub fn score(&self, snapshot: &TypeSnapshot) -> Option<CohesionFinding> {
        if snapshot.fields.len() < self.thresholds.min_fields {
            return None;
        }
        if snapshot.methods.len() < self.thresholds.min_methods {
            return None;
        }

        let scan = scan_pairs(&snapshot.methods)?;
        if scan.score > self.thresholds.disjoint_ratio {
            Some(CohesionFinding {
                type_name: snapshot.name.clone(),
                file: snapshot.file.clone(),
                line: snapshot.line,
                field_count: snapshot.fields.len(),
                method_count: snapshot.methods.len(),
                disjoint_pairs: scan.disjoint_pairs,
                total_pairs: scan.total_pairs,
                score: scan.score,
            })
        } else {
            None
        }
    }

    /// Whether a snapshot meets the size guards at all.
    pub fn is_applicable(&self, snapshot: &TypeSnapshot) -> bool {
        snapshot.fields.len() >= self.thresholds.min_fields
            && snapshot.methods.len() >= self.thresholds.min_methods
    }
}

/// Enumerate every unordered pair of methods and count the disjoint ones.
///
/// A pair is disjoint when the intersection of the two accessed-field sets
/// is empty. A method that touches no fields is therefore disjoint from
/// every other method, including another field-less method; that reading
/// is deliberate, since such methods are maximally uncohesive under this
/// metric. Returns `None` when there are no pairs to compare.
pub fn scan_pairs(methods: &[MethodFieldAccess]) -> Option<PairScan> {
    let mut total_pairs = 0usize;
    let mut disjoint_pairs = 0usize;

    for (i, left) in methods.iter().enumerate() {
        for right in &methods[i + 1..] {
            total_pairs += 1;
            if left.fields.is_disjoint(&right.fields) {
                disjoint_pairs += 1;
            }
        }
    }

    if total_pairs == 0 {
        return None;
    }

    Some(PairScan {
        disjoint_pairs,
        total_pairs,
        score: disjoint_pairs as f64 / total_pairs as f64,
    })
}
