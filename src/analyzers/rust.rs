/// Per-file cohesion analysis driver.
///
/// This is the explicit replacement for a compiler-callback host: it takes
/// source text, builds fully-resolved type snapshots, and hands each one to
/// the scorer. Snapshots are complete and immutable before scoring starts.
use crate::cohesion::CohesionScorer;
use crate::core::{CohesionFinding, TypeSnapshot};
use crate::extraction;
use std::path::Path;

/// Outcome of analyzing one source file.
#[derive(Clone, Debug, Default)]
pub struct FileCohesionReport {
    pub findings: Vec<CohesionFinding>,
    /// Types that met the size guards and were scored.
    pub types_examined: usize,
    /// Types skipped for having too few fields or methods.
    pub types_skipped: usize,
}

/// Analyze one file's source text.
///
/// A file that fails to parse is logged and yields an empty report; one
/// bad file never aborts the run.
pub fn analyze_file(content: &str, path: &Path, scorer: &CohesionScorer) -> FileCohesionReport {
    let parsed = match extraction::parse_source(content, path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Skipping file: {}", err);
            return FileCohesionReport::default();
        }
    };

    let snapshots = extraction::extract_file(&parsed, path);
    score_snapshots(&snapshots, scorer)
}

/// Score a batch of already-built snapshots.
pub fn score_snapshots(snapshots: &[TypeSnapshot], scorer: &CohesionScorer) -> FileCohesionReport {
    let mut report = FileCohesionReport::default();
    for snapshot in snapshots {
        if scorer.is_applicable(snapshot) {
            report.types_examined += 1;
            if let Some(finding) = scorer.score(snapshot) {
                report.findings.push(finding);
            }
        } else {
            report.types_skipped += 1;
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    #[test]
    fn unparsable_file_yields_empty_report() {
        let scorer = CohesionScorer::default();
        let report = analyze_file("fn broken {", &PathBuf::from("bad.rs"), &scorer);
        assert!(report.findings.is_empty());
        assert_eq!(report.types_examined, 0);
        assert_eq!(report.types_skipped, 0);
    }

    #[test]
    fn small_types_are_skipped_not_flagged() {
        let code = indoc! {r#"
            struct Small { a: u32, b: u32 }

            impl Small {
                fn get_a(&self) -> u32 { self.a }
                fn get_b(&self) -> u32 { self.b }
            }
        "#};
        let scorer = CohesionScorer::default();
        let report = analyze_file(code, &PathBuf::from("small.rs"), &scorer);
        assert!(report.findings.is_empty());
        assert_eq!(report.types_skipped, 1);
    }

    #[test]
    fn uncohesive_type_is_flagged() {
        // Five methods each touching a distinct field: every pair disjoint.
        let code = indoc! {r#"
            struct Grab {
                a: u32,
                b: u32,
                c: u32,
                d: u32,
                e: u32,
            }

            impl Grab {
                fn ma(&self) -> u32 { self.a }
                fn mb(&self) -> u32 { self.b }
                fn mc(&self) -> u32 { self.c }
                fn md(&self) -> u32 { self.d }
                fn me(&self) -> u32 { self.e }
            }
        "#};
        let scorer = CohesionScorer::default();
        let report = analyze_file(code, &PathBuf::from("grab.rs"), &scorer);
        assert_eq!(report.types_examined, 1);
        assert_eq!(report.findings.len(), 1);

        let finding = &report.findings[0];
        assert_eq!(finding.type_name, "Grab");
        assert_eq!(finding.formatted_score(), "1.00");
        assert_eq!(finding.line, 1);
    }

    #[test]
    fn cohesive_type_produces_no_finding() {
        let code = indoc! {r#"
            struct Tight {
                a: u32,
                b: u32,
                c: u32,
                d: u32,
                e: u32,
            }

            impl Tight {
                fn m1(&self) -> u32 { self.a + self.b + self.c + self.d + self.e }
                fn m2(&self) -> u32 { self.a + self.b }
                fn m3(&self) -> u32 { self.b + self.c }
                fn m4(&self) -> u32 { self.c + self.d }
                fn m5(&self) -> u32 { self.d + self.e }
            }
        "#};
        let scorer = CohesionScorer::default();
        let report = analyze_file(code, &PathBuf::from("tight.rs"), &scorer);
        assert_eq!(report.types_examined, 1);
        assert!(report.findings.is_empty());
    }
}
