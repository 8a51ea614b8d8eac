use cohesionmap::{scan_pairs, CohesionScorer, CohesionThresholds, MethodFieldAccess, TypeSnapshot};
use std::path::PathBuf;

fn snapshot(field_count: usize, methods: Vec<MethodFieldAccess>) -> TypeSnapshot {
    TypeSnapshot {
        name: "Subject".to_string(),
        file: PathBuf::from("subject.rs"),
        line: 1,
        fields: (0..field_count).map(|i| format!("f{i}")).collect(),
        methods,
    }
}

fn method(name: &str, fields: &[&str]) -> MethodFieldAccess {
    MethodFieldAccess::with_fields(name, fields.iter().copied())
}

#[test]
fn no_result_below_field_minimum() {
    // Fewer than 5 fields never produces a result, whatever the methods do.
    let scorer = CohesionScorer::default();
    for field_count in 0..5 {
        let snap = snapshot(
            field_count,
            (0..10).map(|i| method(&format!("m{i}"), &["f0"])).collect(),
        );
        assert!(scorer.score(&snap).is_none(), "{field_count} fields");
    }
}

#[test]
fn no_result_below_method_minimum() {
    let scorer = CohesionScorer::default();
    for method_count in 0..5 {
        let snap = snapshot(
            5,
            (0..method_count)
                .map(|i| method(&format!("m{i}"), &[]))
                .collect(),
        );
        assert!(scorer.score(&snap).is_none(), "{method_count} methods");
    }
}

#[test]
fn score_invariant_under_permutation() {
    let methods = vec![
        method("m1", &["f0", "f1"]),
        method("m2", &["f2"]),
        method("m3", &["f1", "f3"]),
        method("m4", &["f4"]),
        method("m5", &[]),
    ];
    let baseline = scan_pairs(&methods).unwrap();

    // A handful of distinct permutations via rotations and a reversal.
    for rotation in 1..methods.len() {
        let mut permuted = methods.clone();
        permuted.rotate_left(rotation);
        assert_eq!(scan_pairs(&permuted).unwrap(), baseline);
    }
    let mut reversed = methods.clone();
    reversed.reverse();
    assert_eq!(scan_pairs(&reversed).unwrap(), baseline);
}

#[test]
fn exact_half_is_not_flagged() {
    // Strict comparison: a score of exactly 0.50 must not produce a result.
    let thresholds = CohesionThresholds {
        min_methods: 4,
        ..CohesionThresholds::default()
    };
    let scorer = CohesionScorer::new(thresholds);
    let snap = snapshot(
        5,
        vec![
            method("m1", &["f0"]),
            method("m2", &["f0"]),
            method("m3", &["f0"]),
            method("m4", &["f1"]),
        ],
    );
    let scan = scan_pairs(&snap.methods).unwrap();
    assert_eq!((scan.disjoint_pairs, scan.total_pairs), (3, 6));
    assert!(scorer.score(&snap).is_none());
}

#[test]
fn adding_disjoint_method_is_monotone() {
    // Adding a method disjoint from all others never lowers the score.
    let scorer = CohesionScorer::default();
    let base: Vec<_> = vec![
        method("m1", &["f0"]),
        method("m2", &["f0", "f1"]),
        method("m3", &["f1"]),
        method("m4", &["f2"]),
        method("m5", &["f2", "f3"]),
    ];
    let before = scan_pairs(&base).unwrap().score;

    let mut extended = base;
    extended.push(method("m6", &["f4"]));
    let after = scan_pairs(&extended).unwrap().score;
    assert!(after >= before);

    // And the qualifying snapshot stays flagged or becomes flagged, never
    // the reverse.
    let snap_before = snapshot(5, extended[..5].to_vec());
    let snap_after = snapshot(5, extended);
    if scorer.score(&snap_before).is_some() {
        assert!(scorer.score(&snap_after).is_some());
    }
}

#[test]
fn field_less_methods_are_disjoint_from_everything() {
    // empty ∩ anything = empty, including empty ∩ empty.
    let methods = vec![
        method("m1", &[]),
        method("m2", &[]),
        method("m3", &["f0"]),
        method("m4", &["f0"]),
        method("m5", &["f0"]),
    ];
    // Pairs: (1,2)(1,3)(1,4)(1,5)(2,3)(2,4)(2,5) disjoint = 7 of 10.
    let scan = scan_pairs(&methods).unwrap();
    assert_eq!(scan.disjoint_pairs, 7);
    assert_eq!(scan.total_pairs, 10);

    let finding = CohesionScorer::default()
        .score(&snapshot(5, methods))
        .expect("0.70 exceeds the threshold");
    assert_eq!(finding.formatted_score(), "0.70");
}

mod documented_scenarios {
    use super::*;

    #[test]
    fn one_field_per_method_scores_one() {
        let snap = snapshot(
            5,
            (0..5)
                .map(|i| method(&format!("m{}", i + 1), &[&format!("f{i}")[..]]))
                .collect(),
        );
        let finding = CohesionScorer::default().score(&snap).unwrap();
        assert_eq!(finding.disjoint_pairs, 10);
        assert_eq!(finding.total_pairs, 10);
        assert_eq!(finding.formatted_score(), "1.00");
    }

    #[test]
    fn every_method_touching_every_field_scores_zero() {
        let all: Vec<&str> = vec!["f0", "f1", "f2", "f3", "f4"];
        let snap = snapshot(
            5,
            (1..=5).map(|i| method(&format!("m{i}"), &all)).collect(),
        );
        assert!(CohesionScorer::default().score(&snap).is_none());
        assert_eq!(scan_pairs(&snap.methods).unwrap().score, 0.0);
    }

    #[test]
    fn four_tenths_is_below_threshold() {
        // m1..m4 share f0; only the four pairs with m5 are disjoint.
        let snap = snapshot(
            5,
            vec![
                method("m1", &["f0"]),
                method("m2", &["f0"]),
                method("m3", &["f0"]),
                method("m4", &["f0"]),
                method("m5", &["f1"]),
            ],
        );
        let scan = scan_pairs(&snap.methods).unwrap();
        assert_eq!((scan.disjoint_pairs, scan.total_pairs), (4, 10));
        assert!(CohesionScorer::default().score(&snap).is_none());
    }

    #[test]
    fn four_fields_with_many_methods_is_skipped() {
        let snap = snapshot(
            4,
            (0..10)
                .map(|i| method(&format!("m{i}"), &[&format!("f{}", i % 4)[..]]))
                .collect(),
        );
        assert!(CohesionScorer::default().score(&snap).is_none());
    }
}
