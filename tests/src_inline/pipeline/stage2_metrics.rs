use std::path::PathBuf;

use super::*;
use crate::input::ColumnError;
use crate::model::config::{ColumnPair, CriterionPair};
use crate::stats::StatsError;
use crate::stats::correlation::pearson;

const IN_CLINIC: &str = "Estimated FRS Score (In-clinic, Week 0)";
const REMOTE_W1: &str = "Estimated FRS Score (Remote, Week 1)";
const REMOTE_W2: &str = "Estimated FRS Score (Remote, Week 2)";
const DOCTOR: &str = "Observed FRS Score (Doctor, Week 0)";
const THERAPIST: &str = "Observed FRS Score (Therapist, Week 0)";
const CAREGIVER: &str = "Observed FRS Score (Caregiver, Week 0)";

fn frs_dataset() -> Dataset {
    Dataset::from_numeric(
        PathBuf::from("frs.csv"),
        vec![
            (IN_CLINIC.to_string(), vec![10.0, 12.0, 14.0, 9.0, 20.0]),
            (REMOTE_W1.to_string(), vec![10.0, 11.0, 15.0, 8.0, 19.0]),
            (REMOTE_W2.to_string(), vec![11.0, 12.0, 13.0, 9.0, 21.0]),
            (DOCTOR.to_string(), vec![9.0, 13.0, 15.0, 8.0, 18.0]),
            (THERAPIST.to_string(), vec![10.0, 12.0, 16.0, 9.0, 19.0]),
            (CAREGIVER.to_string(), vec![12.0, 11.0, 14.0, 10.0, 17.0]),
        ],
    )
    .unwrap()
}

#[test]
fn test_frs_default_produces_all_metrics_in_order() {
    let ds = frs_dataset();
    let out = run_stage2(&ds, &AnalysisConfig::frs_default()).unwrap();
    let kinds = out.records.iter().map(|r| r.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            MetricKind::TestRetest,
            MetricKind::TestRetest,
            MetricKind::TestRetest,
            MetricKind::InterRater,
            MetricKind::InternalConsistency,
            MetricKind::CriterionValidity,
            MetricKind::CriterionValidity,
            MetricKind::CriterionValidity,
        ]
    );

    let first = &out.records[0];
    let expected = pearson(ds.column(IN_CLINIC).unwrap(), ds.column(REMOTE_W1).unwrap()).unwrap();
    assert_eq!(first.result.value, expected.r);
    assert_eq!(first.result.p_value, Some(expected.p_value));
    assert_eq!(first.columns, vec![IN_CLINIC.to_string(), REMOTE_W1.to_string()]);

    let inter = &out.records[3];
    assert_eq!(inter.pairwise.len(), 3);
    let mean = inter.pairwise.iter().map(|p| p.r).sum::<f64>() / 3.0;
    assert!((inter.result.value - mean).abs() < 1e-12);
    assert_eq!(inter.pairwise[0].first, DOCTOR);
    assert_eq!(inter.pairwise[2].second, CAREGIVER);
}

#[test]
fn test_missing_column_names_column() {
    let ds = frs_dataset();
    let config = AnalysisConfig {
        test_retest_pairs: vec![ColumnPair::new(IN_CLINIC, "Estimated (Week 9)", "x")],
        ..AnalysisConfig::frs_default()
    };
    let err = run_stage2(&ds, &config).unwrap_err();
    assert_eq!(
        err,
        MetricError::Column {
            operation: "test-retest reliability",
            source: ColumnError::Missing("Estimated (Week 9)".to_string()),
        }
    );
    assert!(err.to_string().contains("Estimated (Week 9)"));
}

#[test]
fn test_constant_raters_fail_explicitly() {
    let ds = Dataset::from_numeric(
        PathBuf::from("flat.csv"),
        vec![
            ("r1".to_string(), vec![5.0, 5.0, 5.0, 5.0]),
            ("r2".to_string(), vec![5.0, 5.0, 5.0, 5.0]),
            ("r3".to_string(), vec![5.0, 5.0, 5.0, 5.0]),
        ],
    )
    .unwrap();
    let config = AnalysisConfig {
        dataset: None,
        test_retest_pairs: Vec::new(),
        rater_columns: vec!["r1".to_string(), "r2".to_string(), "r3".to_string()],
        criterion_pairs: Vec::new(),
        decimals: 3,
    };
    let err = run_stage2(&ds, &config).unwrap_err();
    match &err {
        MetricError::Stats {
            operation,
            columns,
            source,
        } => {
            assert_eq!(*operation, "inter-rater reliability");
            assert_eq!(columns.len(), 3);
            assert!(matches!(source, StatsError::InsufficientData { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("r1, r2, r3"));
}

#[test]
fn test_single_rater_fails() {
    let ds = frs_dataset();
    let config = AnalysisConfig {
        dataset: None,
        test_retest_pairs: Vec::new(),
        rater_columns: vec![DOCTOR.to_string()],
        criterion_pairs: Vec::new(),
        decimals: 3,
    };
    assert!(matches!(
        run_stage2(&ds, &config),
        Err(MetricError::Stats { .. })
    ));
}

#[test]
fn test_empty_rater_list_skips_rater_metrics() {
    let ds = frs_dataset();
    let config = AnalysisConfig {
        dataset: None,
        test_retest_pairs: Vec::new(),
        rater_columns: Vec::new(),
        criterion_pairs: vec![CriterionPair::new(DOCTOR, IN_CLINIC, "Doctor vs In-Clinic")],
        decimals: 3,
    };
    let out = run_stage2(&ds, &config).unwrap();
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].kind, MetricKind::CriterionValidity);
    assert_eq!(out.records[0].label, "Doctor vs In-Clinic");
}
