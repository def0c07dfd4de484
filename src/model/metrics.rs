use serde::Serialize;

use crate::stats::reliability::MetricResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TestRetest,
    InterRater,
    InternalConsistency,
    CriterionValidity,
}

impl MetricKind {
    pub fn id(self) -> &'static str {
        match self {
            MetricKind::TestRetest => "test_retest",
            MetricKind::InterRater => "inter_rater",
            MetricKind::InternalConsistency => "internal_consistency",
            MetricKind::CriterionValidity => "criterion_validity",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MetricKind::TestRetest => "Test-Retest Reliability",
            MetricKind::InterRater => "Inter-Rater Reliability",
            MetricKind::InternalConsistency => "Internal Consistency",
            MetricKind::CriterionValidity => "Criterion Validity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseRecord {
    pub first: String,
    pub second: String,
    pub r: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub kind: MetricKind,
    pub label: String,
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub result: MetricResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pairwise: Vec<PairwiseRecord>,
}
