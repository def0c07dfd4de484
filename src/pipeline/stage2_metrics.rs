use tracing::info;

use crate::input::Dataset;
use crate::model::config::AnalysisConfig;
use crate::model::metrics::{MetricKind, MetricRecord, PairwiseRecord};
use crate::pipeline::{MetricError, lookup, with_columns};
use crate::stats::reliability::{
    criterion_validity, cronbach_alpha, inter_rater_with_pairs, test_retest_reliability,
};

const OP_TEST_RETEST: &str = "test-retest reliability";
const OP_INTER_RATER: &str = "inter-rater reliability";
const OP_ALPHA: &str = "internal consistency";
const OP_CRITERION: &str = "criterion validity";

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub records: Vec<MetricRecord>,
}

/// Computes every configured metric in order: test-retest pairs, inter-rater
/// reliability and Cronbach's Alpha over the rater columns, then criterion
/// pairs. The first failure aborts the stage.
pub fn run_stage2(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<Stage2Output, MetricError> {
    let mut records = Vec::new();

    for pair in &config.test_retest_pairs {
        let a = lookup(dataset, OP_TEST_RETEST, &pair.first)?;
        let b = lookup(dataset, OP_TEST_RETEST, &pair.second)?;
        let result = test_retest_reliability(a, b).map_err(with_columns(
            OP_TEST_RETEST,
            &[pair.first.as_str(), pair.second.as_str()],
        ))?;
        info!(
            "{} [{}]: r={:.6}",
            OP_TEST_RETEST,
            pair.display_label(),
            result.value
        );
        records.push(MetricRecord {
            kind: MetricKind::TestRetest,
            label: pair.display_label(),
            columns: vec![pair.first.clone(), pair.second.clone()],
            result,
            pairwise: Vec::new(),
        });
    }

    if !config.rater_columns.is_empty() {
        records.extend(rater_metrics(dataset, &config.rater_columns)?);
    }

    for pair in &config.criterion_pairs {
        let observed = lookup(dataset, OP_CRITERION, &pair.observed)?;
        let estimated = lookup(dataset, OP_CRITERION, &pair.estimated)?;
        let result = criterion_validity(observed, estimated).map_err(with_columns(
            OP_CRITERION,
            &[pair.observed.as_str(), pair.estimated.as_str()],
        ))?;
        info!(
            "{} [{}]: r={:.6}",
            OP_CRITERION,
            pair.display_label(),
            result.value
        );
        records.push(MetricRecord {
            kind: MetricKind::CriterionValidity,
            label: pair.display_label(),
            columns: vec![pair.observed.clone(), pair.estimated.clone()],
            result,
            pairwise: Vec::new(),
        });
    }

    Ok(Stage2Output { records })
}

fn rater_metrics(
    dataset: &Dataset,
    raters: &[String],
) -> Result<Vec<MetricRecord>, MetricError> {
    let names = raters.iter().map(String::as_str).collect::<Vec<_>>();

    let mut inter_columns = Vec::with_capacity(raters.len());
    for name in &names {
        inter_columns.push(lookup(dataset, OP_INTER_RATER, name)?);
    }
    let (inter, pairs) = inter_rater_with_pairs(&inter_columns)
        .map_err(with_columns(OP_INTER_RATER, &names))?;
    let pairwise = pairs
        .into_iter()
        .map(|p| PairwiseRecord {
            first: raters[p.first].clone(),
            second: raters[p.second].clone(),
            r: p.correlation.r,
            p_value: p.correlation.p_value,
        })
        .collect::<Vec<_>>();
    info!(
        "{}: mean r={:.6} over {} pairs",
        OP_INTER_RATER,
        inter.value,
        pairwise.len()
    );

    let alpha = cronbach_alpha(&inter_columns).map_err(with_columns(OP_ALPHA, &names))?;
    info!("{}: alpha={:.6}", OP_ALPHA, alpha.value);

    Ok(vec![
        MetricRecord {
            kind: MetricKind::InterRater,
            label: "Average Correlation".to_string(),
            columns: raters.to_vec(),
            result: inter,
            pairwise,
        },
        MetricRecord {
            kind: MetricKind::InternalConsistency,
            label: "Cronbach's Alpha".to_string(),
            columns: raters.to_vec(),
            result: alpha,
            pairwise: Vec::new(),
        },
    ])
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_metrics.rs"]
mod tests;
