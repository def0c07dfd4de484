use serde::Serialize;

use crate::stats::correlation::{Correlation, pearson};
use crate::stats::descriptive::{row_sums, sample_variance};
use crate::stats::{StatsError, check_observations, check_same_len, is_constant};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricResult {
    pub value: f64,
    pub p_value: Option<f64>,
    pub n: usize,
}

impl From<Correlation> for MetricResult {
    fn from(c: Correlation) -> Self {
        Self {
            value: c.r,
            p_value: Some(c.p_value),
            n: c.n,
        }
    }
}

/// Correlation between rater `first` and rater `second` (indices into the
/// rater list, `first < second`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairwiseCorrelation {
    pub first: usize,
    pub second: usize,
    pub correlation: Correlation,
}

pub fn test_retest_reliability(first: &[f64], second: &[f64]) -> Result<MetricResult, StatsError> {
    pearson(first, second).map(MetricResult::from)
}

pub fn criterion_validity(observed: &[f64], estimated: &[f64]) -> Result<MetricResult, StatsError> {
    pearson(observed, estimated).map(MetricResult::from)
}

/// Every unordered rater pair exactly once, in (i, j) order with i < j.
pub fn pairwise_correlations(raters: &[&[f64]]) -> Result<Vec<PairwiseCorrelation>, StatsError> {
    let mut out = Vec::with_capacity(raters.len() * raters.len().saturating_sub(1) / 2);
    for i in 0..raters.len() {
        for j in (i + 1)..raters.len() {
            let correlation = pearson(raters[i], raters[j]).map_err(|e| match e {
                StatsError::InsufficientData { reason } => StatsError::InsufficientData {
                    reason: format!("raters {} and {}: {}", i + 1, j + 1, reason),
                },
                other => other,
            })?;
            out.push(PairwiseCorrelation {
                first: i,
                second: j,
                correlation,
            });
        }
    }
    Ok(out)
}

/// Mean of the pairwise Pearson correlations among `raters`.
pub fn inter_rater_reliability(raters: &[&[f64]]) -> Result<MetricResult, StatsError> {
    inter_rater_with_pairs(raters).map(|(result, _)| result)
}

/// Inter-rater reliability together with the pairwise correlations it
/// averages, each pair computed once.
pub fn inter_rater_with_pairs(
    raters: &[&[f64]],
) -> Result<(MetricResult, Vec<PairwiseCorrelation>), StatsError> {
    if raters.len() < 2 {
        return Err(StatsError::insufficient(format!(
            "inter-rater reliability needs at least 2 raters, got {}",
            raters.len()
        )));
    }
    let pairs = pairwise_correlations(raters)?;
    let sum = pairs.iter().map(|p| p.correlation.r).sum::<f64>();
    let result = MetricResult {
        value: sum / pairs.len() as f64,
        p_value: None,
        n: raters[0].len(),
    };
    Ok((result, pairs))
}

/// Cronbach's Alpha over item columns, sample variances throughout.
pub fn cronbach_alpha(items: &[&[f64]]) -> Result<MetricResult, StatsError> {
    let k = items.len();
    if k < 2 {
        return Err(StatsError::insufficient(format!(
            "cronbach's alpha needs at least 2 items, got {}",
            k
        )));
    }
    for item in items.iter().skip(1) {
        check_same_len(items[0], item)?;
    }
    for item in items {
        check_observations(item, 2)?;
    }

    let mut item_variance_sum = 0.0f64;
    for item in items {
        item_variance_sum += sample_variance(item)?;
    }

    let totals = row_sums(items)?;
    let k = k as f64;
    let total_variance = sample_variance(&totals)?;
    // Row sums that agree up to rounding leave only noise in the total variance.
    if is_constant(&totals) || total_variance <= f64::EPSILON * item_variance_sum * k {
        return Err(StatsError::insufficient(
            "total score variance is zero, alpha is undefined",
        ));
    }

    let alpha = k / (k - 1.0) * (1.0 - item_variance_sum / total_variance);
    Ok(MetricResult {
        value: alpha,
        p_value: None,
        n: totals.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/reliability.rs"]
mod tests;
