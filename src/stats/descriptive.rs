use crate::stats::{StatsError, check_observations};

pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    check_observations(values, 1)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (divides by n - 1).
pub fn sample_variance(values: &[f64]) -> Result<f64, StatsError> {
    check_observations(values, 2)?;
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let ss = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
    Ok(ss / (values.len() - 1) as f64)
}

pub fn sample_std(values: &[f64]) -> Result<f64, StatsError> {
    sample_variance(values).map(f64::sqrt)
}

/// Per-row sum across index-aligned columns.
pub fn row_sums(columns: &[&[f64]]) -> Result<Vec<f64>, StatsError> {
    let Some(first) = columns.first() else {
        return Ok(Vec::new());
    };
    let n = first.len();
    for col in columns.iter().skip(1) {
        crate::stats::check_same_len(first, col)?;
    }
    let mut sums = vec![0.0f64; n];
    for col in columns {
        for (acc, v) in sums.iter_mut().zip(col.iter()) {
            *acc += v;
        }
    }
    Ok(sums)
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/descriptive.rs"]
mod tests;
