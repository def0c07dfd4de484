pub mod correlation;
pub mod descriptive;
pub mod reliability;
pub mod special;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },
    #[error("length mismatch: {left} vs {right} observations")]
    LengthMismatch { left: usize, right: usize },
}

impl StatsError {
    pub(crate) fn insufficient(reason: impl Into<String>) -> Self {
        StatsError::InsufficientData {
            reason: reason.into(),
        }
    }
}

/// Rejects sequences a correlation or variance cannot be defined over:
/// fewer than `min_len` values, or any missing (non-finite) value.
pub(crate) fn check_observations(values: &[f64], min_len: usize) -> Result<(), StatsError> {
    if values.len() < min_len {
        return Err(StatsError::insufficient(format!(
            "need at least {} observations, got {}",
            min_len,
            values.len()
        )));
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(StatsError::insufficient(format!(
            "missing or non-finite value at row {}",
            idx + 1
        )));
    }
    Ok(())
}

pub(crate) fn check_same_len(left: &[f64], right: &[f64]) -> Result<(), StatsError> {
    if left.len() != right.len() {
        return Err(StatsError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

pub(crate) fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}
