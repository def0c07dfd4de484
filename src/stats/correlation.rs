use serde::Serialize;

use crate::stats::special::student_t_two_sided_p;
use crate::stats::{StatsError, check_observations, check_same_len, is_constant};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
}

/// Pearson product-moment correlation of two index-aligned sequences, with the
/// two-sided p-value for the null hypothesis of zero correlation.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, StatsError> {
    check_same_len(x, y)?;
    check_observations(x, 2)?;
    check_observations(y, 2)?;
    if is_constant(x) || is_constant(y) {
        return Err(StatsError::insufficient(
            "constant input, correlation is undefined",
        ));
    }

    let n = x.len();
    let mx = x.iter().sum::<f64>() / n as f64;
    let my = y.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0f64;
    let mut sxx = 0.0f64;
    let mut syy = 0.0f64;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return Err(StatsError::insufficient(
            "zero variance, correlation is undefined",
        ));
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    Ok(Correlation {
        r,
        p_value: correlation_p_value(r, n),
        n,
    })
}

fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n <= 2 {
        // Two points always lie on a line.
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    student_t_two_sided_p(t, df)
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/correlation.rs"]
mod tests;
