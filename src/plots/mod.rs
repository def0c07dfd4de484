pub mod svg;

use serde::Serialize;
use tracing::debug;

use crate::stats::descriptive::{mean, sample_std};
use crate::stats::{StatsError, check_observations, check_same_len};

/// z multiplier for the Bland-Altman limits of agreement.
pub const LIMITS_OF_AGREEMENT_Z: f64 = 1.96;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlandAltmanSummary {
    pub mean_diff: f64,
    pub sd_diff: f64,
    pub upper_limit: f64,
    pub lower_limit: f64,
    pub n: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlandAltmanPlot {
    pub title: String,
    /// (mean of the two measures, first minus second)
    pub points: Vec<(f64, f64)>,
    pub summary: BlandAltmanSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Plot {
    Scatter(ScatterPlot),
    BlandAltman(BlandAltmanPlot),
}

impl Plot {
    pub fn title(&self) -> &str {
        match self {
            Plot::Scatter(p) => &p.title,
            Plot::BlandAltman(p) => &p.title,
        }
    }

    pub fn render_svg(&self) -> String {
        match self {
            Plot::Scatter(p) => svg::render_scatter(p),
            Plot::BlandAltman(p) => svg::render_bland_altman(p),
        }
    }
}

/// Raw paired values. Subjects with a missing value on either axis are left
/// out of the chart.
pub fn scatter(
    title: &str,
    x_label: &str,
    y_label: &str,
    x: &[f64],
    y: &[f64],
) -> Result<ScatterPlot, StatsError> {
    check_same_len(x, y)?;
    let points = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect::<Vec<_>>();
    if points.is_empty() {
        return Err(StatsError::insufficient(format!(
            "no complete observations to plot for '{}'",
            title
        )));
    }
    if points.len() < x.len() {
        debug!(
            "scatter '{}': skipped {} incomplete subjects",
            title,
            x.len() - points.len()
        );
    }
    Ok(ScatterPlot {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points,
    })
}

pub fn bland_altman_summary(a: &[f64], b: &[f64]) -> Result<BlandAltmanSummary, StatsError> {
    check_same_len(a, b)?;
    check_observations(a, 2)?;
    check_observations(b, 2)?;
    let diffs = a.iter().zip(b.iter()).map(|(x, y)| x - y).collect::<Vec<_>>();
    let mean_diff = mean(&diffs)?;
    let sd_diff = sample_std(&diffs)?;
    Ok(BlandAltmanSummary {
        mean_diff,
        sd_diff,
        upper_limit: mean_diff + LIMITS_OF_AGREEMENT_Z * sd_diff,
        lower_limit: mean_diff - LIMITS_OF_AGREEMENT_Z * sd_diff,
        n: diffs.len(),
    })
}

pub fn bland_altman(title: &str, a: &[f64], b: &[f64]) -> Result<BlandAltmanPlot, StatsError> {
    let summary = bland_altman_summary(a, b)?;
    let points = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| ((x + y) * 0.5, x - y))
        .collect();
    Ok(BlandAltmanPlot {
        title: title.to_string(),
        points,
        summary,
    })
}

/// File-name-safe form of a plot title.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() {
        out.push_str("plot");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/plots/tests.rs"]
mod tests;
