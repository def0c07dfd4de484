use tracing::info;

use crate::input::Dataset;
use crate::model::config::AnalysisConfig;
use crate::pipeline::{MetricError, lookup, with_columns};
use crate::plots::{Plot, bland_altman, scatter};

const OP_SCATTER: &str = "scatter plot";
const OP_BLAND_ALTMAN: &str = "bland-altman plot";

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub plots: Vec<Plot>,
}

/// Scatter plots for every test-retest pair, Bland-Altman plots for the same
/// pairs, then scatter plots for every criterion pair.
pub fn run_stage3(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<Stage3Output, MetricError> {
    let mut plots = Vec::new();

    for pair in &config.test_retest_pairs {
        let a = lookup(dataset, OP_SCATTER, &pair.first)?;
        let b = lookup(dataset, OP_SCATTER, &pair.second)?;
        let title = format!("Test-Retest: {}", pair.display_label());
        let plot = scatter(&title, &pair.first, &pair.second, a, b).map_err(with_columns(
            OP_SCATTER,
            &[pair.first.as_str(), pair.second.as_str()],
        ))?;
        plots.push(Plot::Scatter(plot));
    }

    for pair in &config.test_retest_pairs {
        let a = lookup(dataset, OP_BLAND_ALTMAN, &pair.first)?;
        let b = lookup(dataset, OP_BLAND_ALTMAN, &pair.second)?;
        let title = format!("Bland-Altman: {}", pair.display_label());
        let plot = bland_altman(&title, a, b).map_err(with_columns(
            OP_BLAND_ALTMAN,
            &[pair.first.as_str(), pair.second.as_str()],
        ))?;
        info!(
            "{}: mean diff={:.6}, limits=[{:.6}, {:.6}]",
            title, plot.summary.mean_diff, plot.summary.lower_limit, plot.summary.upper_limit
        );
        plots.push(Plot::BlandAltman(plot));
    }

    for pair in &config.criterion_pairs {
        let observed = lookup(dataset, OP_SCATTER, &pair.observed)?;
        let estimated = lookup(dataset, OP_SCATTER, &pair.estimated)?;
        let title = format!("Criterion Validity: {}", pair.display_label());
        let plot = scatter(&title, &pair.observed, &pair.estimated, observed, estimated)
            .map_err(with_columns(
                OP_SCATTER,
                &[pair.observed.as_str(), pair.estimated.as_str()],
            ))?;
        plots.push(Plot::Scatter(plot));
    }

    Ok(Stage3Output { plots })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_plots.rs"]
mod tests;
