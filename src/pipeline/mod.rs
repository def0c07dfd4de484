pub mod stage2_metrics;
pub mod stage3_plots;
pub mod stage4_report;

use crate::input::ColumnError;
use crate::stats::StatsError;

/// A metric or plot that could not be computed, with the operation and the
/// columns involved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("{operation}: {source}")]
    Column {
        operation: &'static str,
        #[source]
        source: ColumnError,
    },
    #[error("{operation} over [{}]: {source}", .columns.join(", "))]
    Stats {
        operation: &'static str,
        columns: Vec<String>,
        #[source]
        source: StatsError,
    },
}

pub(crate) fn lookup<'a>(
    dataset: &'a crate::input::Dataset,
    operation: &'static str,
    name: &str,
) -> Result<&'a [f64], MetricError> {
    dataset
        .column(name)
        .map_err(|source| MetricError::Column { operation, source })
}

pub(crate) fn with_columns(
    operation: &'static str,
    columns: &[&str],
) -> impl FnOnce(StatsError) -> MetricError {
    let columns = columns.iter().map(|c| c.to_string()).collect::<Vec<_>>();
    move |source| MetricError::Stats {
        operation,
        columns,
        source,
    }
}
