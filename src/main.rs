mod input;
mod logging;
mod model;
mod pipeline;
mod plots;
mod report;
mod stats;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::input::{InputError, load_dataset};
use crate::model::config::{AnalysisConfig, ConfigError};
use crate::pipeline::MetricError;
use crate::pipeline::stage2_metrics::run_stage2;
use crate::pipeline::stage3_plots::run_stage3;
use crate::pipeline::stage4_report::{Stage4Input, write_reports};
use crate::report::text::render_console_lines;

#[derive(Debug, Parser)]
#[command(
    name = "kira-reliability",
    version,
    about = "Test-retest, inter-rater, internal consistency and criterion validity analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute all configured metrics and optionally write reports and plots.
    Run(RunArgs),
    /// Print the built-in FRS configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Delimited score table (.csv, .tsv, optionally .gz); overrides the config.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Analysis configuration JSON; defaults to the built-in FRS layout.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output directory for report.txt, metrics.tsv, summary.json and plots.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Skip scatter and Bland-Altman plots.
    #[arg(long)]
    no_plots: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Metric(#[from] MetricError),
    #[error("failed to write reports: {0}")]
    Report(#[source] std::io::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn dispatch(command: Command) -> Result<(), AppError> {
    match command {
        Command::Run(args) => run(&args),
        Command::DefaultConfig => {
            println!("{}", AnalysisConfig::frs_default().to_json_pretty()?);
            Ok(())
        }
    }
}

fn run(args: &RunArgs) -> Result<(), AppError> {
    let config = load_config(args)?;
    let dataset_path = config.resolve_dataset(args.input.as_deref())?;

    let dataset = load_dataset(&dataset_path)?;
    warn_missing_cells(&dataset, &config);

    let stage2 = run_stage2(&dataset, &config)?;
    for line in render_console_lines(&stage2.records, config.decimals) {
        println!("{line}");
    }

    let Some(out_dir) = &args.out else {
        return Ok(());
    };

    let plots = if args.no_plots {
        info!("plots disabled (--no-plots)");
        Vec::new()
    } else {
        run_stage3(&dataset, &config)?.plots
    };

    let input = Stage4Input {
        dataset: &dataset,
        records: &stage2.records,
        plots: &plots,
        decimals: config.decimals,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, out_dir).map_err(AppError::Report)?;

    Ok(())
}

fn load_config(args: &RunArgs) -> Result<AnalysisConfig, ConfigError> {
    match &args.config {
        Some(path) => {
            let config = AnalysisConfig::load(path)?;
            info!("loaded config {}", path.display());
            Ok(config)
        }
        None => {
            info!("using built-in FRS configuration");
            Ok(AnalysisConfig::frs_default())
        }
    }
}

/// Missing cells make a metric fail; name them before the failure does.
fn warn_missing_cells(dataset: &input::Dataset, config: &AnalysisConfig) {
    let mut names = config
        .test_retest_pairs
        .iter()
        .flat_map(|p| [p.first.as_str(), p.second.as_str()])
        .chain(config.rater_columns.iter().map(String::as_str))
        .chain(
            config
                .criterion_pairs
                .iter()
                .flat_map(|p| [p.observed.as_str(), p.estimated.as_str()]),
        )
        .collect::<Vec<_>>();
    names.sort_unstable();
    names.dedup();
    for name in names {
        let missing = dataset.missing_count(name);
        if missing > 0 {
            warn!("column '{}' has {} missing values", name, missing);
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
