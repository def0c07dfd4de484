use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::input::Dataset;
use crate::model::metrics::MetricRecord;
use crate::plots::{Plot, slugify};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{BlandAltmanEntry, InputMeta, SummaryData, ToolMeta, format_f64_6};

pub const PLOTS_DIR: &str = "plots";

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub dataset: &'a Dataset,
    pub records: &'a [MetricRecord],
    pub plots: &'a [Plot],
    pub decimals: usize,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_metrics_tsv(input.records, &out_dir.join("metrics.tsv"))?;

    let plot_files = write_plots(input.plots, &out_dir.join(PLOTS_DIR))?;

    let summary = build_summary(input, plot_files);
    let json = render_summary_json(&summary).map_err(std::io::Error::other)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    info!("reports written to {}", out_dir.display());
    Ok(())
}

pub fn build_summary(input: &Stage4Input<'_>, plot_files: Vec<String>) -> SummaryData {
    let bland_altman = input
        .plots
        .iter()
        .filter_map(|p| match p {
            Plot::BlandAltman(ba) => Some(BlandAltmanEntry {
                title: ba.title.clone(),
                summary: ba.summary,
            }),
            Plot::Scatter(_) => None,
        })
        .collect();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: InputMeta {
            path: input.dataset.source.display().to_string(),
            n_subjects: input.dataset.n_rows,
            n_columns: input.dataset.n_columns(),
        },
        decimals: input.decimals,
        metrics: input.records.to_vec(),
        bland_altman,
        plots: plot_files,
    }
}

fn write_metrics_tsv(records: &[MetricRecord], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "metric\tlabel\tcolumns\tvalue\tp_value\tn")?;
    for record in records {
        let p_value = record.result.p_value.map(format_f64_6).unwrap_or_default();
        let row = [
            record.kind.id().to_string(),
            sanitize_field(&record.label),
            sanitize_field(&record.columns.join(" | ")),
            format_f64_6(record.result.value),
            p_value,
            record.result.n.to_string(),
        ]
        .join("\t");
        writeln!(w, "{}", row)?;
    }
    w.flush()
}

/// Writes one SVG per plot and returns the paths relative to the output
/// directory. Colliding titles get a numeric suffix.
fn write_plots(plots: &[Plot], dir: &Path) -> std::io::Result<Vec<String>> {
    if plots.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(dir)?;
    let mut used = BTreeSet::new();
    let mut files = Vec::with_capacity(plots.len());
    for plot in plots {
        let base = slugify(plot.title());
        let mut name = format!("{}.svg", base);
        let mut suffix = 2usize;
        while !used.insert(name.clone()) {
            name = format!("{}-{}.svg", base, suffix);
            suffix += 1;
        }
        write_text(&dir.join(&name), &plot.render_svg())?;
        files.push(format!("{}/{}", PLOTS_DIR, name));
    }
    Ok(files)
}

fn sanitize_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
