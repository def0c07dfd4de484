pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::metrics::MetricRecord;
use crate::plots::BlandAltmanSummary;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub path: String,
    pub n_subjects: usize,
    pub n_columns: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlandAltmanEntry {
    pub title: String,
    #[serde(flatten)]
    pub summary: BlandAltmanSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub decimals: usize,
    pub metrics: Vec<MetricRecord>,
    pub bland_altman: Vec<BlandAltmanEntry>,
    pub plots: Vec<String>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_decimals(v: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, v)
}
