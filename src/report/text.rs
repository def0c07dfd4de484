use crate::model::metrics::{MetricKind, MetricRecord};
use crate::report::{SummaryData, format_decimals};

/// One line per metric, as printed to stdout.
pub fn metric_line(record: &MetricRecord, decimals: usize) -> String {
    let value = format_decimals(record.result.value, decimals);
    match record.kind {
        MetricKind::TestRetest => format!(
            "Test-Retest Reliability between {} and {}: {}",
            column(record, 0),
            column(record, 1),
            value
        ),
        MetricKind::InterRater => {
            format!("Inter-Rater Reliability (Average Correlation): {}", value)
        }
        MetricKind::InternalConsistency => {
            format!("Internal Consistency (Cronbach's Alpha): {}", value)
        }
        MetricKind::CriterionValidity => format!(
            "Criterion Validity between {} and {}: {}",
            column(record, 0),
            column(record, 1),
            value
        ),
    }
}

pub fn render_console_lines(records: &[MetricRecord], decimals: usize) -> Vec<String> {
    records.iter().map(|r| metric_line(r, decimals)).collect()
}

fn column(record: &MetricRecord, idx: usize) -> &str {
    record.columns.get(idx).map(String::as_str).unwrap_or("?")
}

pub fn render_report_text(summary: &SummaryData) -> String {
    let decimals = summary.decimals;
    let mut out = String::new();

    out.push_str("Reliability & Validity Report\n");
    out.push_str("=============================\n\n");
    out.push_str(&format!("Input: {}\n", summary.input.path));
    out.push_str(&format!(
        "Subjects: {}, columns: {}\n\n",
        summary.input.n_subjects, summary.input.n_columns
    ));

    let sections = [
        MetricKind::TestRetest,
        MetricKind::InterRater,
        MetricKind::InternalConsistency,
        MetricKind::CriterionValidity,
    ];
    let mut section_no = 0usize;
    for kind in sections {
        let records = summary
            .metrics
            .iter()
            .filter(|r| r.kind == kind)
            .collect::<Vec<_>>();
        if records.is_empty() {
            continue;
        }
        section_no += 1;
        out.push_str(&format!("{}. {}\n", section_no, kind.title()));
        for record in records {
            out.push_str(&metric_line(record, decimals));
            out.push('\n');
            if let Some(p) = record.result.p_value {
                out.push_str(&format!("  p-value: {}, n = {}\n", format_p(p), record.result.n));
            }
            for pair in &record.pairwise {
                out.push_str(&format!(
                    "  {} vs {}: r = {}\n",
                    pair.first,
                    pair.second,
                    format_decimals(pair.r, decimals)
                ));
            }
        }
        out.push('\n');
    }

    if !summary.bland_altman.is_empty() {
        section_no += 1;
        out.push_str(&format!("{}. Bland-Altman agreement\n", section_no));
        for entry in &summary.bland_altman {
            out.push_str(&format!(
                "{}: mean difference {}, limits of agreement [{}, {}]\n",
                entry.title,
                format_decimals(entry.summary.mean_diff, decimals),
                format_decimals(entry.summary.lower_limit, decimals),
                format_decimals(entry.summary.upper_limit, decimals)
            ));
        }
        out.push('\n');
    }

    out
}

fn format_p(p: f64) -> String {
    if p < 0.001 {
        "< 0.001".to_string()
    } else {
        format!("{:.3}", p)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
