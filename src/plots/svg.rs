use std::fmt::Write;

use crate::plots::{BlandAltmanPlot, ScatterPlot};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TICK_TARGET: f64 = 6.0;
const MAX_TICKS: usize = 64;
const POINT_RADIUS: f64 = 4.0;
const POINT_COLOR: &str = "#1f77b4";
const MEAN_COLOR: &str = "red";
const LIMIT_COLOR: &str = "blue";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Bounds of `values` padded by 5% on each side; degenerate spans are
    /// widened so the mapping stays finite.
    pub fn padded(values: impl Iterator<Item = f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        let span = max - min;
        if span <= f64::EPSILON * min.abs().max(max.abs()) {
            let half = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
            return Self {
                min: min - half,
                max: max + half,
            };
        }
        Self {
            min: min - span * 0.05,
            max: max + span * 0.05,
        }
    }

    fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Horizontal reference line drawn dashed across the plot and listed in the
/// legend.
struct RefLine {
    y: f64,
    color: &'static str,
    label: &'static str,
}

struct Frame {
    x: Range,
    y: Range,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn px(&self, x: f64) -> f64 {
        MARGIN_LEFT + (x - self.x.min) / self.x.span() * Self::plot_width()
    }

    fn py(&self, y: f64) -> f64 {
        MARGIN_TOP + (self.y.max - y) / self.y.span() * Self::plot_height()
    }
}

pub fn render_scatter(plot: &ScatterPlot) -> String {
    let frame = Frame {
        x: Range::padded(plot.points.iter().map(|p| p.0)),
        y: Range::padded(plot.points.iter().map(|p| p.1)),
    };
    let mut out = String::new();
    open_document(&mut out, &plot.title);
    draw_axes(&mut out, &frame, &plot.x_label, &plot.y_label);
    draw_points(&mut out, &frame, &plot.points);
    close_document(&mut out);
    out
}

pub fn render_bland_altman(plot: &BlandAltmanPlot) -> String {
    let s = &plot.summary;
    let frame = Frame {
        x: Range::padded(plot.points.iter().map(|p| p.0)),
        y: Range::padded(
            plot.points
                .iter()
                .map(|p| p.1)
                .chain([s.mean_diff, s.upper_limit, s.lower_limit]),
        ),
    };
    let mut out = String::new();
    open_document(&mut out, &plot.title);
    draw_axes(
        &mut out,
        &frame,
        "Mean of Two Measures",
        "Difference Between Measures",
    );
    draw_points(&mut out, &frame, &plot.points);

    let lines = [
        RefLine {
            y: s.mean_diff,
            color: MEAN_COLOR,
            label: "Mean Difference",
        },
        RefLine {
            y: s.upper_limit,
            color: LIMIT_COLOR,
            label: "+1.96 SD",
        },
        RefLine {
            y: s.lower_limit,
            color: LIMIT_COLOR,
            label: "-1.96 SD",
        },
    ];
    for line in &lines {
        hline(&mut out, &frame, line);
    }
    draw_legend(&mut out, &lines);
    close_document(&mut out);
    out
}

fn open_document(out: &mut String, title: &str) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="18">{}</text>"#,
        WIDTH / 2.0,
        MARGIN_TOP / 2.0 + 6.0,
        xml_escape(title)
    );
}

fn close_document(out: &mut String) {
    out.push_str("</svg>\n");
}

fn draw_axes(out: &mut String, frame: &Frame, x_label: &str, y_label: &str) {
    let left = MARGIN_LEFT;
    let right = WIDTH - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = HEIGHT - MARGIN_BOTTOM;

    for tick in nice_ticks(frame.x) {
        let x = frame.px(tick);
        let _ = writeln!(
            out,
            r##"<line x1="{x:.2}" y1="{top}" x2="{x:.2}" y2="{bottom}" stroke="#dddddd"/>"##
        );
        let _ = writeln!(
            out,
            r#"<text x="{x:.2}" y="{}" text-anchor="middle" font-size="12">{}</text>"#,
            bottom + 18.0,
            format_tick(tick, frame.x)
        );
    }
    for tick in nice_ticks(frame.y) {
        let y = frame.py(tick);
        let _ = writeln!(
            out,
            r##"<line x1="{left}" y1="{y:.2}" x2="{right}" y2="{y:.2}" stroke="#dddddd"/>"##
        );
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{:.2}" text-anchor="end" font-size="12">{}</text>"#,
            left - 8.0,
            y + 4.0,
            format_tick(tick, frame.y)
        );
    }

    let _ = writeln!(
        out,
        r#"<rect x="{left}" y="{top}" width="{}" height="{}" fill="none" stroke="black"/>"#,
        Frame::plot_width(),
        Frame::plot_height()
    );
    let _ = writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="14">{}</text>"#,
        left + Frame::plot_width() / 2.0,
        HEIGHT - 20.0,
        xml_escape(x_label)
    );
    let cy = top + Frame::plot_height() / 2.0;
    let _ = writeln!(
        out,
        r#"<text x="20" y="{cy}" text-anchor="middle" font-size="14" transform="rotate(-90 20 {cy})">{}</text>"#,
        xml_escape(y_label)
    );
}

fn draw_points(out: &mut String, frame: &Frame, points: &[(f64, f64)]) {
    for &(x, y) in points {
        let _ = writeln!(
            out,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{POINT_RADIUS}" fill="{POINT_COLOR}" fill-opacity="0.7"/>"#,
            frame.px(x),
            frame.py(y)
        );
    }
}

fn hline(out: &mut String, frame: &Frame, line: &RefLine) {
    let py = frame.py(line.y);
    let _ = writeln!(
        out,
        r#"<line x1="{}" y1="{py:.2}" x2="{}" y2="{py:.2}" stroke="{}" stroke-width="1.5" stroke-dasharray="6 4"/>"#,
        MARGIN_LEFT,
        WIDTH - MARGIN_RIGHT,
        line.color
    );
}

fn draw_legend(out: &mut String, entries: &[RefLine]) {
    let x = WIDTH - MARGIN_RIGHT - 170.0;
    let y = MARGIN_TOP + 10.0;
    let _ = writeln!(
        out,
        r##"<rect x="{x}" y="{y}" width="160" height="{}" fill="white" fill-opacity="0.85" stroke="#999999"/>"##,
        entries.len() as f64 * 20.0 + 10.0
    );
    for (i, entry) in entries.iter().enumerate() {
        let row = y + 18.0 + i as f64 * 20.0;
        let _ = writeln!(
            out,
            r#"<line x1="{}" y1="{row}" x2="{}" y2="{row}" stroke="{}" stroke-width="1.5" stroke-dasharray="6 4"/>"#,
            x + 8.0,
            x + 38.0,
            entry.color
        );
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="12">{}</text>"#,
            x + 46.0,
            row + 4.0,
            xml_escape(entry.label)
        );
    }
}

pub fn nice_ticks(range: Range) -> Vec<f64> {
    let step = nice_step(range.span() / TICK_TARGET);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let first = (range.min / step).ceil();
    let last = (range.max / step + 1e-9).floor();
    if !first.is_finite() || !last.is_finite() || last < first {
        return Vec::new();
    }
    let count = ((last - first) as usize + 1).min(MAX_TICKS);
    (0..count)
        .map(|i| {
            let v = (first + i as f64) * step;
            // -0.0
            if v == 0.0 { 0.0 } else { v }
        })
        .collect()
}

fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_tick(v: f64, range: Range) -> String {
    let step = nice_step(range.span() / TICK_TARGET);
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{:.*}", decimals, v)
}

pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
