use super::svg::{Range, nice_ticks, xml_escape};
use super::*;

#[test]
fn test_bland_altman_lines() {
    let a = [10.0, 12.0, 14.0, 9.0];
    let b = [10.0, 11.0, 15.0, 8.0];
    // diffs = [0, 1, -1, 1], mean 0.25, sample var = (0.0625 + 0.5625*2 + 1.5625) / 3
    let s = bland_altman_summary(&a, &b).unwrap();
    let var: f64 = (0.0625 + 0.5625 * 2.0 + 1.5625) / 3.0;
    assert!((s.mean_diff - 0.25).abs() < 1e-12);
    assert!((s.sd_diff - var.sqrt()).abs() < 1e-12);
    assert!((s.upper_limit - (0.25 + 1.96 * var.sqrt())).abs() < 1e-12);
    assert!((s.lower_limit - (0.25 - 1.96 * var.sqrt())).abs() < 1e-12);
    assert_eq!(s.n, 4);
}

#[test]
fn test_bland_altman_points() {
    let plot = bland_altman("BA", &[2.0, 4.0], &[4.0, 4.0]).unwrap();
    assert_eq!(plot.points, vec![(3.0, -2.0), (4.0, 0.0)]);
}

#[test]
fn test_bland_altman_rejects_missing() {
    assert!(bland_altman_summary(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).is_err());
    assert!(bland_altman_summary(&[1.0], &[2.0]).is_err());
}

#[test]
fn test_scatter_skips_incomplete_subjects() {
    let plot = scatter("S", "x", "y", &[1.0, f64::NAN, 3.0], &[4.0, 5.0, 6.0]).unwrap();
    assert_eq!(plot.points, vec![(1.0, 4.0), (3.0, 6.0)]);
    assert!(scatter("S", "x", "y", &[f64::NAN], &[1.0]).is_err());
    assert!(scatter("S", "x", "y", &[1.0, 2.0], &[1.0]).is_err());
}

#[test]
fn test_slugify() {
    assert_eq!(
        slugify("Test-Retest: In-Clinic vs Remote Week 1"),
        "test-retest-in-clinic-vs-remote-week-1"
    );
    assert_eq!(slugify("  Bland-Altman: A/B  "), "bland-altman-a-b");
    assert_eq!(slugify("***"), "plot");
}

#[test]
fn test_nice_ticks_cover_range() {
    let ticks = nice_ticks(Range { min: 0.0, max: 30.0 });
    assert_eq!(ticks, vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
    let ticks = nice_ticks(Range { min: 7.5, max: 15.5 });
    assert_eq!(ticks, vec![8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
}

#[test]
fn test_padded_range_degenerate() {
    let r = Range::padded([4.0, 4.0].into_iter());
    assert_eq!(r, Range { min: 2.0, max: 6.0 });
    let r = Range::padded(std::iter::empty());
    assert_eq!(r, Range { min: 0.0, max: 1.0 });
}

#[test]
fn test_render_scatter_svg() {
    let plot = scatter(
        "Criterion Validity: Doctor vs In-Clinic",
        "Observed <Doctor>",
        "Estimated",
        &[1.0, 2.0, 3.0],
        &[2.0, 1.0, 3.0],
    )
    .unwrap();
    let svg = Plot::Scatter(plot).render_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<circle").count(), 3);
    assert!(svg.contains("Observed &lt;Doctor&gt;"));
    assert!(svg.contains("Criterion Validity: Doctor vs In-Clinic"));
}

#[test]
fn test_render_bland_altman_svg() {
    let plot = bland_altman("BA", &[10.0, 12.0, 14.0, 9.0], &[10.0, 11.0, 15.0, 8.0]).unwrap();
    let svg = Plot::BlandAltman(plot).render_svg();
    assert_eq!(svg.matches("<circle").count(), 4);
    assert!(svg.contains("Mean Difference"));
    assert!(svg.contains("+1.96 SD"));
    assert!(svg.contains("-1.96 SD"));
    assert_eq!(svg.matches("stroke-dasharray").count(), 6);
}

#[test]
fn test_xml_escape() {
    assert_eq!(xml_escape("a & \"b\""), "a &amp; &quot;b&quot;");
}

#[test]
fn test_padded_range_rounding_span_is_degenerate() {
    let near = 0.39999999999999997;
    let r = Range::padded([near, 0.4, 0.4].into_iter());
    assert!(r.max - r.min > 0.1);
    assert!(r.min < near && r.max > 0.4);
}

#[test]
fn test_nice_ticks_bounded_on_ulp_span() {
    let r = Range {
        min: 0.39999999999999997,
        max: 0.4,
    };
    let ticks = nice_ticks(r);
    assert!(ticks.len() <= 64);
    let ticks = nice_ticks(Range::padded([r.min, r.max].into_iter()));
    assert!(!ticks.is_empty() && ticks.len() <= 16);
    assert!(ticks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_render_bland_altman_equal_means() {
    // Both subject means are 0.4, one of them off by an ulp after rounding.
    let plot = bland_altman("BA", &[0.7, 0.5], &[0.1, 0.3]).unwrap();
    let svg = Plot::BlandAltman(plot).render_svg();
    assert_eq!(svg.matches("<circle").count(), 2);
    assert!(!svg.contains("NaN"));
    assert!(svg.trim_end().ends_with("</svg>"));
}
