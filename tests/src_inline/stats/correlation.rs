use super::*;

#[test]
fn test_reference_pair() {
    let x = [10.0, 12.0, 14.0, 9.0];
    let y = [10.0, 11.0, 15.0, 8.0];
    let c = pearson(&x, &y).unwrap();
    // sxy = 19, sxx = 14.75, syy = 26
    let expected = 19.0 / (14.75f64 * 26.0).sqrt();
    assert!((c.r - expected).abs() < 1e-12);
    assert_eq!(format!("{:.3}", c.r), "0.970");
    assert_eq!(c.n, 4);
    // With two degrees of freedom the p-value reduces to 1 - |r|.
    assert!((c.p_value - (1.0 - c.r)).abs() < 1e-9);
}

#[test]
fn test_self_and_negated() {
    let a = [3.0, 1.5, 8.0, 4.25, 6.0];
    let neg: Vec<f64> = a.iter().map(|v| -v).collect();
    assert!((pearson(&a, &a).unwrap().r - 1.0).abs() < 1e-12);
    assert!((pearson(&a, &neg).unwrap().r + 1.0).abs() < 1e-12);
    assert!(pearson(&a, &a).unwrap().p_value < 1e-10);
}

#[test]
fn test_bounded() {
    let a = [0.1, 0.7, 0.3, 0.9, 0.5, 0.2];
    let b = [5.0, 1.0, 4.0, 2.0, 2.5, 3.0];
    let c = pearson(&a, &b).unwrap();
    assert!(c.r >= -1.0 && c.r <= 1.0);
    assert!(c.p_value >= 0.0 && c.p_value <= 1.0);
    assert!(c.r < 0.0);
}

#[test]
fn test_two_points_not_significant() {
    let c = pearson(&[1.0, 2.0], &[3.0, 5.0]).unwrap();
    assert!((c.r - 1.0).abs() < 1e-12);
    assert_eq!(c.p_value, 1.0);
}

#[test]
fn test_constant_input_fails() {
    let err = pearson(&[5.0, 5.0, 5.0, 5.0], &[1.0, 2.0, 3.0, 4.0]).unwrap_err();
    assert!(matches!(err, StatsError::InsufficientData { .. }));
}

#[test]
fn test_length_mismatch_fails() {
    let err = pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
    assert_eq!(err, StatsError::LengthMismatch { left: 3, right: 2 });
}

#[test]
fn test_missing_value_fails() {
    let err = pearson(&[1.0, 2.0, 3.0], &[1.0, f64::NAN, 2.0]).unwrap_err();
    assert!(matches!(err, StatsError::InsufficientData { .. }));
}
