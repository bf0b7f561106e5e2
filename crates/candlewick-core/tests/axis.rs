// File: crates/candlewick-core/tests/axis.rs
// Purpose: Validate axis scaling policy (linear auto-range vs. clamped log) and tick labels.

use candlewick_core::axis::{plain_label, x_axis_for, y_axis_for};
use candlewick_core::{ChartConfig, IndexedSeries, PriceBar, ScaleKind};
use chrono::NaiveDate;

fn series(lows_highs: &[(f64, f64)]) -> IndexedSeries {
    let start = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
    IndexedSeries::from_bars(
        lows_highs
            .iter()
            .enumerate()
            .map(|(i, &(low, high))| {
                let date = start + chrono::Days::new(i as u64);
                PriceBar::new("ABC", date, low + 0.5, high, low, high - 0.5)
            })
            .collect(),
    )
}

#[test]
fn default_is_linear_auto_range_with_margin() {
    let s = series(&[(10.0, 20.0), (12.0, 30.0)]);
    let axis = y_axis_for(&ChartConfig::new("t", "out.svg"), &s);

    assert_eq!(axis.kind, ScaleKind::Linear);
    // 2% margin beyond [10, 30]
    assert!(axis.min < 10.0 && axis.min > 9.0);
    assert!(axis.max > 30.0 && axis.max < 31.0);
}

#[test]
fn empty_series_falls_back_to_unit_range() {
    let s = IndexedSeries::from_bars(Vec::new());
    let axis = y_axis_for(&ChartConfig::new("t", "out.svg"), &s);
    assert_eq!((axis.min, axis.max), (0.0, 1.0));
    assert_eq!((x_axis_for(&s).min, x_axis_for(&s).max), (0.0, 1.0));
}

#[test]
fn log_scale_clamps_to_configured_range_exactly() {
    let s = series(&[(50.0, 60.0), (55.0, 65.0), (52.0, 61.0)]);
    let config = ChartConfig::new("t", "out.svg").with_log_scale(10.0, 1000.0);
    let axis = y_axis_for(&config, &s);

    assert_eq!(axis.kind, ScaleKind::Log10);
    // data range is ignored; the visible range is exactly [y_min, y_max]
    assert_eq!((axis.min, axis.max), (10.0, 1000.0));
}

#[test]
fn log_ticks_are_plain_labeled_majors_and_minors() {
    let s = series(&[(50.0, 60.0), (55.0, 65.0), (52.0, 61.0)]);
    let config = ChartConfig::new("t", "out.svg").with_log_scale(10.0, 1000.0);
    let axis = y_axis_for(&config, &s);
    let ticks = axis.ticks();

    let majors: Vec<f64> = ticks.iter().filter(|t| !t.minor).map(|t| t.value).collect();
    assert_eq!(majors, vec![10.0, 100.0, 1000.0]);

    // minors at 2..9 multiples inside the range
    assert!(ticks.iter().any(|t| t.minor && t.value == 20.0));
    assert!(ticks.iter().any(|t| t.minor && t.value == 900.0));
    assert!(!ticks.iter().any(|t| t.value > 1000.0 || t.value < 10.0));

    // no scientific notation anywhere, majors or minors
    for t in &ticks {
        assert!(!t.label.contains('e') && !t.label.contains('E'), "label {}", t.label);
    }
    assert!(ticks.iter().any(|t| t.label == "1000"));
}

#[test]
fn plain_labels_never_scientific() {
    assert_eq!(plain_label(1000.0), "1000");
    assert_eq!(plain_label(10.0), "10");
    assert_eq!(plain_label(54.949), "54.95");
    assert_eq!(plain_label(0.5), "0.50");
}

#[test]
fn sub_decade_log_range_maps_endpoints_exactly() {
    // a range narrower than one decade must not be widened to min*10
    let s = series(&[(150.0, 250.0), (180.0, 300.0), (200.0, 320.0)]);
    let config = ChartConfig::new("t", "out.svg").with_log_scale(100.0, 500.0);
    let axis = y_axis_for(&config, &s);

    assert_eq!((axis.min, axis.max), (100.0, 500.0));
    assert!((axis.fraction(100.0) - 0.0).abs() < 1e-9);
    assert!((axis.fraction(500.0) - 1.0).abs() < 1e-9);
    // geometric midpoint sits at half height
    let mid = (100.0f64 * 500.0).sqrt();
    assert!((axis.fraction(mid) - 0.5).abs() < 1e-9);
    // values beyond the clamp land outside [0, 1]
    assert!(axis.fraction(1000.0) > 1.0);
}

#[test]
fn sub_decade_log_ticks_stay_in_range() {
    let s = series(&[(150.0, 250.0), (180.0, 300.0), (200.0, 320.0)]);
    let config = ChartConfig::new("t", "out.svg").with_log_scale(100.0, 500.0);
    let ticks = y_axis_for(&config, &s).ticks();

    let majors: Vec<f64> = ticks.iter().filter(|t| !t.minor).map(|t| t.value).collect();
    assert_eq!(majors, vec![100.0]);
    assert!(ticks.iter().any(|t| t.minor && t.value == 200.0));
    assert!(ticks.iter().any(|t| t.minor && t.value == 500.0));
    assert!(!ticks.iter().any(|t| t.value > 500.0 || t.value < 100.0));
}

#[test]
fn x_axis_spans_rows_with_half_slot_margin() {
    let s = series(&[(1.0, 2.0), (1.0, 2.0), (1.0, 2.0), (1.0, 2.0)]);
    let axis = x_axis_for(&s);
    assert_eq!((axis.min, axis.max), (-0.5, 3.5));
}

#[test]
fn fraction_maps_range_endpoints() {
    let s = series(&[(50.0, 60.0), (55.0, 65.0), (52.0, 61.0)]);
    let config = ChartConfig::new("t", "out.svg").with_log_scale(10.0, 1000.0);
    let axis = y_axis_for(&config, &s);

    assert!((axis.fraction(10.0) - 0.0).abs() < 1e-9);
    assert!((axis.fraction(1000.0) - 1.0).abs() < 1e-9);
    // log midpoint sits at 100, not 505
    assert!((axis.fraction(100.0) - 0.5).abs() < 1e-9);
}
