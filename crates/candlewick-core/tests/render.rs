// File: crates/candlewick-core/tests/render.rs
// Purpose: End-to-end render smoke tests (SVG export, PNG bytes, repeat renders).

use candlewick_core::{
    draw_chart, ChartConfig, ChartError, IndexedSeries, PriceBar, TrendLineMode,
};
use candlewick_core::axis::{x_axis_for, y_axis_for};
use candlewick_core::{stepback_overrides, Chart, ChartOverlay, RenderOptions};
use chrono::NaiveDate;

fn sample_bars(n: usize) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date");
    (0..n)
        .map(|i| {
            let date = start + chrono::Days::new(i as u64);
            let base = 50.0 + (i as f64 * 0.7).sin() * 4.0;
            PriceBar::new("ABC", date, base, base + 2.0, base - 2.0, base + 1.0)
        })
        .collect()
}

fn out_path(name: &str) -> std::path::PathBuf {
    let dir = std::path::PathBuf::from("target/test_out");
    std::fs::create_dir_all(&dir).expect("create out dir");
    dir.join(name)
}

#[test]
fn draw_chart_writes_svg_for_each_mode() {
    let bars = sample_bars(12);
    let is_up: Vec<bool> = bars.iter().map(|b| b.close >= b.open).collect();
    // make sure angle mode has a down row to anchor on
    let mut is_up = is_up;
    is_up[3] = false;
    let step_back = vec![false; bars.len()];

    for (mode, name) in [
        (TrendLineMode::None, "mode_none.svg"),
        (TrendLineMode::FortyFiveDegreeAngle, "mode_angle.svg"),
        (TrendLineMode::PointToPoint, "mode_point.svg"),
    ] {
        let out = out_path(name);
        let config = ChartConfig::new("ABC daily", &out)
            .with_trend_lines(mode)
            .with_opening_price(50.0);
        draw_chart(bars.clone(), &is_up, &step_back, &config).expect("render");

        let text = std::fs::read_to_string(&out).expect("output exists");
        assert!(!text.is_empty(), "svg should be non-empty");
        assert!(text.contains("<svg"), "should contain an svg root: {name}");
    }
}

#[test]
fn draw_chart_handles_empty_series() {
    // the extraction collaborator currently returns no rows; that must render
    let config = ChartConfig::new("no data yet", out_path("empty.svg"))
        .with_trend_lines(TrendLineMode::PointToPoint)
        .with_opening_price(25.0);
    draw_chart(Vec::new(), &[], &[], &config).expect("empty render");
    assert!(out_path("empty.svg").exists());
}

#[test]
fn draw_chart_rejects_mismatched_flags() {
    let bars = sample_bars(5);
    let config = ChartConfig::new("bad flags", out_path("bad_flags.svg"));
    let err = draw_chart(bars, &[true, false], &[false; 5], &config).unwrap_err();
    let chart_err = err.downcast_ref::<ChartError>().expect("domain error");
    assert!(matches!(chart_err, ChartError::Configuration(_)));
}

#[test]
fn log_scale_chart_renders() {
    let bars = sample_bars(20);
    let is_up = vec![true; 20];
    let step_back = vec![false; 20];
    let out = out_path("log_scale.svg");
    let config = ChartConfig::new("ABC log", &out)
        .with_opening_price(50.0)
        .with_log_scale(10.0, 1000.0);
    draw_chart(bars, &is_up, &step_back, &config).expect("render");
    assert!(std::fs::metadata(&out).expect("output exists").len() > 0);
}

#[test]
fn png_bytes_decode_to_configured_dimensions() {
    let series = IndexedSeries::from_bars(sample_bars(8));
    let is_up = vec![true; 8];
    let step_back = vec![false; 8];
    let config = ChartConfig::new("png", "unused.svg").with_opening_price(50.0);

    let chart = Chart {
        title: String::new(),
        x_axis: x_axis_for(&series),
        y_axis: y_axis_for(&config, &series),
        overrides: stepback_overrides(&is_up, &step_back),
        overlay: ChartOverlay::Reference { price: 50.0 },
        series,
        date_format: "%Y-%m-%d".to_string(),
    };

    let mut opts = RenderOptions::default();
    opts.width = 320;
    opts.height = 240;
    opts.draw_labels = false; // avoid font variance

    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (320, 240));
}

#[test]
fn repeated_renders_are_resource_neutral() {
    // the host calls us many times in one process; nothing may accumulate
    let bars = sample_bars(10);
    let is_up: Vec<bool> = bars.iter().map(|b| b.close >= b.open).collect();
    let step_back = vec![false; bars.len()];
    let out = out_path("repeat.svg");

    for i in 0..10 {
        let config = ChartConfig::new(format!("pass {i}"), &out)
            .with_trend_lines(TrendLineMode::PointToPoint)
            .with_opening_price(50.0);
        draw_chart(bars.clone(), &is_up, &step_back, &config).expect("render");
    }
    assert!(out.exists());
}
