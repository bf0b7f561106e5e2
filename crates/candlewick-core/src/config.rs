// File: crates/candlewick-core/src/config.rs
// Summary: Per-request chart configuration supplied by the host.

use std::path::PathBuf;

use crate::trend::TrendLineMode;

/// Everything one render needs besides the bars and flag arrays.
/// Constructed by the host per chart request and consumed once.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub title: String,
    pub output_path: PathBuf,
    /// chrono strftime format for date tick labels, e.g. "%Y-%m-%d".
    pub date_format: String,
    pub trend_lines: TrendLineMode,
    pub use_log_scale: bool,
    /// Visible range bounds, enforced only when `use_log_scale` is set.
    pub y_min: f64,
    pub y_max: f64,
    /// Price for the dotted reference line drawn when no trend line applies.
    pub opening_price: f64,
}

impl ChartConfig {
    pub fn new(title: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            output_path: output_path.into(),
            date_format: "%Y-%m-%d".to_string(),
            trend_lines: TrendLineMode::None,
            use_log_scale: false,
            y_min: 0.0,
            y_max: 0.0,
            opening_price: 0.0,
        }
    }

    pub fn with_trend_lines(mut self, mode: TrendLineMode) -> Self {
        self.trend_lines = mode;
        self
    }

    pub fn with_log_scale(mut self, y_min: f64, y_max: f64) -> Self {
        self.use_log_scale = true;
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    pub fn with_opening_price(mut self, price: f64) -> Self {
        self.opening_price = price;
        self
    }

    pub fn with_date_format(mut self, fmt: impl Into<String>) -> Self {
        self.date_format = fmt.into();
        self
    }
}
