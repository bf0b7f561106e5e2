// File: crates/candlewick-core/src/lib.rs
// Summary: Core library entry point; exports public API for chart construction and export.

pub mod axis;
pub mod bars;
pub mod chart;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod grid;
pub mod theme;
pub mod trend;
pub mod types;

pub use axis::{Axis, ScaleKind};
pub use bars::{check_flag_lengths, IndexedSeries, PriceBar};
pub use chart::{draw_chart, Chart, RenderOptions};
pub use classify::{classify, stepback_overrides, ColorOverride};
pub use config::ChartConfig;
pub use error::ChartError;
pub use extract::{build_query, BarSource, DsnSource, ExtractRequest, QuerySpec};
pub use theme::Theme;
pub use trend::{compute_overlay, effective_mode, ChartOverlay, TrendLine, TrendLineMode, SLOPE};
