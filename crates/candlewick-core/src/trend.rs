// File: crates/candlewick-core/src/trend.rs
// Summary: Trend line geometry calculator; mode selection and overlay endpoints.

use crate::bars::IndexedSeries;
use crate::error::ChartError;

/// Calibrated slope for the 45-degree line, in price units per row.
/// Not tan(45 deg); the value was tuned against hand-drawn charts.
pub const SLOPE: f64 = 0.707;

/// Requested overlay behavior for one chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendLineMode {
    None,
    FortyFiveDegreeAngle,
    PointToPoint,
}

impl TrendLineMode {
    /// Host-side argument mapping: "no" disables trend lines, "angle" selects
    /// the 45-degree line, anything else means point-to-point.
    pub fn from_arg(s: &str) -> Self {
        match s {
            "no" => TrendLineMode::None,
            "angle" => TrendLineMode::FortyFiveDegreeAngle,
            _ => TrendLineMode::PointToPoint,
        }
    }
}

/// Which line a `TrendLine` represents; drives the stroke color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendLineRole {
    Angle,
    High,
    Low,
}

/// Anchor point in chart space: row index on X, price on Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendPoint {
    pub row: usize,
    pub price: f64,
}

/// Straight overlay line between two anchors. Produced fresh per render,
/// never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendLine {
    pub role: TrendLineRole,
    pub start: TrendPoint,
    pub end: TrendPoint,
}

/// What the renderer draws on top of the candles.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartOverlay {
    /// Dotted horizontal reference line spanning the whole chart.
    Reference { price: f64 },
    Lines(Vec<TrendLine>),
}

/// A series with fewer than 3 rows cannot carry a meaningful trend line;
/// the requested mode is forced to `None`.
pub fn effective_mode(requested: TrendLineMode, rows: usize) -> TrendLineMode {
    if rows < 3 {
        TrendLineMode::None
    } else {
        requested
    }
}

/// Row index of the minimum `low` among down rows (`is_up[i] == false`).
/// Ties keep the earliest row. None when the series has no down rows.
fn lowest_down_row(series: &IndexedSeries, is_up: &[bool]) -> Option<usize> {
    let mut minimum = f64::INFINITY;
    let mut minimum_row = None;
    for (i, (bar, &up)) in series.bars().iter().zip(is_up).enumerate() {
        if !up && bar.low < minimum {
            minimum = bar.low;
            minimum_row = Some(i);
        }
    }
    minimum_row
}

/// Index of the next local high at or after `start_at`.
/// Referenced by the geometry calculator but not yet built; callers must not
/// assume it works.
pub fn find_next_maximum(_series: &IndexedSeries, _start_at: usize) -> Result<usize, ChartError> {
    Err(ChartError::NotImplemented("find_next_maximum"))
}

/// Compute the overlay for the given (already effective) mode.
///
/// - `None`: reference line at `opening_price`.
/// - `FortyFiveDegreeAngle`: one line from the lowest down-row low, rising
///   `SLOPE` per row out to the last row (point-slope form). Fails with
///   `NoDownRows` when the series has no down rows rather than anchoring
///   at an arbitrary row.
/// - `PointToPoint`: exactly two lines spanning first to last row, one on
///   highs and one on lows; intermediate rows are ignored.
///
/// `is_up` must be length-matched to the series (see `check_flag_lengths`).
pub fn compute_overlay(
    mode: TrendLineMode,
    series: &IndexedSeries,
    is_up: &[bool],
    opening_price: f64,
) -> Result<ChartOverlay, ChartError> {
    match mode {
        TrendLineMode::None => Ok(ChartOverlay::Reference { price: opening_price }),

        TrendLineMode::FortyFiveDegreeAngle => {
            let x1 = lowest_down_row(series, is_up).ok_or(ChartError::NoDownRows)?;
            let y1 = series.bars()[x1].low;
            // x1 exists, so the series is non-empty
            let x2 = series.last_row().unwrap_or(x1);
            // point-slope line equation: y = slope * (x - x1) + y1
            let y2 = SLOPE * (x2 as f64 - x1 as f64) + y1;
            Ok(ChartOverlay::Lines(vec![TrendLine {
                role: TrendLineRole::Angle,
                start: TrendPoint { row: x1, price: y1 },
                end: TrendPoint { row: x2, price: y2 },
            }]))
        }

        TrendLineMode::PointToPoint => {
            // effective_mode guarantees >= 3 rows here
            let first = 0usize;
            let Some(last) = series.last_row() else {
                return Ok(ChartOverlay::Lines(Vec::new()));
            };
            let bars = series.bars();
            let high = TrendLine {
                role: TrendLineRole::High,
                start: TrendPoint { row: first, price: bars[first].high },
                end: TrendPoint { row: last, price: bars[last].high },
            };
            let low = TrendLine {
                role: TrendLineRole::Low,
                start: TrendPoint { row: first, price: bars[first].low },
                end: TrendPoint { row: last, price: bars[last].low },
            };
            Ok(ChartOverlay::Lines(vec![high, low]))
        }
    }
}
