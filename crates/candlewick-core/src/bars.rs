// File: crates/candlewick-core/src/bars.rs
// Summary: Price bar model and series normalizer (date ordering + dense row index).

use chrono::NaiveDate;

use crate::error::ChartError;

/// One day's open/high/low/close record for a symbol.
/// Field ranges are not validated here; malformed bars pass through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self { symbol: symbol.into(), date, open, high, low, close }
    }
}

/// Bars sorted ascending by date. The dense zero-based row index is the
/// vector position, so indexing and iteration order always agree.
#[derive(Clone, Debug, Default)]
pub struct IndexedSeries {
    bars: Vec<PriceBar>,
}

impl IndexedSeries {
    /// Normalize a (possibly unordered) bar sequence: stable sort ascending by
    /// date, so bars sharing a date keep arrival order.
    pub fn from_bars(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self { bars }
    }

    pub fn len(&self) -> usize { self.bars.len() }

    pub fn is_empty(&self) -> bool { self.bars.is_empty() }

    pub fn bars(&self) -> &[PriceBar] { &self.bars }

    pub fn get(&self, row: usize) -> Option<&PriceBar> { self.bars.get(row) }

    /// Index of the last row, when the series is non-empty.
    pub fn last_row(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// (min low, max high) across all rows, or None for an empty series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for b in &self.bars {
            lo = lo.min(b.low);
            hi = hi.max(b.high);
        }
        if lo.is_finite() && hi.is_finite() { Some((lo, hi)) } else { None }
    }
}

/// Fail fast when the host-supplied flag arrays do not match the bar count.
/// The flags are consumed positionally, so a mismatch would otherwise read
/// rows that do not exist.
pub fn check_flag_lengths(
    series: &IndexedSeries,
    is_up: &[bool],
    step_back: &[bool],
) -> Result<(), ChartError> {
    let n = series.len();
    if is_up.len() != n {
        return Err(ChartError::Configuration(format!(
            "IsUp flags length {} does not match bar count {}",
            is_up.len(),
            n
        )));
    }
    if step_back.len() != n {
        return Err(ChartError::Configuration(format!(
            "StepBack flags length {} does not match bar count {}",
            step_back.len(),
            n
        )));
    }
    Ok(())
}
