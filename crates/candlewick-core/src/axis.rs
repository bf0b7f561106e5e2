// File: crates/candlewick-core/src/axis.rs
// Summary: Axis model, scaling policy (linear auto-range vs. clamped log), tick layout.

use crate::bars::IndexedSeries;
use crate::config::ChartConfig;
use crate::grid::linspace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log10,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
}

/// One tick mark on an axis. Minor ticks only exist on log axes
/// (2..9 multiples between decades); both carry plain labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
    pub minor: bool,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Linear }
    }

    pub fn log10(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Log10 }
    }

    /// Position of `v` along the axis as a fraction in [0, 1] of the span.
    /// Log axes interpolate in log10 space with the usual positive-range guards.
    pub fn fraction(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => {
                let span = (self.max - self.min).max(1e-12);
                (v - self.min) / span
            }
            ScaleKind::Log10 => {
                let eps = 1e-12;
                let lo_raw = self.min.max(eps);
                // only substitute a decade when the range is degenerate;
                // a valid narrow range must map its endpoints exactly
                let hi_raw = if self.max <= lo_raw { lo_raw * 10.0 } else { self.max };
                let lo = lo_raw.log10();
                let hi = hi_raw.log10();
                let span = (hi - lo).max(1e-12);
                (v.max(eps).log10() - lo) / span
            }
        }
    }

    /// Tick layout for this axis. Linear axes get evenly spaced majors;
    /// log axes get majors at powers of ten and minors at 2..9 multiples,
    /// all restricted to the visible range.
    pub fn ticks(&self) -> Vec<Tick> {
        match self.kind {
            ScaleKind::Linear => linspace(self.min, self.max, 6)
                .into_iter()
                .map(|v| Tick { value: v, label: plain_label(v), minor: false })
                .collect(),
            ScaleKind::Log10 => {
                let eps = 1e-12;
                let lo = self.min.max(eps);
                let hi = self.max.max(lo);
                let first = lo.log10().floor() as i32;
                let last = hi.log10().ceil() as i32;
                let mut out = Vec::new();
                for e in first..=last {
                    let decade = 10f64.powi(e);
                    if decade >= lo * (1.0 - 1e-9) && decade <= hi * (1.0 + 1e-9) {
                        out.push(Tick { value: decade, label: plain_label(decade), minor: false });
                    }
                    for k in 2..10 {
                        let v = decade * k as f64;
                        if v >= lo && v <= hi {
                            out.push(Tick { value: v, label: plain_label(v), minor: true });
                        }
                    }
                }
                out.sort_by(|a, b| a.value.total_cmp(&b.value));
                out
            }
        }
    }
}

/// Plain (non-scientific) numeric label. Whole values drop the fraction;
/// everything else keeps two decimals.
pub fn plain_label(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

/// Y-axis scaling policy.
///
/// Default is a linear axis auto-ranged over the series lows/highs with a 2%
/// margin (empty series fall back to [0, 1]). With `use_log_scale` the visible
/// range is clamped to exactly [y_min, y_max] and the axis switches to log10.
pub fn y_axis_for(config: &ChartConfig, series: &IndexedSeries) -> Axis {
    if config.use_log_scale {
        return Axis::log10("Price", config.y_min, config.y_max);
    }
    match series.price_range() {
        Some((lo, hi)) => {
            let mut lo = lo;
            let mut hi = hi;
            if (hi - lo).abs() < 1e-9 {
                hi = lo + 1.0;
            }
            let margin = (hi - lo) * 0.02;
            Axis::new("Price", lo - margin, hi + margin)
        }
        None => Axis::new("Price", 0.0, 1.0),
    }
}

/// X axis spans the row indices with a half-slot margin on each side so the
/// first and last candles are not clipped at the plot edge.
pub fn x_axis_for(series: &IndexedSeries) -> Axis {
    if series.is_empty() {
        return Axis::new("Date", 0.0, 1.0);
    }
    let n = series.len() as f64;
    Axis::new("Date", -0.5, n - 0.5)
}
