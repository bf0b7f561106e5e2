// File: crates/candlewick-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub candle_up: skia::Color,
    pub candle_down: skia::Color,
    pub stepback_up: skia::Color,
    pub stepback_down: skia::Color,
    pub reference: skia::Color,
    pub trend_angle: skia::Color,
    pub trend_high: skia::Color,
    pub trend_low: skia::Color,
}

impl Theme {
    /// Default palette: white canvas, green/red candles, blue/orange
    /// stepback overrides, red reference and High lines, blue Low line.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 252, 252, 252),
            grid: skia::Color::from_argb(255, 210, 210, 215),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            candle_up: skia::Color::from_argb(255, 0, 128, 0),
            candle_down: skia::Color::from_argb(255, 200, 40, 40),
            stepback_up: skia::Color::from_argb(255, 30, 80, 220),
            stepback_down: skia::Color::from_argb(255, 235, 140, 0),
            reference: skia::Color::from_argb(255, 200, 40, 40),
            trend_angle: skia::Color::from_argb(255, 32, 120, 200),
            trend_high: skia::Color::from_argb(255, 200, 40, 40),
            trend_low: skia::Color::from_argb(255, 30, 80, 220),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            candle_up: skia::Color::from_argb(255, 40, 200, 120),
            candle_down: skia::Color::from_argb(255, 220, 80, 80),
            stepback_up: skia::Color::from_argb(255, 90, 150, 255),
            stepback_down: skia::Color::from_argb(255, 255, 170, 40),
            reference: skia::Color::from_argb(255, 220, 80, 80),
            trend_angle: skia::Color::from_argb(255, 64, 160, 255),
            trend_high: skia::Color::from_argb(255, 220, 80, 80),
            trend_low: skia::Color::from_argb(255, 90, 150, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return the built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
