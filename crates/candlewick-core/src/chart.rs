// File: crates/candlewick-core/src/chart.rs
// Summary: Chart composition and headless SVG/PNG export using Skia surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::axis::{self, Axis, ScaleKind, Tick};
use crate::bars::{check_flag_lengths, IndexedSeries, PriceBar};
use crate::classify::{stepback_overrides, ColorOverride};
use crate::config::ChartConfig;
use crate::theme::Theme;
use crate::trend::{compute_overlay, effective_mode, ChartOverlay, TrendLineRole};
use crate::types::{Insets, HEIGHT, WIDTH};

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
        }
    }
}

/// One fully composed render request: candles, per-row color overrides,
/// overlay geometry, axes, and labeling. Built per request and dropped after
/// the file is written.
pub struct Chart {
    pub title: String,
    pub series: IndexedSeries,
    pub overrides: Vec<Option<ColorOverride>>,
    pub overlay: ChartOverlay,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub date_format: String,
}

/// Single entry point for a host render request. Takes every input explicitly;
/// nothing is read from ambient state.
///
/// Pipeline: normalize bars -> validate flag lengths -> classify stepback
/// colors -> select effective trend-line mode -> compute overlay -> apply axis
/// policy -> render and export SVG to `config.output_path`.
pub fn draw_chart(
    bars: Vec<PriceBar>,
    is_up: &[bool],
    step_back: &[bool],
    config: &ChartConfig,
) -> Result<()> {
    let series = IndexedSeries::from_bars(bars);
    check_flag_lengths(&series, is_up, step_back)?;
    let overrides = stepback_overrides(is_up, step_back);
    let mode = effective_mode(config.trend_lines, series.len());
    let overlay = compute_overlay(mode, &series, is_up, config.opening_price)?;

    let chart = Chart {
        title: config.title.clone(),
        x_axis: axis::x_axis_for(&series),
        y_axis: axis::y_axis_for(config, &series),
        series,
        overrides,
        overlay,
        date_format: config.date_format.clone(),
    };

    let opts = RenderOptions::default();
    chart.render_to_svg(&opts, &config.output_path)?;
    tracing::info!(path = %config.output_path.display(), rows = chart.series.len(), "chart written");
    Ok(())
}

impl Chart {
    /// Render to an SVG file. The SVG canvas and every paint live only for
    /// this call; repeated invocations hold nothing between them.
    pub fn render_to_svg(
        &self,
        opts: &RenderOptions,
        output_svg_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bounds = skia::Rect::from_wh(opts.width as f32, opts.height as f32);
        let mut canvas = skia::svg::Canvas::new(bounds, None);
        self.draw(&canvas, opts);
        let data = canvas.end();

        if let Some(parent) = output_svg_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_svg_path, data.as_bytes())?;
        Ok(())
    }

    /// Render to a PNG file using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Render to in-memory PNG bytes. The raster surface is dropped before
    /// returning.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        self.draw(canvas, opts);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let l = opts.insets.left as f32;
        let t = opts.insets.top as f32;
        let r = (opts.width - opts.insets.right as i32) as f32;
        let b = (opts.height - opts.insets.bottom as i32) as f32;

        let fx = {
            let x_axis = self.x_axis.clone();
            move |x: f64| -> f32 { l + x_axis.fraction(x) as f32 * (r - l) }
        };
        let fy = {
            let y_axis = self.y_axis.clone();
            move |v: f64| -> f32 { b - y_axis.fraction(v) as f32 * (b - t) }
        };

        let date_ticks = self.date_ticks();
        let y_ticks = self.y_axis.ticks();

        draw_grid(canvas, l, t, r, b, &fx, &fy, &date_ticks, &y_ticks, self.y_axis.kind, theme);
        draw_frame(canvas, l, t, r, b, theme);
        self.draw_candles(canvas, l, r, &fx, &fy, theme);
        self.draw_overlay(canvas, l, t, r, b, &fx, &fy, theme);

        if opts.draw_labels {
            self.draw_labels(canvas, l, t, r, b, &fx, &fy, &date_ticks, &y_ticks, theme);
            draw_title(canvas, &self.title, opts, theme);
        }
    }

    /// Pick up to 8 evenly stepped rows and format their dates for the X axis.
    fn date_ticks(&self) -> Vec<(usize, String)> {
        let n = self.series.len();
        if n == 0 {
            return Vec::new();
        }
        let step = (n + 7) / 8;
        (0..n)
            .step_by(step.max(1))
            .filter_map(|row| {
                self.series
                    .get(row)
                    .map(|bar| (row, bar.date.format(&self.date_format).to_string()))
            })
            .collect()
    }

    fn draw_candles(
        &self,
        canvas: &skia::Canvas,
        l: f32,
        r: f32,
        fx: &dyn Fn(f64) -> f32,
        fy: &dyn Fn(f64) -> f32,
        theme: &Theme,
    ) {
        if self.series.is_empty() {
            return;
        }

        let mut wick = skia::Paint::default();
        wick.set_anti_alias(true);
        wick.set_style(skia::paint::Style::Stroke);
        wick.set_stroke_width(1.0);

        let mut body = skia::Paint::default();
        body.set_anti_alias(true);
        body.set_style(skia::paint::Style::Fill);

        // body width as a fraction of one row slot
        let n = self.series.len() as f32;
        let bar_px = ((r - l) / n).max(3.0) * 0.7;

        for (i, bar) in self.series.bars().iter().enumerate() {
            let x = fx(i as f64);
            let y_h = fy(bar.high);
            let y_l = fy(bar.low);

            let up = bar.close >= bar.open;
            let color = match self.overrides.get(i).copied().flatten() {
                Some(ColorOverride::Blue) => theme.stepback_up,
                Some(ColorOverride::Orange) => theme.stepback_down,
                None => {
                    if up { theme.candle_up } else { theme.candle_down }
                }
            };
            wick.set_color(color);
            body.set_color(color);

            canvas.draw_line((x, y_h), (x, y_l), &wick);

            let half = bar_px * 0.5;
            let top = fy(bar.open).min(fy(bar.close));
            let bot = fy(bar.open).max(fy(bar.close));
            let rect = skia::Rect::from_ltrb(x - half, top, x + half, bot.max(top + 1.0));
            canvas.draw_rect(rect, &body);
        }
    }

    fn draw_overlay(
        &self,
        canvas: &skia::Canvas,
        l: f32,
        t: f32,
        r: f32,
        b: f32,
        fx: &dyn Fn(f64) -> f32,
        fy: &dyn Fn(f64) -> f32,
        theme: &Theme,
    ) {
        // overlay endpoints may land outside the auto-ranged window
        canvas.save();
        canvas.clip_rect(skia::Rect::from_ltrb(l, t, r, b), None, true);

        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(2.0);

        match &self.overlay {
            ChartOverlay::Reference { price } => {
                paint.set_color(theme.reference);
                if let Some(dots) = skia::dash_path_effect::new(&[2.0, 6.0], 0.0) {
                    paint.set_path_effect(dots);
                }
                let y = fy(*price);
                canvas.draw_line((l, y), (r, y), &paint);
            }
            ChartOverlay::Lines(lines) => {
                for line in lines {
                    paint.set_color(match line.role {
                        TrendLineRole::Angle => theme.trend_angle,
                        TrendLineRole::High => theme.trend_high,
                        TrendLineRole::Low => theme.trend_low,
                    });
                    canvas.draw_line(
                        (fx(line.start.row as f64), fy(line.start.price)),
                        (fx(line.end.row as f64), fy(line.end.price)),
                        &paint,
                    );
                }
            }
        }

        canvas.restore();
    }

    /// Price labels on the left, mirrored on the right; date labels on the
    /// bottom, mirrored on top. Log axes also label minor ticks (smaller).
    fn draw_labels(
        &self,
        canvas: &skia::Canvas,
        l: f32,
        t: f32,
        r: f32,
        b: f32,
        fx: &dyn Fn(f64) -> f32,
        fy: &dyn Fn(f64) -> f32,
        date_ticks: &[(usize, String)],
        y_ticks: &[Tick],
        theme: &Theme,
    ) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(theme.axis_label);

        let mut font = skia::Font::default();
        font.set_size(14.0);
        let mut minor_font = skia::Font::default();
        minor_font.set_size(11.0);

        for tick in y_ticks {
            if tick.minor && self.y_axis.kind == ScaleKind::Linear {
                continue;
            }
            let f = if tick.minor { &minor_font } else { &font };
            let (w, _) = f.measure_str(&tick.label, Some(&paint));
            let y = fy(tick.value) + 5.0;
            canvas.draw_str(&tick.label, (l - w - 8.0, y), f, &paint);
            canvas.draw_str(&tick.label, (r + 8.0, y), f, &paint);
        }

        for (row, label) in date_ticks {
            let (w, _) = font.measure_str(label, Some(&paint));
            let x = fx(*row as f64) - w * 0.5;
            canvas.draw_str(label, (x, b + 24.0), &font, &paint);
            canvas.draw_str(label, (x, t - 10.0), &font, &paint);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(
    canvas: &skia::Canvas,
    l: f32,
    t: f32,
    r: f32,
    b: f32,
    fx: &dyn Fn(f64) -> f32,
    fy: &dyn Fn(f64) -> f32,
    date_ticks: &[(usize, String)],
    y_ticks: &[Tick],
    y_kind: ScaleKind,
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(1.0);

    // dashed grid by default; solid (both axes, minors included) on log charts
    let solid = y_kind == ScaleKind::Log10;
    if !solid {
        if let Some(dash) = skia::dash_path_effect::new(&[6.0, 4.0], 0.0) {
            paint.set_path_effect(dash);
        }
    }

    for (row, _) in date_ticks {
        let x = fx(*row as f64);
        canvas.draw_line((x, t), (x, b), &paint);
    }
    for tick in y_ticks {
        if tick.minor && !solid {
            continue;
        }
        let y = fy(tick.value);
        canvas.draw_line((l, y), (r, y), &paint);
    }
}

fn draw_frame(canvas: &skia::Canvas, l: f32, t: f32, r: f32, b: f32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.axis_line);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(1.5);

    // primary axes left/bottom plus their mirrors top/right
    canvas.draw_rect(skia::Rect::from_ltrb(l, t, r, b), &paint);
}

fn draw_title(canvas: &skia::Canvas, title: &str, opts: &RenderOptions, theme: &Theme) {
    if title.is_empty() {
        return;
    }
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(theme.axis_label);

    let mut font = skia::Font::default();
    font.set_size(20.0);

    let (w, _) = font.measure_str(title, Some(&paint));
    let x = (opts.width as f32 - w) * 0.5;
    let y = (opts.insets.top as f32) * 0.5;
    canvas.draw_str(title, (x, y), &font, &paint);
}
