// File: crates/candlewick-demo/src/main.rs
// Summary: Demo loads daily OHLC bars (CSV, DSN stub, or synthetic) and renders
// SVG candlestick charts in each trend-line mode plus a log-scale variant.

use anyhow::{Context, Result};
use candlewick_core::{
    draw_chart, BarSource, ChartConfig, DsnSource, ExtractRequest, PriceBar, TrendLineMode,
};
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: candlewick-demo [options]
  -i, --input PATH     daily OHLC CSV (date,open,high,low,close)
  -s, --symbol SYM     fetch bars for SYM from the configured DSN (stub)
  -b, --begin DATE     starting with this date (YYYY-MM-DD)
  -e, --end DATE       going through this date (YYYY-MM-DD)
  -o, --output DIR     output directory (default target/out)
  -l, --logging LEVEL  trace|debug|info|warn|error (default warn)
without --input or --symbol a synthetic series is rendered";

#[derive(Clone, Debug)]
struct CliArgs {
    input: Option<PathBuf>,
    symbol: Option<String>,
    begin: Option<NaiveDate>,
    end: Option<NaiveDate>,
    out_dir: PathBuf,
    log_level: String,
}

#[derive(Debug)]
struct UsageError(String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pure argument parser: consumes the raw argv slice, returns a validated,
/// immutable config before any domain logic runs.
fn parse_args(argv: &[String]) -> Result<CliArgs, UsageError> {
    let mut args = CliArgs {
        input: None,
        symbol: None,
        begin: None,
        end: None,
        out_dir: PathBuf::from("target/out"),
        log_level: "warn".to_string(),
    };

    let mut it = argv.iter();
    while let Some(flag) = it.next() {
        let mut value = |name: &str| -> Result<&String, UsageError> {
            it.next().ok_or_else(|| UsageError(format!("{name} needs a value")))
        };
        match flag.as_str() {
            "-i" | "--input" => args.input = Some(PathBuf::from(value(flag)?)),
            "-s" | "--symbol" => args.symbol = Some(value(flag)?.clone()),
            "-b" | "--begin" => args.begin = Some(parse_date(value(flag)?)?),
            "-e" | "--end" => args.end = Some(parse_date(value(flag)?)?),
            "-o" | "--output" => args.out_dir = PathBuf::from(value(flag)?),
            "-l" | "--logging" => args.log_level = value(flag)?.clone(),
            "-h" | "--help" => return Err(UsageError(String::new())),
            other => return Err(UsageError(format!("unknown argument: {other}"))),
        }
    }
    Ok(args)
}

fn parse_date(s: &str) -> Result<NaiveDate, UsageError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| UsageError(format!("bad date '{s}', expected YYYY-MM-DD")))
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            // help and bad arguments both show usage and exit cleanly
            if !e.0.is_empty() {
                eprintln!("{e}");
            }
            eprintln!("{USAGE}");
            return Ok(());
        }
    };

    let filter = EnvFilter::try_new(&args.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (bars, label) = load_bars(&args)?;
    println!("Loaded {} bars ({label})", bars.len());

    // The host normally supplies these; the demo derives stand-ins from the
    // bars themselves (up = closed higher, stepback = direction flip).
    let is_up: Vec<bool> = bars.iter().map(|b| b.close >= b.open).collect();
    let step_back: Vec<bool> = is_up
        .iter()
        .enumerate()
        .map(|(i, &up)| i > 0 && up != is_up[i - 1])
        .collect();

    let opening_price = bars.first().map(|b| b.open).unwrap_or(0.0);
    let (lo, hi) = price_range(&bars).unwrap_or((1.0, 100.0));

    for (mode_arg, suffix) in [("no", "reference"), ("angle", "angle"), ("point", "point")] {
        let out = args.out_dir.join(format!("chart_{label}_{suffix}.svg"));
        let config = ChartConfig::new(format!("{label} ({suffix})"), &out)
            .with_trend_lines(TrendLineMode::from_arg(mode_arg))
            .with_opening_price(opening_price);
        draw_chart(bars.clone(), &is_up, &step_back, &config)
            .with_context(|| format!("rendering {}", out.display()))?;
        println!("Wrote {}", out.display());
    }

    let out = args.out_dir.join(format!("chart_{label}_log.svg"));
    let config = ChartConfig::new(format!("{label} (log scale)"), &out)
        .with_opening_price(opening_price)
        .with_log_scale(lo * 0.9, hi * 1.1);
    draw_chart(bars, &is_up, &step_back, &config)
        .with_context(|| format!("rendering {}", out.display()))?;
    println!("Wrote {}", out.display());

    Ok(())
}

/// Pick the bar source: DSN stub when a symbol is given, CSV when a file is
/// given, synthetic series otherwise. Returns the bars and a short label for
/// file naming.
fn load_bars(args: &CliArgs) -> Result<(Vec<PriceBar>, String)> {
    if let Some(symbol) = &args.symbol {
        let mut req = ExtractRequest::new(symbol.clone());
        if let Some(b) = args.begin {
            req = req.with_start(b);
        }
        if let Some(e) = args.end {
            req = req.with_end(e);
        }
        let source = DsnSource::new("pg_finance", "pg_data_updater");
        let bars = source.fetch(&req)?;
        if bars.is_empty() {
            tracing::warn!(%symbol, "data source returned no rows; rendering an empty chart");
        }
        return Ok((bars, symbol.clone()));
    }

    if let Some(path) = &args.input {
        let bars = load_ohlc_csv(path)
            .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("chart")
            .to_string();
        return Ok((bars, label));
    }

    Ok((synthetic_bars(), "demo".to_string()))
}

/// Load a daily OHLC CSV (headers date,open,high,low,close; extra columns
/// ignored) into bars for one synthetic symbol.
fn load_ohlc_csv(path: &Path) -> Result<Vec<PriceBar>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    let idx = |name: &str| headers.iter().position(|h| h == name);

    let i_date = idx("date").context("CSV needs a 'date' column")?;
    let i_open = idx("open").context("CSV needs an 'open' column")?;
    let i_high = idx("high").context("CSV needs a 'high' column")?;
    let i_low = idx("low").context("CSV needs a 'low' column")?;
    let i_close = idx("close").context("CSV needs a 'close' column")?;
    let i_symbol = idx("symbol");

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).unwrap_or("").trim().to_string();
        let num = |i: usize| -> Result<f64> {
            field(i).parse::<f64>().with_context(|| format!("bad number '{}'", field(i)))
        };
        let date = NaiveDate::parse_from_str(&field(i_date), "%Y-%m-%d")
            .with_context(|| format!("bad date '{}'", field(i_date)))?;
        let symbol = i_symbol.map(field).unwrap_or_else(|| "CSV".to_string());
        out.push(PriceBar::new(
            symbol,
            date,
            num(i_open)?,
            num(i_high)?,
            num(i_low)?,
            num(i_close)?,
        ));
    }
    Ok(out)
}

/// Deterministic 30-bar wave so the demo runs without any input file.
fn synthetic_bars() -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
    (0..30)
        .map(|i| {
            let date = start + chrono::Days::new(i as u64);
            let base = 50.0 + (i as f64 * 0.45).sin() * 6.0 + i as f64 * 0.2;
            let close = base + ((i % 5) as f64 - 2.0) * 0.8;
            let open = base;
            let high = open.max(close) + 1.2;
            let low = open.min(close) - 1.2;
            PriceBar::new("DEMO", date, open, high, low, close)
        })
        .collect()
}

fn price_range(bars: &[PriceBar]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for b in bars {
        lo = lo.min(b.low);
        hi = hi.max(b.high);
    }
    if lo.is_finite() && hi.is_finite() {
        Some((lo, hi))
    } else {
        None
    }
}
