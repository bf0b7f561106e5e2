// File: crates/candlewick-core/src/extract.rs
// Summary: Data-extraction collaborator interface: parameterized range query + stub source.

use anyhow::Result;
use chrono::NaiveDate;

use crate::bars::PriceBar;

/// Range query for one symbol. Dates are inclusive bounds; omit either to
/// take the earliest/latest rows the source has.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractRequest {
    pub symbol: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExtractRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), start_date: None, end_date: None }
    }

    pub fn with_start(mut self, d: NaiveDate) -> Self {
        self.start_date = Some(d);
        self
    }

    pub fn with_end(mut self, d: NaiveDate) -> Self {
        self.end_date = Some(d);
        self
    }
}

/// A SQL statement plus its positional parameters. Values are never
/// interpolated into the statement text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySpec {
    pub sql: String,
    pub params: Vec<String>,
}

/// Build the bar-extraction statement for a request.
///
/// Base predicate selects the symbol; optional date bounds add
/// `BETWEEN` (both), `>=` (start only) or `<=` (end only). Rows always come
/// back ordered by date ascending, which is what `IndexedSeries` expects.
pub fn build_query(req: &ExtractRequest) -> QuerySpec {
    let mut sql = String::from(
        "SELECT symbol, date, open_p, high, low, close_p \
         FROM stock_data.current_data WHERE symbol = $1",
    );
    let mut params = vec![req.symbol.clone()];

    match (req.start_date, req.end_date) {
        (Some(start), Some(end)) => {
            sql.push_str(" AND date BETWEEN $2 AND $3");
            params.push(start.format("%Y-%m-%d").to_string());
            params.push(end.format("%Y-%m-%d").to_string());
        }
        (Some(start), None) => {
            sql.push_str(" AND date >= $2");
            params.push(start.format("%Y-%m-%d").to_string());
        }
        (None, Some(end)) => {
            sql.push_str(" AND date <= $2");
            params.push(end.format("%Y-%m-%d").to_string());
        }
        (None, None) => {}
    }

    sql.push_str(" ORDER BY date ASC");
    QuerySpec { sql, params }
}

/// Anything that can produce the ordered bar sequence for a request.
pub trait BarSource {
    fn fetch(&self, req: &ExtractRequest) -> Result<Vec<PriceBar>>;
}

/// Source backed by a pre-configured data-source connection (DSN).
#[derive(Clone, Debug)]
pub struct DsnSource {
    pub dsn: String,
    pub user: String,
}

impl DsnSource {
    pub fn new(dsn: impl Into<String>, user: impl Into<String>) -> Self {
        Self { dsn: dsn.into(), user: user.into() }
    }
}

impl BarSource for DsnSource {
    // TODO: wire the actual DB client; for now the query is built and logged
    // but no rows come back. Zero bars is a valid renderer input, so callers
    // keep working while this is finished.
    fn fetch(&self, req: &ExtractRequest) -> Result<Vec<PriceBar>> {
        let spec = build_query(req);
        tracing::debug!(dsn = %self.dsn, sql = %spec.sql, params = ?spec.params, "extract query");
        Ok(Vec::new())
    }
}
