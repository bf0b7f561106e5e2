// File: crates/candlewick-core/tests/normalize.rs
// Purpose: Validate series normalization (date ordering, dense index) and flag checks.

use candlewick_core::{check_flag_lengths, ChartError, IndexedSeries, PriceBar};
use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date")
}

fn bar(d: u32, close: f64) -> PriceBar {
    PriceBar::new("ABC", day(d), close - 0.5, close + 1.0, close - 1.0, close)
}

#[test]
fn bars_sorted_ascending_with_dense_index() {
    let series = IndexedSeries::from_bars(vec![bar(7, 3.0), bar(1, 1.0), bar(4, 2.0)]);

    assert_eq!(series.len(), 3);
    assert_eq!(series.last_row(), Some(2));
    let dates: Vec<_> = series.bars().iter().map(|b| b.date).collect();
    assert_eq!(dates, vec![day(1), day(4), day(7)]);

    // row index is positional
    assert_eq!(series.get(0).unwrap().close, 1.0);
    assert_eq!(series.get(2).unwrap().close, 3.0);
    assert!(series.get(3).is_none());
}

#[test]
fn equal_dates_keep_arrival_order() {
    let mut first = bar(5, 10.0);
    first.symbol = "FIRST".to_string();
    let mut second = bar(5, 20.0);
    second.symbol = "SECOND".to_string();

    let series = IndexedSeries::from_bars(vec![first, second]);
    assert_eq!(series.get(0).unwrap().symbol, "FIRST");
    assert_eq!(series.get(1).unwrap().symbol, "SECOND");
}

#[test]
fn malformed_bars_pass_through() {
    // low above high is not our problem at this layer
    let weird = PriceBar::new("ABC", day(2), 5.0, 1.0, 9.0, 5.0);
    let series = IndexedSeries::from_bars(vec![weird.clone()]);
    assert_eq!(series.get(0), Some(&weird));
}

#[test]
fn price_range_spans_lows_and_highs() {
    let series = IndexedSeries::from_bars(vec![bar(1, 10.0), bar(2, 30.0)]);
    assert_eq!(series.price_range(), Some((9.0, 31.0)));
    assert_eq!(IndexedSeries::from_bars(Vec::new()).price_range(), None);
}

#[test]
fn flag_length_mismatch_fails_fast() {
    let series = IndexedSeries::from_bars(vec![bar(1, 1.0), bar(2, 2.0)]);

    assert!(check_flag_lengths(&series, &[true, false], &[false, false]).is_ok());

    let err = check_flag_lengths(&series, &[true], &[false, false]).unwrap_err();
    assert!(matches!(err, ChartError::Configuration(_)));

    let err = check_flag_lengths(&series, &[true, false], &[false]).unwrap_err();
    assert!(matches!(err, ChartError::Configuration(_)));
}
