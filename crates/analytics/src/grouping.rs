//! Per-symbol selection and return helpers shared by every transform.

use crate::error::AnalyticsError;
use chrono::{Duration, NaiveDate};
use core_types::{PricePoint, PriceSeries, PriceTable};

/// Resolves the requested symbols against the table, in request order.
///
/// An empty request selects every symbol in the table. Repeated symbols are
/// only returned once.
pub fn select_series<'a, S: AsRef<str>>(
    table: &'a PriceTable,
    symbols: &[S],
) -> Result<Vec<&'a PriceSeries>, AnalyticsError> {
    if symbols.is_empty() {
        return Ok(table.iter().collect());
    }

    let mut selected: Vec<&PriceSeries> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.as_ref();
        let series = table
            .get(symbol)
            .ok_or_else(|| AnalyticsError::UnknownSymbol(symbol.to_string()))?;
        if !selected.iter().any(|s| s.symbol() == symbol) {
            selected.push(series);
        }
    }
    Ok(selected)
}

/// Ensures `point.close` can be used as a divisor.
pub fn divisor(point: &PricePoint) -> Result<f64, AnalyticsError> {
    if point.close.is_finite() && point.close > 0.0 {
        Ok(point.close)
    } else {
        Err(AnalyticsError::InvalidPrice {
            symbol: point.symbol.clone(),
            date: point.date,
            price: point.close,
        })
    }
}

/// Simple day-over-day return `curr / prev - 1`.
pub fn daily_return(prev: &PricePoint, curr: &PricePoint) -> Result<f64, AnalyticsError> {
    Ok(curr.close / divisor(prev)? - 1.0)
}

/// Trailing range of `lookback_days` calendar days that ends at `today` or at
/// the last available date, whichever is earlier, never starting before `first`.
///
/// A look-back reaching past the calendar's lower limit starts at `first`.
pub fn trailing_range(
    first: NaiveDate,
    last: NaiveDate,
    today: NaiveDate,
    lookback_days: i64,
) -> (NaiveDate, NaiveDate) {
    let end = today.min(last);
    let start = Duration::try_days(lookback_days)
        .and_then(|span| end.checked_sub_signed(span))
        .map_or(first, |start| first.max(start));
    (start, end)
}
