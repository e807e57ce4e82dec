use crate::error::AnalyticsError;
use crate::grouping::trailing_range;
use chrono::NaiveDate;
use core_types::{Candle, DateRange, PriceSeries};
use serde::Serialize;

/// Candlestick rows for one symbol over a clamped date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleWindow {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub candles: Vec<Candle>,
    /// `(lower, upper)` price bounds with padding, `None` for an empty window.
    pub price_bounds: Option<(f64, f64)>,
}

/// Resolves the range a candlestick view should cover.
///
/// When either bound is missing the trailing `lookback_days` ending at
/// `min(today, last)` is used. The result is clamped to the series history.
pub fn resolve_range(
    series: &PriceSeries,
    range: &DateRange,
    today: NaiveDate,
    lookback_days: i64,
) -> Option<(NaiveDate, NaiveDate)> {
    let first = series.first_date()?;
    let last = series.last_date()?;
    let requested = match (range.start, range.end) {
        (Some(_), Some(_)) => *range,
        _ => {
            let (start, end) = trailing_range(first, last, today, lookback_days);
            DateRange::between(start, end)
        }
    };
    requested.clamp_to(first, last)
}

/// Collects the OHLC rows of `series` between `start` and `end`.
pub fn candle_window(
    series: &PriceSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<CandleWindow, AnalyticsError> {
    let candles = series
        .between(start, end)
        .iter()
        .map(|p| {
            p.candle().ok_or_else(|| AnalyticsError::MissingOhlc {
                symbol: series.symbol().to_string(),
                date: p.date,
            })
        })
        .collect::<Result<Vec<Candle>, AnalyticsError>>()?;

    let price_bounds = padded_bounds(&candles);
    Ok(CandleWindow {
        symbol: series.symbol().to_string(),
        start,
        end,
        candles,
        price_bounds,
    })
}

/// Lowest low and highest high, widened by 5% of the span (at least 1.0).
pub fn padded_bounds(candles: &[Candle]) -> Option<(f64, f64)> {
    if candles.is_empty() {
        return None;
    }
    let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let pad = ((high - low) * 0.05).max(1.0);
    Some((low - pad, high + pad))
}
