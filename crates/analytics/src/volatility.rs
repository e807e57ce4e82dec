//! Rolling annualized volatility of simple daily returns.
//!
//! For `n` prices and a window of `W` returns the output holds exactly
//! `n - W` points per symbol (none when `n <= W`). The first point is dated at
//! the `(W + 1)`-th price, which is the first date with `W` returns behind it.

use crate::error::AnalyticsError;
use crate::grouping::{daily_return, select_series};
use core_types::{DateRange, DerivedSeries, PriceTable, SeriesKind};
use std::collections::VecDeque;

/// Trading days per year used to annualize a daily standard deviation.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Window used when the caller does not choose one.
pub const DEFAULT_WINDOW: usize = 30;

/// The smallest window for which a sample standard deviation exists.
pub const MIN_WINDOW: usize = 2;

/// A fixed-capacity buffer of the most recent returns.
#[derive(Debug, Clone)]
pub struct ReturnWindow {
    returns: VecDeque<f64>,
    capacity: usize,
}

/// Rejects windows too small for a sample standard deviation.
pub fn check_window(window: usize) -> Result<(), AnalyticsError> {
    if window < MIN_WINDOW {
        return Err(AnalyticsError::InvalidWindow(format!(
            "window must be at least {} returns, got {}",
            MIN_WINDOW, window
        )));
    }
    Ok(())
}

impl ReturnWindow {
    /// The buffer grows on demand, so `capacity` may exceed any real history.
    pub fn new(capacity: usize) -> Result<Self, AnalyticsError> {
        check_window(capacity)?;
        Ok(Self {
            returns: VecDeque::new(),
            capacity,
        })
    }

    /// Adds a return, evicting the oldest once the buffer is full.
    pub fn push(&mut self, ret: f64) {
        if self.returns.len() == self.capacity {
            self.returns.pop_front();
        }
        self.returns.push_back(ret);
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.returns.len() == self.capacity
    }

    /// Sample (n - 1) standard deviation, only once the window is full.
    pub fn sample_std(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        let n = self.returns.len() as f64;
        let mean = self.returns.iter().sum::<f64>() / n;
        let sum_sq: f64 = self.returns.iter().map(|r| (r - mean).powi(2)).sum();
        Some((sum_sq / (n - 1.0)).sqrt())
    }

    /// The sample standard deviation scaled by `sqrt(252)`.
    pub fn annualized(&self) -> Option<f64> {
        self.sample_std().map(|s| s * TRADING_DAYS_PER_YEAR.sqrt())
    }
}

/// Computes rolling annualized volatility per selected symbol.
///
/// Only prices inside `range` take part; returns never reach across its
/// boundary. A symbol without `window + 1` prices in range contributes nothing.
pub fn rolling_volatility<S: AsRef<str>>(
    table: &PriceTable,
    symbols: &[S],
    range: &DateRange,
    window: usize,
) -> Result<DerivedSeries, AnalyticsError> {
    // Validate up front so a bad window fails even when no symbol has data.
    check_window(window)?;
    let mut out = DerivedSeries::new(SeriesKind::RollingVolatility { window });

    for series in select_series(table, symbols)? {
        let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
            continue;
        };
        let Some((start, end)) = range.clamp_to(first, last) else {
            continue;
        };
        let prices = series.between(start, end);
        if prices.len() <= window {
            tracing::debug!(
                symbol = series.symbol(),
                prices = prices.len(),
                window,
                "not enough prices for a full window"
            );
            continue;
        }

        let mut buffer = ReturnWindow::new(window)?;
        for pair in prices.windows(2) {
            buffer.push(daily_return(&pair[0], &pair[1])?);
            if let Some(vol) = buffer.annualized() {
                out.push(pair[1].date, series.symbol(), vol);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use core_types::PriceSeries;
    use rstest::rstest;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
    }

    fn table_of(closes: &[f64]) -> PriceTable {
        let series = PriceSeries::from_closes(
            "X",
            closes
                .iter()
                .enumerate()
                .map(|(i, c)| (start() + Duration::days(i as i64), *c)),
        )
        .unwrap();
        let mut table = PriceTable::new();
        table.insert(series).unwrap();
        table
    }

    fn zigzag(n: usize) -> Vec<f64> {
        (0..n).map(|i| if i % 2 == 0 { 100.0 } else { 103.0 + i as f64 * 0.1 }).collect()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn test_rejects_small_window(#[case] window: usize) {
        let table = table_of(&[1.0, 2.0, 3.0]);
        let err = rolling_volatility(&table, &["X"], &DateRange::unbounded(), window).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidWindow(_)));
    }

    #[rstest]
    #[case(40, 2)]
    #[case(40, 10)]
    #[case(40, 30)]
    #[case(31, 30)]
    #[case(30, 30)]
    #[case(5, 30)]
    fn test_point_count(#[case] n: usize, #[case] window: usize) {
        let table = table_of(&zigzag(n));
        let out = rolling_volatility(&table, &["X"], &DateRange::unbounded(), window).unwrap();
        assert_eq!(out.len(), n.saturating_sub(window));
    }

    #[rstest]
    #[case(usize::MAX / 2)]
    #[case(usize::MAX)]
    fn test_huge_window_yields_no_points(#[case] window: usize) {
        let table = table_of(&[100.0, 101.0, 102.0]);
        let out = rolling_volatility(&table, &["X"], &DateRange::unbounded(), window).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.kind, SeriesKind::RollingVolatility { window });
    }

    #[test]
    fn test_huge_return_window_does_not_preallocate() {
        let mut buffer = ReturnWindow::new(usize::MAX).unwrap();
        buffer.push(0.01);
        assert_eq!(buffer.len(), 1);
        assert!(!buffer.is_full());
    }

    #[test]
    fn test_first_point_date() {
        let out = rolling_volatility(&table_of(&zigzag(12)), &["X"], &DateRange::unbounded(), 5)
            .unwrap();
        assert_eq!(out.points[0].date, start() + Duration::days(5));
    }

    #[test]
    fn test_non_negative_and_zero_for_constant_growth() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let out = rolling_volatility(&table_of(&closes), &["X"], &DateRange::unbounded(), 5)
            .unwrap();
        assert!(out.iter().all(|p| p.value >= 0.0));
        assert!(out.iter().all(|p| p.value < 1e-9));
    }

    #[test]
    fn test_window_of_two_matches_hand_computation() {
        // Returns: +10%, -10%, +20%
        let table = table_of(&[100.0, 110.0, 99.0, 118.8]);
        let out = rolling_volatility(&table, &["X"], &DateRange::unbounded(), 2).unwrap();
        let expected = |a: f64, b: f64| {
            let mean = (a + b) / 2.0;
            (((a - mean).powi(2) + (b - mean).powi(2)) / 1.0).sqrt() * 252f64.sqrt()
        };
        let values = out.values_for("X");
        assert_eq!(values.len(), 2);
        assert!((values[0] - expected(0.1, -0.1)).abs() < 1e-9);
        assert!((values[1] - expected(-0.1, 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_range_limits_returns() {
        let table = table_of(&zigzag(20));
        let range = DateRange::between(start() + Duration::days(10), start() + Duration::days(19));
        let out = rolling_volatility(&table, &["X"], &range, 5).unwrap();
        // 10 prices in range, 9 returns, 5 full windows.
        assert_eq!(out.len(), 5);
        assert_eq!(out.points[0].date, start() + Duration::days(15));
    }

    #[test]
    fn test_return_window_evicts_oldest() {
        let mut buffer = ReturnWindow::new(3).unwrap();
        for r in [0.5, 0.01, 0.02, 0.03] {
            buffer.push(r);
        }
        assert_eq!(buffer.len(), 3);
        let std = buffer.sample_std().unwrap();
        assert!((std - 0.01).abs() < 1e-12);
    }
}
