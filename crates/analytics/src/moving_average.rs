use crate::error::AnalyticsError;
use core_types::{DerivedSeries, PricePoint, SeriesKind};
use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

/// Simple moving average of close over `period` consecutive points.
///
/// The first `period - 1` points have no full window and are omitted.
pub fn moving_average(
    symbol: &str,
    points: &[PricePoint],
    period: usize,
) -> Result<DerivedSeries, AnalyticsError> {
    let mut sma = Sma::new(period).map_err(|e| {
        AnalyticsError::InvalidWindow(format!("moving average period {}: {:?}", period, e))
    })?;
    let mut out = DerivedSeries::new(SeriesKind::MovingAverage { period });

    for (seen, point) in points.iter().enumerate() {
        // `ta` averages whatever it has seen so far; only full windows are kept.
        let value = sma.next(point.close);
        if seen + 1 >= period {
            out.push(point.date, symbol, value);
        }
    }

    Ok(out)
}
