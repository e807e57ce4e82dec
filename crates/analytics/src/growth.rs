use crate::error::AnalyticsError;
use crate::grouping::{divisor, select_series};
use core_types::{DerivedSeries, PriceTable, SeriesKind};

/// The value every growth and reinvestment index starts from.
pub const INDEX_BASE: f64 = 100.0;

/// Rebases each selected symbol so its earliest close in the table equals 100.
///
/// The origin is always the first date held in the table for that symbol, so
/// a later display filter never moves it. An empty `symbols` slice selects
/// every symbol.
pub fn growth_index<S: AsRef<str>>(
    table: &PriceTable,
    symbols: &[S],
) -> Result<DerivedSeries, AnalyticsError> {
    let mut out = DerivedSeries::new(SeriesKind::GrowthIndex);

    for series in select_series(table, symbols)? {
        let origin = series
            .first()
            .ok_or_else(|| AnalyticsError::EmptySeries(series.symbol().to_string()))?;
        let base = divisor(origin)?;

        for point in series.points() {
            // Ratio first so the origin lands on exactly 100.
            out.push(point.date, series.symbol(), INDEX_BASE * (point.close / base));
        }
        tracing::debug!(
            symbol = series.symbol(),
            base,
            points = series.len(),
            "growth index computed"
        );
    }

    Ok(out)
}
