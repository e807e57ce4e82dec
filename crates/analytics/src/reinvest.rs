use crate::error::AnalyticsError;
use crate::growth::INDEX_BASE;
use crate::grouping::{daily_return, select_series};
use core_types::{DateRange, DerivedSeries, PriceTable, SeriesKind};

/// Tracks the value of 100 invested at the first trading date inside `range`.
///
/// The range is clamped to each symbol's own history. Returns are taken only
/// between in-window points, so the first in-window point anchors at exactly
/// 100 and each later point compounds by its day-over-day return. A symbol
/// with nothing inside the clamped window contributes no points.
pub fn reinvestment_index<S: AsRef<str>>(
    table: &PriceTable,
    symbols: &[S],
    range: &DateRange,
) -> Result<DerivedSeries, AnalyticsError> {
    let mut out = DerivedSeries::new(SeriesKind::ReinvestmentIndex);

    for series in select_series(table, symbols)? {
        let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
            continue;
        };
        let Some((start, end)) = range.clamp_to(first, last) else {
            tracing::debug!(symbol = series.symbol(), ?range, "range outside available history");
            continue;
        };

        let window = series.between(start, end);
        let Some(anchor) = window.first() else {
            continue;
        };

        let mut value = INDEX_BASE;
        out.push(anchor.date, series.symbol(), value);
        for pair in window.windows(2) {
            let ret = daily_return(&pair[0], &pair[1])?;
            value *= 1.0 + ret;
            out.push(pair[1].date, series.symbol(), value);
        }
        tracing::debug!(
            symbol = series.symbol(),
            %start,
            %end,
            points = window.len(),
            final_value = value,
            "reinvestment index computed"
        );
    }

    Ok(out)
}
