use crate::PriceSource;
use analytics::AnalyticsError;
use core_types::PriceTable;
use futures::future::join_all;

/// Fetches every requested symbol concurrently and assembles a `PriceTable`.
///
/// Any symbol the source cannot supply fails the whole load with
/// `DataUnavailable`; nothing is substituted. A symbol that resolves to zero
/// rows fails with `EmptySeries`.
pub async fn load_table<S: AsRef<str>>(
    source: &dyn PriceSource,
    symbols: &[S],
) -> Result<PriceTable, AnalyticsError> {
    let fetches = symbols.iter().map(|s| source.fetch_daily(s.as_ref()));
    let results = join_all(fetches).await;

    let mut table = PriceTable::new();
    for (symbol, result) in symbols.iter().zip(results) {
        let symbol = symbol.as_ref();
        let series = result.map_err(|e| {
            tracing::error!(symbol, error = %e, "price fetch failed");
            AnalyticsError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            }
        })?;
        if series.is_empty() {
            return Err(AnalyticsError::EmptySeries(symbol.to_string()));
        }
        table.insert(series)?;
    }

    tracing::info!(symbols = table.len(), "price table assembled");
    Ok(table)
}
