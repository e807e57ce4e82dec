use crate::PriceSource;
use crate::error::FeedError;
use async_trait::async_trait;
use core_types::PriceSeries;
use std::collections::HashMap;
use std::path::PathBuf;

/// Serves preloaded series, e.g. for tests or when prices are embedded.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<String, PriceSeries>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.symbol().to_string(), series);
        self
    }
}

#[async_trait]
impl PriceSource for MemorySource {
    async fn fetch_daily(&self, symbol: &str) -> Result<PriceSeries, FeedError> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| FeedError::NotFound {
                symbol: symbol.to_string(),
                path: PathBuf::from("<memory>"),
            })
    }
}
