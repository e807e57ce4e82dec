//! # Ticker Lens Price Feed
//!
//! The boundary to whatever supplies raw daily prices. The analytics core
//! never touches files or the network; it receives a ready `PriceTable`
//! assembled here.
//!
//! - `PriceSource`: the abstract interface, so the file-backed source can be
//!   swapped for an in-memory (or any other) implementation.
//! - `CsvFileSource`: reads one daily price file per ticker, with an explicit
//!   staleness policy (`allow_stale`).
//! - `load_table`: fetches all requested tickers concurrently.

use async_trait::async_trait;
use core_types::PriceSeries;

pub mod csv_source;
pub mod error;
pub mod loader;
pub mod memory;

// --- Public API ---
pub use csv_source::{CsvFileSource, parse_daily_csv};
pub use error::FeedError;
pub use loader::load_table;
pub use memory::MemorySource;

/// The generic interface for an upstream daily price provider.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Returns the full daily history for `symbol`, date-ascending and de-duplicated.
    async fn fetch_daily(&self, symbol: &str) -> Result<PriceSeries, FeedError>;
}
