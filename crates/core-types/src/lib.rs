//! # Ticker Lens Core Types
//!
//! The Layer 0 data model shared by every other crate: raw daily prices going in,
//! derived `(date, symbol, value)` series coming out.

pub mod enums;
pub mod error;
pub mod series;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::SeriesKind;
pub use error::CoreError;
pub use series::{PriceSeries, PriceTable};
pub use structs::{Candle, DateRange, DerivedPoint, DerivedSeries, PricePoint};
