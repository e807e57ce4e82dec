use chrono::NaiveDate;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Price data for '{symbol}' is unavailable: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("Series for '{0}' contains no price points")]
    EmptySeries(String),

    #[error("Invalid price {price} for '{symbol}' on {date}: divisors must be positive and finite")]
    InvalidPrice {
        symbol: String,
        date: NaiveDate,
        price: f64,
    },

    #[error("Invalid rolling window: {0}")]
    InvalidWindow(String),

    #[error("Symbol '{0}' is not present in the price table")]
    UnknownSymbol(String),

    #[error("Open, high and low are required for '{symbol}' on {date}")]
    MissingOhlc { symbol: String, date: NaiveDate },

    #[error("Price table error: {0}")]
    Core(#[from] CoreError),
}
