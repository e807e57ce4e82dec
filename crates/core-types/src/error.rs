use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Series for '{0}' contains no price points")]
    EmptySeries(String),

    #[error("Series for '{symbol}' is not in ascending date order at {date}")]
    Unordered { symbol: String, date: NaiveDate },

    #[error("Series for '{symbol}' contains the date {date} more than once")]
    DuplicateDate { symbol: String, date: NaiveDate },

    #[error("Point for '{found}' cannot be added to the series for '{expected}'")]
    SymbolMismatch { expected: String, found: String },

    #[error("Inconsistent OHLC values for '{symbol}' on {date}")]
    InvalidOhlc { symbol: String, date: NaiveDate },
}
