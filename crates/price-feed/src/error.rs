use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("No price data found for '{symbol}' at {path}")]
    NotFound { symbol: String, path: PathBuf },

    #[error("Price data for '{symbol}' is {age_hours}h old (limit {max_hours}h)")]
    Stale {
        symbol: String,
        age_hours: u64,
        max_hours: u64,
    },

    #[error("Failed to read price data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV price data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Price file for '{symbol}' is missing the required column '{column}'")]
    MissingColumn { symbol: String, column: String },

    #[error("Price data violates series invariants: {0}")]
    Core(#[from] CoreError),
}
