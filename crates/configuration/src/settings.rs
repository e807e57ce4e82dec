use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub analytics: AnalyticsSettings,
    pub logging: LoggingSettings,
}

/// Where price files live and how old they may be.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding one `<SYMBOL>_daily.csv` file per ticker.
    pub directory: PathBuf,
    /// Tickers used when the caller does not name any.
    pub default_tickers: Vec<String>,
    /// Use a price file older than `max_age_hours` instead of failing.
    pub allow_stale: bool,
    /// Age after which a price file counts as stale. `None` disables the check.
    pub max_age_hours: Option<u64>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data_cache"),
            default_tickers: vec!["AAPL".to_string(), "MSFT".to_string()],
            allow_stale: true,
            max_age_hours: None,
        }
    }
}

/// Parameters for the analytics engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Rolling volatility window in trading days when none is requested.
    pub volatility_window: usize,
    /// Smallest window a request may ask for.
    pub min_window: usize,
    /// Largest window a request may ask for.
    pub max_window: usize,
    /// Calendar days covered by a volatility request without a date range.
    pub volatility_lookback_days: i64,
    /// Calendar days covered by a candlestick request without a date range.
    pub candle_lookback_days: i64,
    /// Moving-average periods drawn over candlesticks.
    pub ma_periods: Vec<usize>,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            volatility_window: 30,
            min_window: 2,
            max_window: 252,
            volatility_lookback_days: 365,
            candle_lookback_days: 60,
            ma_periods: vec![20, 50],
        }
    }
}

/// Output layout for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. "info" or "analytics=debug". `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
        }
    }
}
