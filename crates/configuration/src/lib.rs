use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{AnalyticsSettings, Config, DataSettings, LogFormat, LoggingSettings};

/// Prefix for environment overrides, e.g. `TICKER_LENS_DATA__ALLOW_STALE=false`.
pub const ENV_PREFIX: &str = "TICKER_LENS";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at
/// `path` (or an optional `config.toml` in the working directory when no path
/// is given), then `TICKER_LENS_*` environment variables. The merged result is
/// validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_with_env(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("data.default_tickers")
        .with_list_parse_key("analytics.ma_periods")
}

fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Config, ConfigError> {
    let file = match path {
        // An explicitly named file must exist.
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Checks cross-field constraints that serde cannot express.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let a = &config.analytics;
    if a.min_window < 2 {
        return Err(ConfigError::ValidationError(format!(
            "analytics.min_window must be at least 2, got {}",
            a.min_window
        )));
    }
    if a.max_window < a.min_window {
        return Err(ConfigError::ValidationError(format!(
            "analytics.max_window ({}) is below analytics.min_window ({})",
            a.max_window, a.min_window
        )));
    }
    if !(a.min_window..=a.max_window).contains(&a.volatility_window) {
        return Err(ConfigError::ValidationError(format!(
            "analytics.volatility_window ({}) must lie within {}..={}",
            a.volatility_window, a.min_window, a.max_window
        )));
    }
    if a.volatility_lookback_days <= 0 || a.candle_lookback_days <= 0 {
        return Err(ConfigError::ValidationError(
            "look-back periods must be positive".to_string(),
        ));
    }
    if a.ma_periods.contains(&0) {
        return Err(ConfigError::ValidationError(
            "analytics.ma_periods must not contain 0".to_string(),
        ));
    }
    if config.data.default_tickers.is_empty() {
        return Err(ConfigError::ValidationError(
            "data.default_tickers must name at least one ticker".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use std::path::PathBuf;

    fn env_from(pairs: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing.toml");
        let err = load_with_env(Some(&missing), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        validate(&config).unwrap();
        assert_eq!(config.analytics.volatility_window, 30);
        assert_eq!(config.analytics.ma_periods, vec![20, 50]);
        assert_eq!(config.data.default_tickers, vec!["AAPL", "MSFT"]);
        assert_eq!(config.data.directory, PathBuf::from("data_cache"));
        assert!(config.data.allow_stale);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_toml(
            r#"
            [data]
            directory = "/tmp/prices"
            default_tickers = ["NVDA"]
            max_age_hours = 24

            [analytics]
            volatility_window = 60

            [logging]
            level = "debug"
            format = "compact"
            "#,
        );
        let config = load_with_env(Some(file.path()), env_from(&[])).unwrap();
        assert_eq!(config.data.directory, PathBuf::from("/tmp/prices"));
        assert_eq!(config.data.default_tickers, vec!["NVDA"]);
        assert_eq!(config.data.max_age_hours, Some(24));
        assert_eq!(config.analytics.volatility_window, 60);
        // Untouched keys keep their defaults.
        assert_eq!(config.analytics.max_window, 252);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_toml("[data]\nallow_stale = true\n");
        let env = env_from(&[
            ("TICKER_LENS_DATA__ALLOW_STALE", "false"),
            ("TICKER_LENS_DATA__DEFAULT_TICKERS", "AAPL,GOOG"),
            ("TICKER_LENS_ANALYTICS__VOLATILITY_WINDOW", "45"),
        ]);
        let config = load_with_env(Some(file.path()), env).unwrap();
        assert!(!config.data.allow_stale);
        assert_eq!(config.data.default_tickers, vec!["AAPL", "GOOG"]);
        assert_eq!(config.analytics.volatility_window, 45);
    }

    #[rstest]
    #[case("[analytics]\nmin_window = 1\n")]
    #[case("[analytics]\nmin_window = 40\nmax_window = 20\n")]
    #[case("[analytics]\nvolatility_window = 500\n")]
    #[case("[analytics]\nma_periods = [20, 0]\n")]
    #[case("[analytics]\ncandle_lookback_days = 0\n")]
    #[case("[data]\ndefault_tickers = []\n")]
    fn test_validation_failures(#[case] contents: &str) {
        let file = write_toml(contents);
        let err = load_with_env(Some(file.path()), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)), "{err}");
    }
}
