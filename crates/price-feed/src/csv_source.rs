use crate::PriceSource;
use crate::error::FeedError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::DataSettings;
use core_types::{PricePoint, PriceSeries};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const SECONDS_PER_HOUR: u64 = 3600;

/// Reads `<directory>/<SYMBOL>_daily.csv` files written by an upstream fetcher.
///
/// Accepted columns: `date` (or `timestamp`), `close`, and optionally `open`,
/// `high`, `low`. Anything else (`volume`, `symbol`, ...) is ignored. Rows
/// whose date or close does not parse are skipped.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    directory: PathBuf,
    max_age: Option<Duration>,
    allow_stale: bool,
}

impl CsvFileSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            max_age: None,
            allow_stale: true,
        }
    }

    pub fn from_settings(settings: &DataSettings) -> Self {
        Self {
            directory: settings.directory.clone(),
            max_age: settings
                .max_age_hours
                .map(|h| Duration::from_secs(h * SECONDS_PER_HOUR)),
            allow_stale: settings.allow_stale,
        }
    }

    /// Files older than `max_age` are stale; they are still used only if
    /// `allow_stale` is set.
    pub fn with_staleness(mut self, max_age: Duration, allow_stale: bool) -> Self {
        self.max_age = Some(max_age);
        self.allow_stale = allow_stale;
        self
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.directory.join(format!("{}_daily.csv", symbol))
    }

    async fn check_age(&self, symbol: &str, path: &Path) -> Result<(), FeedError> {
        let Some(max_age) = self.max_age else {
            return Ok(());
        };
        let modified = tokio::fs::metadata(path).await?.modified()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age <= max_age {
            return Ok(());
        }

        let age_hours = age.as_secs() / SECONDS_PER_HOUR;
        let max_hours = max_age.as_secs() / SECONDS_PER_HOUR;
        if self.allow_stale {
            tracing::warn!(symbol, age_hours, max_hours, "using stale price file");
            Ok(())
        } else {
            Err(FeedError::Stale {
                symbol: symbol.to_string(),
                age_hours,
                max_hours,
            })
        }
    }
}

#[async_trait]
impl PriceSource for CsvFileSource {
    async fn fetch_daily(&self, symbol: &str) -> Result<PriceSeries, FeedError> {
        let path = self.path_for(symbol);
        if !tokio::fs::try_exists(&path).await? {
            return Err(FeedError::NotFound {
                symbol: symbol.to_string(),
                path,
            });
        }
        self.check_age(symbol, &path).await?;

        let bytes = tokio::fs::read(&path).await?;
        let series = parse_daily_csv(symbol, bytes.as_slice())?;
        tracing::info!(symbol, rows = series.len(), path = %path.display(), "loaded price file");
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "timestamp")]
    date: String,
    close: String,
    #[serde(default)]
    open: Option<String>,
    #[serde(default)]
    high: Option<String>,
    #[serde(default)]
    low: Option<String>,
}

/// Parses a daily price CSV into a date-ascending, de-duplicated series.
pub fn parse_daily_csv<R: std::io::Read>(
    symbol: &str,
    reader: R,
) -> Result<PriceSeries, FeedError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    for (column, aliases) in [("date", &["date", "timestamp"][..]), ("close", &["close"][..])] {
        if !headers.iter().any(|h| aliases.contains(&h)) {
            return Err(FeedError::MissingColumn {
                symbol: symbol.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<RawRow>() {
        let row = row?;
        let (Some(date), Some(close)) = (parse_date(&row.date), parse_number(&row.close)) else {
            skipped += 1;
            continue;
        };
        points.push(PricePoint {
            date,
            symbol: symbol.to_string(),
            close,
            open: row.open.as_deref().and_then(parse_number),
            high: row.high.as_deref().and_then(parse_number),
            low: row.low.as_deref().and_then(parse_number),
        });
    }

    // Stable sort, so the first row seen for a date wins.
    points.sort_by_key(|p| p.date);
    let before = points.len();
    points.dedup_by_key(|p| p.date);
    let duplicates = before - points.len();

    if skipped > 0 || duplicates > 0 {
        tracing::warn!(symbol, skipped, duplicates, "dropped unusable price rows");
    }

    Ok(PriceSeries::new(symbol, points)?)
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
