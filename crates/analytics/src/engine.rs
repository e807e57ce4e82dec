use crate::candles::{CandleWindow, candle_window, resolve_range};
use crate::error::AnalyticsError;
use crate::grouping::{select_series, trailing_range};
use crate::growth::growth_index;
use crate::moving_average::moving_average;
use crate::reinvest::reinvestment_index;
use crate::volatility::rolling_volatility;
use chrono::NaiveDate;
use configuration::AnalyticsSettings;
use core_types::{DateRange, DerivedSeries, PriceTable};
use serde::Serialize;

/// Parameters shared by the multi-symbol transforms.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Tickers to include. Empty means every symbol in the table.
    pub symbols: Vec<String>,
    pub range: DateRange,
    /// Rolling volatility window; the configured default when `None`.
    pub window: Option<usize>,
}

impl AnalysisRequest {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = Some(window);
        self
    }
}

/// Candlesticks for one symbol plus the moving averages drawn over them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleView {
    pub window: CandleWindow,
    pub moving_averages: Vec<DerivedSeries>,
}

/// A stateless calculator that turns a `PriceTable` into derived series.
///
/// The engine only carries settings; every call receives its own immutable
/// table, so one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: AnalyticsSettings,
}

impl AnalyticsEngine {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Growth index anchored at each symbol's first date in the table.
    ///
    /// The request range only filters which points are returned.
    pub fn growth(
        &self,
        table: &PriceTable,
        request: &AnalysisRequest,
    ) -> Result<DerivedSeries, AnalyticsError> {
        let series = growth_index(table, &request.symbols)?;
        Ok(series.retain_range(&request.range))
    }

    /// Value of 100 invested at the start of the request range.
    pub fn reinvestment(
        &self,
        table: &PriceTable,
        request: &AnalysisRequest,
    ) -> Result<DerivedSeries, AnalyticsError> {
        reinvestment_index(table, &request.symbols, &request.range)
    }

    /// Rolling annualized volatility.
    ///
    /// An unbounded request range falls back to the configured trailing
    /// look-back ending at `today` or the last available date.
    pub fn volatility(
        &self,
        table: &PriceTable,
        request: &AnalysisRequest,
        today: NaiveDate,
    ) -> Result<DerivedSeries, AnalyticsError> {
        let window = self.check_window(request.window)?;

        let range = if request.range.is_unbounded() {
            self.default_volatility_range(table, &request.symbols, today)?
        } else {
            request.range
        };
        tracing::debug!(window, ?range, "computing rolling volatility");

        rolling_volatility(table, &request.symbols, &range, window)
    }

    /// Candlestick rows and moving averages for a single symbol.
    pub fn candles(
        &self,
        table: &PriceTable,
        symbol: &str,
        range: &DateRange,
        today: NaiveDate,
    ) -> Result<CandleView, AnalyticsError> {
        let series = table
            .get(symbol)
            .ok_or_else(|| AnalyticsError::UnknownSymbol(symbol.to_string()))?;

        let Some((start, end)) =
            resolve_range(series, range, today, self.settings.candle_lookback_days)
        else {
            return Err(AnalyticsError::EmptySeries(symbol.to_string()));
        };

        let window = candle_window(series, start, end)?;
        let points = series.between(start, end);
        let moving_averages = self
            .settings
            .ma_periods
            .iter()
            .map(|&period| moving_average(symbol, points, period))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CandleView {
            window,
            moving_averages,
        })
    }

    /// Resolves the requested window against the configured bounds.
    pub fn check_window(&self, window: Option<usize>) -> Result<usize, AnalyticsError> {
        let window = window.unwrap_or(self.settings.volatility_window);
        let (min, max) = (self.settings.min_window.max(2), self.settings.max_window);
        if window < min || window > max {
            return Err(AnalyticsError::InvalidWindow(format!(
                "window {} is outside {}..={}",
                window, min, max
            )));
        }
        Ok(window)
    }

    fn default_volatility_range(
        &self,
        table: &PriceTable,
        symbols: &[String],
        today: NaiveDate,
    ) -> Result<DateRange, AnalyticsError> {
        let selected = select_series(table, symbols)?;
        let first = selected.iter().filter_map(|s| s.first_date()).min();
        let last = selected.iter().filter_map(|s| s.last_date()).max();
        Ok(match (first, last) {
            (Some(first), Some(last)) => {
                let (start, end) =
                    trailing_range(first, last, today, self.settings.volatility_lookback_days);
                DateRange::between(start, end)
            }
            _ => DateRange::unbounded(),
        })
    }
}
