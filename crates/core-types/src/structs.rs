use crate::enums::SeriesKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily observation for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub symbol: String,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
}

impl PricePoint {
    /// Creates a close-only observation.
    pub fn new(symbol: impl Into<String>, date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            close,
            open: None,
            high: None,
            low: None,
        }
    }

    /// Creates a full OHLC observation.
    pub fn with_ohlc(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            close,
            open: Some(open),
            high: Some(high),
            low: Some(low),
        }
    }

    /// Checks `low <= open, close <= high` for whichever bounds are present.
    ///
    /// Comparisons are written so that a NaN anywhere fails the check.
    pub fn has_consistent_ohlc(&self) -> bool {
        let within = |v: f64| {
            self.low.is_none_or(|low| low <= v) && self.high.is_none_or(|high| v <= high)
        };
        let range_ok = match (self.low, self.high) {
            (Some(low), Some(high)) => low <= high,
            _ => true,
        };
        range_ok && within(self.close) && self.open.is_none_or(within)
    }

    /// Returns the candle for this point if open, high and low are all present.
    pub fn candle(&self) -> Option<Candle> {
        Some(Candle {
            date: self.date,
            open: self.open?,
            high: self.high?,
            low: self.low?,
            close: self.close,
        })
    }
}

/// One OHLC row of a candlestick view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Optional calendar bounds used to clip a computation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A range that places no bound on either side.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// Clamps the bounds to `[first, last]`, filling missing bounds from it.
    ///
    /// Returns `None` when the clamped start falls after the clamped end.
    pub fn clamp_to(&self, first: NaiveDate, last: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.start.map_or(first, |s| s.max(first));
        let end = self.end.map_or(last, |e| e.min(last));
        (start <= end).then_some((start, end))
    }
}

/// One value of a derived series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub date: NaiveDate,
    pub symbol: String,
    pub value: f64,
}

/// The output of any transform: `(date, symbol, value)` rows grouped by
/// symbol in request order, each group ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub kind: SeriesKind,
    pub points: Vec<DerivedPoint>,
}

impl DerivedSeries {
    pub fn new(kind: SeriesKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, date: NaiveDate, symbol: &str, value: f64) {
        self.points.push(DerivedPoint {
            date,
            symbol: symbol.to_string(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DerivedPoint> {
        self.points.iter()
    }

    /// All points belonging to `symbol`, in date order.
    pub fn for_symbol<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a DerivedPoint> {
        self.points.iter().filter(move |p| p.symbol == symbol)
    }

    /// Just the values for `symbol`, in date order.
    pub fn values_for(&self, symbol: &str) -> Vec<f64> {
        self.for_symbol(symbol).map(|p| p.value).collect()
    }

    /// Drops every point whose date lies outside `range`.
    pub fn retain_range(mut self, range: &DateRange) -> Self {
        self.points.retain(|p| range.contains(p.date));
        self
    }
}
