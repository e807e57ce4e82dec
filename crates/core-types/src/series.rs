use crate::error::CoreError;
use crate::structs::PricePoint;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A date-ordered run of observations for exactly one symbol.
///
/// Dates are strictly increasing. Non-trading days are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from points that are already in ascending date order.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        for point in &points {
            Self::check_point(&symbol, point)?;
        }
        for pair in points.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(CoreError::DuplicateDate {
                    symbol,
                    date: pair[1].date,
                });
            }
            if pair[1].date < pair[0].date {
                return Err(CoreError::Unordered {
                    symbol,
                    date: pair[1].date,
                });
            }
        }
        Ok(Self { symbol, points })
    }

    /// Sorts `points` by date before building the series.
    pub fn from_unsorted(
        symbol: impl Into<String>,
        mut points: Vec<PricePoint>,
    ) -> Result<Self, CoreError> {
        points.sort_by_key(|p| p.date);
        Self::new(symbol, points)
    }

    /// Convenience constructor for close-only data, mostly used by tests and demos.
    pub fn from_closes(
        symbol: impl Into<String>,
        closes: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        let points = closes
            .into_iter()
            .map(|(date, close)| PricePoint::new(symbol.clone(), date, close))
            .collect();
        Self::new(symbol, points)
    }

    fn check_point(symbol: &str, point: &PricePoint) -> Result<(), CoreError> {
        if point.symbol != symbol {
            return Err(CoreError::SymbolMismatch {
                expected: symbol.to_string(),
                found: point.symbol.clone(),
            });
        }
        if !point.has_consistent_ohlc() {
            return Err(CoreError::InvalidOhlc {
                symbol: symbol.to_string(),
                date: point.date,
            });
        }
        Ok(())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|p| p.date)
    }

    /// The points dated within `[start, end]`, inclusive on both sides.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> &[PricePoint] {
        let lo = self.points.partition_point(|p| p.date < start);
        let hi = self.points.partition_point(|p| p.date <= end);
        if lo >= hi { &[] } else { &self.points[lo..hi] }
    }
}

/// The union of all requested tickers' series, keyed by symbol.
///
/// Iteration is ordered by symbol so derived output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceTable {
    series: BTreeMap<String, PriceSeries>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups long-format rows (one per symbol per day) into per-symbol series.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Result<Self, CoreError> {
        let mut grouped: BTreeMap<String, Vec<PricePoint>> = BTreeMap::new();
        for point in points {
            grouped.entry(point.symbol.clone()).or_default().push(point);
        }
        let mut table = Self::new();
        for (symbol, rows) in grouped {
            table.insert(PriceSeries::from_unsorted(symbol, rows)?)?;
        }
        Ok(table)
    }

    /// Adds a series, replacing and returning any previous series for that symbol.
    pub fn insert(&mut self, series: PriceSeries) -> Result<Option<PriceSeries>, CoreError> {
        if series.is_empty() {
            return Err(CoreError::EmptySeries(series.symbol));
        }
        Ok(self.series.insert(series.symbol.clone(), series))
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.series.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceSeries> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Earliest date across every symbol.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.iter().filter_map(PriceSeries::first_date).min()
    }

    /// Latest date across every symbol.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.iter().filter_map(PriceSeries::last_date).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[fixture]
    fn aapl() -> PriceSeries {
        PriceSeries::from_closes("AAPL", [(d(2), 10.0), (d(3), 11.0), (d(5), 12.0), (d(8), 13.0)])
            .unwrap()
    }

    #[test]
    fn test_new_rejects_unordered_dates() {
        let err = PriceSeries::from_closes("AAPL", [(d(3), 1.0), (d(2), 1.0)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::Unordered {
                symbol: "AAPL".to_string(),
                date: d(2)
            }
        );
    }

    #[test]
    fn test_from_unsorted_rejects_duplicates() {
        let points = vec![
            PricePoint::new("AAPL", d(3), 1.0),
            PricePoint::new("AAPL", d(2), 1.0),
            PricePoint::new("AAPL", d(3), 2.0),
        ];
        let err = PriceSeries::from_unsorted("AAPL", points).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateDate { date, .. } if date == d(3)));
    }

    #[test]
    fn test_new_rejects_foreign_symbol() {
        let points = vec![PricePoint::new("MSFT", d(2), 1.0)];
        let err = PriceSeries::new("AAPL", points).unwrap_err();
        assert!(matches!(err, CoreError::SymbolMismatch { .. }));
    }

    #[rstest]
    #[case(d(3), d(5), vec![11.0, 12.0])]
    #[case(d(4), d(7), vec![12.0])]
    #[case(d(1), d(31), vec![10.0, 11.0, 12.0, 13.0])]
    #[case(d(6), d(7), vec![])]
    #[case(d(8), d(2), vec![])]
    fn test_between(
        aapl: PriceSeries,
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: Vec<f64>,
    ) {
        let closes: Vec<f64> = aapl.between(start, end).iter().map(|p| p.close).collect();
        assert_eq!(closes, expected);
    }

    #[test]
    fn test_table_groups_long_format_rows() {
        let rows = vec![
            PricePoint::new("MSFT", d(3), 301.0),
            PricePoint::new("AAPL", d(3), 151.0),
            PricePoint::new("MSFT", d(2), 300.0),
            PricePoint::new("AAPL", d(2), 150.0),
        ];
        let table = PriceTable::from_points(rows).unwrap();
        assert_eq!(table.symbols().collect::<Vec<_>>(), vec!["AAPL", "MSFT"]);
        let msft = table.get("MSFT").unwrap();
        assert_eq!(msft.first_date(), Some(d(2)));
        assert_eq!(msft.last().unwrap().close, 301.0);
        assert_eq!(table.first_date(), Some(d(2)));
        assert_eq!(table.last_date(), Some(d(3)));
    }

    #[test]
    fn test_table_rejects_empty_series() {
        let mut table = PriceTable::new();
        let empty = PriceSeries::new("AAPL", Vec::new()).unwrap();
        assert_eq!(
            table.insert(empty).unwrap_err(),
            CoreError::EmptySeries("AAPL".to_string())
        );
    }

    #[rstest]
    fn test_insert_replaces_existing(aapl: PriceSeries) {
        let mut table = PriceTable::new();
        assert!(table.insert(aapl.clone()).unwrap().is_none());
        let replaced = table.insert(aapl).unwrap();
        assert!(replaced.is_some());
        assert_eq!(table.len(), 1);
    }
}
