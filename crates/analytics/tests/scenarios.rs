use analytics::{
    AnalysisRequest, AnalyticsEngine, AnalyticsError, DEFAULT_WINDOW, growth_index,
    reinvestment_index, rolling_volatility,
};
use chrono::{Duration, NaiveDate};
use core_types::{DateRange, PricePoint, PriceSeries, PriceTable};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
}

fn table_of(symbol: &str, closes: &[f64]) -> PriceTable {
    let series = PriceSeries::from_closes(
        symbol,
        closes.iter().enumerate().map(|(i, c)| (day(i as i64), *c)),
    )
    .unwrap();
    let mut table = PriceTable::new();
    table.insert(series).unwrap();
    table
}

#[test]
fn thirty_up_days_give_one_volatility_point() {
    // 31 closes: 100, 101, ..., 130, i.e. 30 consecutive +1 moves.
    let closes: Vec<f64> = (0..=30).map(|i| 100.0 + i as f64).collect();
    let table = table_of("X", &closes);

    let out = rolling_volatility(&table, &["X"], &DateRange::unbounded(), DEFAULT_WINDOW).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out.points[0].date, day(30));

    let returns: Vec<f64> = (0..30).map(|i| 1.0 / (100.0 + i as f64)).collect();
    let mean = returns.iter().sum::<f64>() / 30.0;
    let variance = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / 29.0;
    let expected = variance.sqrt() * 252f64.sqrt();

    assert!((out.points[0].value - expected).abs() < 1e-12);
}

#[test]
fn thirty_closes_are_not_enough_for_a_thirty_day_window() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let out = rolling_volatility(&table_of("X", &closes), &["X"], &DateRange::unbounded(), 30)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn two_symbols_normalize_independently() {
    let table = PriceTable::from_points(vec![
        PricePoint::new("AAPL", day(0), 150.0),
        PricePoint::new("AAPL", day(1), 160.0),
        PricePoint::new("MSFT", day(0), 300.0),
        PricePoint::new("MSFT", day(1), 270.0),
    ])
    .unwrap();

    let out = growth_index(&table, &["AAPL", "MSFT"]).unwrap();
    let aapl = out.values_for("AAPL");
    let msft = out.values_for("MSFT");

    assert_eq!(aapl.len(), 2);
    assert_eq!(aapl[0], 100.0);
    assert!((aapl[1] - 106.667).abs() < 1e-3);
    assert_eq!(msft[0], 100.0);
    assert!((msft[1] - 90.0).abs() < 1e-9);
}

#[test]
fn reinvestment_from_second_date() {
    let table = table_of("X", &[100.0, 110.0, 121.0]);
    let out = reinvestment_index(&table, &["X"], &DateRange::new(Some(day(1)), None)).unwrap();

    let values = out.values_for("X");
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], 100.0);
    assert!((values[1] - 110.0).abs() < 1e-9);
}

#[test]
fn absent_symbol_is_reported_by_every_transform() {
    let table = table_of("AAPL", &[1.0, 2.0, 3.0]);
    let unknown = AnalyticsError::UnknownSymbol("ZZZ".to_string());

    assert_eq!(growth_index(&table, &["ZZZ"]).unwrap_err(), unknown);
    assert_eq!(
        reinvestment_index(&table, &["ZZZ"], &DateRange::unbounded()).unwrap_err(),
        unknown
    );
    assert_eq!(
        rolling_volatility(&table, &["ZZZ"], &DateRange::unbounded(), 2).unwrap_err(),
        unknown
    );

    let engine = AnalyticsEngine::default();
    let request = AnalysisRequest::new(vec!["ZZZ".to_string()]);
    assert_eq!(engine.growth(&table, &request).unwrap_err(), unknown);
}

#[test]
fn transforms_share_a_table_across_threads() {
    let closes: Vec<f64> = (0..200).map(|i| 50.0 + (i as f64 * 0.37).sin() * 5.0).collect();
    let table = table_of("X", &closes);
    let engine = AnalyticsEngine::default();

    std::thread::scope(|s| {
        let growth = s.spawn(|| growth_index(&table, &["X"]).unwrap());
        let vol = s.spawn(|| {
            let request = AnalysisRequest::new(vec![])
                .with_range(DateRange::unbounded())
                .with_window(20);
            engine.volatility(&table, &request, day(199)).unwrap()
        });
        assert_eq!(growth.join().unwrap().len(), 200);
        assert_eq!(vol.join().unwrap().len(), 180);
    });
}
