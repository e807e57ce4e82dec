use analytics::CandleView;
use chrono::NaiveDate;
use comfy_table::{Table, presets::UTF8_FULL};
use core_types::DerivedSeries;
use std::collections::BTreeMap;

/// What a command produced, ready to be printed.
#[derive(Debug)]
pub enum Report {
    Series(DerivedSeries),
    Candles(CandleView),
}

pub fn to_json(report: &Report) -> serde_json::Result<String> {
    match report {
        Report::Series(series) => serde_json::to_string_pretty(series),
        Report::Candles(view) => serde_json::to_string_pretty(view),
    }
}

pub fn to_table(report: &Report) -> Table {
    match report {
        Report::Series(series) => series_table(series),
        Report::Candles(view) => candle_table(view),
    }
}

fn series_table(series: &DerivedSeries) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["date".to_string(), "symbol".to_string(), series.kind.label()]);
    for point in series.iter() {
        table.add_row(vec![
            point.date.to_string(),
            point.symbol.clone(),
            format!("{:.4}", point.value),
        ]);
    }
    table
}

fn candle_table(view: &CandleView) -> Table {
    // date -> value, one map per moving average column
    let averages: Vec<BTreeMap<NaiveDate, f64>> = view
        .moving_averages
        .iter()
        .map(|ma| ma.iter().map(|p| (p.date, p.value)).collect())
        .collect();

    let mut header: Vec<String> = ["date", "open", "high", "low", "close"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    header.extend(view.moving_averages.iter().map(|ma| ma.kind.label()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    for candle in &view.window.candles {
        let mut row = vec![
            candle.date.to_string(),
            format!("{:.2}", candle.open),
            format!("{:.2}", candle.high),
            format!("{:.2}", candle.low),
            format!("{:.2}", candle.close),
        ];
        row.extend(averages.iter().map(|ma| {
            ma.get(&candle.date)
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default()
        }));
        table.add_row(row);
    }
    table
}
