use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which transform produced a `DerivedSeries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SeriesKind {
    /// Close rebased to 100 at the symbol's first date in the table.
    GrowthIndex,
    /// Value of 100 invested at the first date of a chosen range.
    ReinvestmentIndex,
    /// Rolling sample standard deviation of daily returns, annualized.
    RollingVolatility { window: usize },
    /// Simple moving average of close.
    MovingAverage { period: usize },
}

impl SeriesKind {
    /// A short column label for tabular output.
    pub fn label(&self) -> String {
        match self {
            SeriesKind::GrowthIndex => "index".to_string(),
            SeriesKind::ReinvestmentIndex => "value_of_100".to_string(),
            SeriesKind::RollingVolatility { window } => format!("vol_{}d", window),
            SeriesKind::MovingAverage { period } => format!("ma_{}", period),
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::GrowthIndex => write!(f, "Growth index"),
            SeriesKind::ReinvestmentIndex => write!(f, "Reinvestment index"),
            SeriesKind::RollingVolatility { window } => {
                write!(f, "Rolling volatility ({} days)", window)
            }
            SeriesKind::MovingAverage { period } => write!(f, "Moving average ({})", period),
        }
    }
}
