//! # Ticker Lens Analytics Engine
//!
//! This crate turns a table of daily prices into the derived series the
//! dashboard plots: a growth index, a "$100 invested at range start" index,
//! rolling annualized volatility, and candlestick windows with moving averages.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It performs no I/O and has
//!   no knowledge of where prices come from. It depends on `core-types` for
//!   its data model and on `configuration` for engine defaults.
//! - **Stateless Calculation:** Every transform is a function of its inputs.
//!   Nothing is cached or mutated between calls, and "today" is always passed
//!   in rather than read from the clock.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: applies configured defaults (window, look-backs, MA
//!   periods) on top of the free transform functions.
//! - `growth_index`, `reinvestment_index`, `rolling_volatility`,
//!   `moving_average`, `candle_window`: the transforms themselves.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod candles;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod growth;
pub mod moving_average;
pub mod reinvest;
pub mod volatility;

// Re-export the key components to create a clean, public-facing API.
pub use candles::{CandleWindow, candle_window};
pub use engine::{AnalysisRequest, AnalyticsEngine, CandleView};
pub use error::AnalyticsError;
pub use growth::{INDEX_BASE, growth_index};
pub use moving_average::moving_average;
pub use reinvest::reinvestment_index;
pub use volatility::{DEFAULT_WINDOW, ReturnWindow, TRADING_DAYS_PER_YEAR, rolling_volatility};
