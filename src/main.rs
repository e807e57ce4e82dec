use analytics::{AnalysisRequest, AnalyticsEngine};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use configuration::{LogFormat, init_tracing, load_config};
use core_types::DateRange;
use price_feed::{CsvFileSource, load_table};
use std::path::PathBuf;

mod output;

/// The main entry point for the Ticker Lens analytics tool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = init_tracing(&config.logging)?;

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let source = CsvFileSource::from_settings(&config.data);
    let engine = AnalyticsEngine::new(config.analytics.clone());
    tracing::debug!(?today, directory = %config.data.directory.display(), "starting");

    // Execute the appropriate command
    let report = match cli.command {
        Commands::Growth(args) => {
            let symbols = args.symbols_or(&config.data.default_tickers);
            let table = load_table(&source, &symbols).await?;
            let series = engine.growth(&table, &args.request(symbols))?;
            output::Report::Series(series)
        }
        Commands::Invest(args) => {
            let symbols = args.symbols_or(&config.data.default_tickers);
            let table = load_table(&source, &symbols).await?;
            let series = engine.reinvestment(&table, &args.request(symbols))?;
            output::Report::Series(series)
        }
        Commands::Volatility(args) => {
            let symbols = args.series.symbols_or(&config.data.default_tickers);
            let table = load_table(&source, &symbols).await?;
            let mut request = args.series.request(symbols);
            request.window = args.window;
            let series = engine.volatility(&table, &request, today)?;
            output::Report::Series(series)
        }
        Commands::Candles(args) => {
            let symbol = match args.symbol {
                Some(symbol) => symbol,
                None => config
                    .data
                    .default_tickers
                    .first()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("no ticker given and none configured"))?,
            };
            let table = load_table(&source, std::slice::from_ref(&symbol)).await?;
            let range = DateRange::new(args.from, args.to);
            let view = engine.candles(&table, &symbol, &range, today)?;
            output::Report::Candles(view)
        }
    };

    if cli.json {
        println!("{}", output::to_json(&report)?);
    } else {
        println!("{}", output::to_table(&report));
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore historical daily prices: growth of $100, rolling volatility and candlesticks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    /// Override the configured log line format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Treat this date as today when choosing default ranges (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index each ticker to 100 at its first available date.
    Growth(SeriesArgs),
    /// Value of $100 invested at the start of the chosen range.
    Invest(SeriesArgs),
    /// Rolling annualized volatility of daily returns.
    Volatility(VolatilityArgs),
    /// Candlesticks with moving averages for a single ticker.
    Candles(CandleArgs),
}

#[derive(Args)]
struct SeriesArgs {
    /// Comma-separated tickers (e.g., "AAPL,MSFT"). Defaults to the configured list.
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Start of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl SeriesArgs {
    fn symbols_or(&self, defaults: &[String]) -> Vec<String> {
        if self.symbols.is_empty() {
            defaults.to_vec()
        } else {
            self.symbols.clone()
        }
    }

    fn request(&self, symbols: Vec<String>) -> AnalysisRequest {
        AnalysisRequest::new(symbols).with_range(DateRange::new(self.from, self.to))
    }
}

#[derive(Args)]
struct VolatilityArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Rolling window in trading days. Defaults to the configured window.
    #[arg(long)]
    window: Option<usize>,
}

#[derive(Args)]
struct CandleArgs {
    /// The ticker to chart. Defaults to the first configured ticker.
    #[arg(long)]
    symbol: Option<String>,

    /// Start of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}
