//! CLI definitions.

pub mod commands;
mod session;

pub use session::open_console;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tradedesk")]
#[command(author, version, about = "Broker-session trading console")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print `text`, or `value` as JSON.
pub fn emit<T: Serialize>(output: OutputFormat, text: String, value: &T) -> Result<()> {
    match output {
        OutputFormat::Text => print!("{}", text),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that a symbol names a tradable instrument
    Validate(ValidateArgs),
    /// Resolve an instrument to a broker contract
    Resolve(InstrumentArgs),
    /// Fetch a bid/ask/last quote
    Quote(InstrumentArgs),
    /// Fetch historical bars
    History(HistoryArgs),
    /// Compute SMA, EMA, VWAP and RSI over historical bars
    Indicators(IndicatorArgs),
    /// List open positions with current prices
    Positions,
    /// Submit a market order
    Order(OrderArgs),
    /// Show upcoming quarterly futures expirations
    Expiry(ExpiryArgs),
    /// Validate configuration
    ValidateConfig(ValidateConfigArgs),
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Instrument kind (Stock or Future)
    #[arg(short, long, default_value = "Stock")]
    pub kind: String,

    /// Ticker symbol
    #[arg(allow_hyphen_values = true)]
    pub symbol: String,
}

#[derive(clap::Args, Clone)]
pub struct InstrumentArgs {
    /// Instrument kind (Stock or Future)
    #[arg(short, long, default_value = "Stock")]
    pub kind: String,

    /// Ticker symbol
    pub symbol: String,

    /// Futures contract month (YYYYMM)
    #[arg(short, long)]
    pub expiration: Option<String>,

    /// Quarters past the front month, when no expiration is given
    #[arg(short, long, default_value = "0")]
    pub quarter_offset: u32,
}

#[derive(clap::Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Lookback window (e.g. "1 D", "5 days", "1 M")
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Bar size (e.g. "1 min", "5 mins", "1 day")
    #[arg(short, long)]
    pub bar_size: Option<String>,

    /// Number of most recent bars to print
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

#[derive(clap::Args)]
pub struct IndicatorArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Lookback window (e.g. "1 D", "5 days", "1 M")
    #[arg(short, long)]
    pub duration: Option<String>,

    /// Bar size (e.g. "1 min", "5 mins", "1 day")
    #[arg(short, long)]
    pub bar_size: Option<String>,
}

#[derive(clap::Args)]
pub struct OrderArgs {
    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// BUY or SELL
    #[arg(short, long)]
    pub action: String,

    /// Number of shares or contracts
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub quantity: i64,
}

#[derive(clap::Args)]
pub struct ValidateConfigArgs {
    /// Print the effective configuration, environment overrides included
    #[arg(long)]
    pub print: bool,
}

#[derive(clap::Args)]
pub struct ExpiryArgs {
    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Number of quarterly months to list
    #[arg(short = 'n', long, default_value = "4")]
    pub count: u32,
}
