//! Market order command.

use anyhow::Result;
use tradedesk_client::TradingConsole;
use tradedesk_monitor::report;

use super::resolve_instrument;
use crate::cli::{emit, OrderArgs, OutputFormat};

pub async fn run(args: OrderArgs, console: &TradingConsole, output: OutputFormat) -> Result<()> {
    let contract = resolve_instrument(console, &args.instrument).await?;
    let trade = console.submit_order(&contract, &args.action, args.quantity).await?;
    emit(output, report::trade(&trade), &trade)
}
