//! Contract resolution command.

use anyhow::Result;
use tradedesk_client::TradingConsole;
use tradedesk_monitor::report;

use super::resolve_instrument;
use crate::cli::{emit, InstrumentArgs, OutputFormat};

pub async fn run(args: InstrumentArgs, console: &TradingConsole, output: OutputFormat) -> Result<()> {
    let contract = resolve_instrument(console, &args).await?;
    emit(output, report::contract(&contract), &contract)
}
