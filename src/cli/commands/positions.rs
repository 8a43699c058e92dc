//! Positions command.

use anyhow::Result;
use tradedesk_client::TradingConsole;
use tradedesk_monitor::report;

use crate::cli::{emit, OutputFormat};

pub async fn run(console: &TradingConsole, output: OutputFormat) -> Result<()> {
    let summary = console.positions().await?;
    emit(output, report::positions(&summary), &summary)
}
