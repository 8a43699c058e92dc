//! Historical bars command.

use anyhow::{anyhow, Result};
use tradedesk_client::TradingConsole;
use tradedesk_core::types::{BarSize, HistoryRequest, HistoryWindow};
use tradedesk_monitor::report;

use super::resolve_instrument;
use crate::cli::{emit, HistoryArgs, OutputFormat};

/// Configured defaults with command-line overrides applied.
pub(crate) fn request(
    console: &TradingConsole,
    duration: Option<&str>,
    bar_size: Option<&str>,
) -> Result<HistoryRequest> {
    let mut request = *console.history_defaults();
    if let Some(duration) = duration {
        request.window = duration.parse::<HistoryWindow>().map_err(|e| anyhow!(e))?;
    }
    if let Some(bar_size) = bar_size {
        request.bar_size = bar_size.parse::<BarSize>().map_err(|e| anyhow!(e))?;
    }
    Ok(request)
}

pub async fn run(args: HistoryArgs, console: &TradingConsole, output: OutputFormat) -> Result<()> {
    let request = request(console, args.duration.as_deref(), args.bar_size.as_deref())?;
    let contract = resolve_instrument(console, &args.instrument).await?;
    let series = console.history_with(&contract, &request).await?;

    emit(output, report::history(&series, args.limit), &series.bars())
}
