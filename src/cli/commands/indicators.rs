//! Indicator snapshot command.

use anyhow::Result;
use serde_json::json;
use tradedesk_client::TradingConsole;
use tradedesk_monitor::report;

use super::history::request;
use super::resolve_instrument;
use crate::cli::{emit, IndicatorArgs, OutputFormat};

pub async fn run(args: IndicatorArgs, console: &TradingConsole, output: OutputFormat) -> Result<()> {
    let request = request(console, args.duration.as_deref(), args.bar_size.as_deref())?;
    let contract = resolve_instrument(console, &args.instrument).await?;
    let series = console.history_with(&contract, &request).await?;
    let snapshot = console.indicators(&series);
    let period = console.engine().period();

    emit(
        output,
        report::indicators(&contract.label(), period, &snapshot),
        &json!({ "contract": contract.label(), "period": period, "bars": series.len(), "snapshot": snapshot }),
    )
}
