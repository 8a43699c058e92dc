//! Symbol validation command.

use anyhow::{bail, Result};
use serde_json::json;
use tradedesk_client::TradingConsole;
use tradedesk_monitor::report;

use crate::cli::{emit, OutputFormat, ValidateArgs};

pub async fn run(args: ValidateArgs, console: &TradingConsole, output: OutputFormat) -> Result<()> {
    let (valid, reason) = console.validate(&args.kind, &args.symbol).await;

    emit(
        output,
        report::validation(&args.symbol, valid, &reason),
        &json!({ "symbol": &args.symbol, "valid": valid, "reason": &reason }),
    )?;

    if !valid {
        bail!("{}", reason);
    }
    Ok(())
}
