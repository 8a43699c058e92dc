//! CLI command implementations.

pub mod expiry;
pub mod history;
pub mod indicators;
pub mod order;
pub mod positions;
pub mod quote;
pub mod resolve;
pub mod symbol;
pub mod validate;

use anyhow::Result;
use tradedesk_client::TradingConsole;
use tradedesk_core::types::ResolvedContract;

use crate::cli::InstrumentArgs;

/// Resolve the instrument named on the command line.
pub(crate) async fn resolve_instrument(
    console: &TradingConsole,
    args: &InstrumentArgs,
) -> Result<ResolvedContract> {
    let contract = console
        .resolve_input(&args.kind, &args.symbol, args.expiration.as_deref(), args.quarter_offset)
        .await?;
    Ok(contract)
}
