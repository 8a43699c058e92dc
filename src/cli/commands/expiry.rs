//! Quarterly expiration command.

use anyhow::Result;
use chrono::Local;
use tradedesk_core::expiration::next_quarterly_expiration;
use tradedesk_core::types::ContractMonth;
use tradedesk_monitor::report;

use crate::cli::{emit, ExpiryArgs, OutputFormat};

pub async fn run(args: ExpiryArgs, output: OutputFormat) -> Result<()> {
    let reference = args.date.unwrap_or_else(|| Local::now().date_naive());
    let months: Vec<ContractMonth> = (0..args.count)
        .map(|offset| next_quarterly_expiration(reference, offset))
        .collect();

    emit(output, report::expirations(&months), &months)
}
