//! Quarterly futures expiration arithmetic.

use chrono::{Datelike, NaiveDate};

use crate::types::ContractMonth;

/// Standard futures expiry months: March, June, September, December.
pub const QUARTERLY_MONTHS: [u32; 4] = [3, 6, 9, 12];

/// Next quarterly expiration month on or after `reference`, skipping `offset` quarters.
///
/// A reference date inside a quarterly month selects that same month: on
/// 2024-03-01 the front contract is still `202403`.
pub fn next_quarterly_expiration(reference: NaiveDate, offset: u32) -> ContractMonth {
    let mut year = reference.year();
    let index = match QUARTERLY_MONTHS
        .iter()
        .position(|&month| reference.month() <= month)
    {
        Some(index) => index,
        None => {
            year += 1;
            0
        }
    };

    let steps = index as u64 + u64::from(offset);
    let year = year + (steps / 4) as i32;
    let month = QUARTERLY_MONTHS[(steps % 4) as usize];

    ContractMonth::quarterly(year, month)
}
