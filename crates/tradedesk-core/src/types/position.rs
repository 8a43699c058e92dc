//! Position types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ContractMonth;

/// An open position as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerPosition {
    /// Root symbol
    pub symbol: String,
    /// Exchange-local symbol
    pub local_symbol: String,
    /// Broker security type (e.g. `STK`, `FUT`)
    pub sec_type: String,
    /// Contract month for futures, when the broker reports one
    pub contract_month: Option<ContractMonth>,
    /// Signed quantity (negative for short)
    pub quantity: Decimal,
    pub average_cost: Decimal,
}

impl BrokerPosition {
    /// Label shown in the positions table, e.g. `ESZ4 (FUT)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.local_symbol, self.sec_type)
    }
}

/// A held instrument with its live price attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub contract_label: String,
    /// Number of shares or contracts (positive for long, negative for short)
    pub quantity: Decimal,
    pub average_cost: Decimal,
    /// Last price, or `None` when no quote could be fetched
    pub current_price: Option<f64>,
}

impl Position {
    /// Check if this is a long position.
    pub fn is_long(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Check if this is a short position.
    pub fn is_short(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    /// Get the absolute quantity.
    pub fn abs_quantity(&self) -> Decimal {
        self.quantity.abs()
    }

    /// Direction label for reports.
    pub fn direction(&self) -> &'static str {
        if self.is_long() {
            "LONG"
        } else if self.is_short() {
            "SHORT"
        } else {
            "FLAT"
        }
    }
}

/// Positions held at refresh time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "positions", rename_all = "snake_case")]
pub enum PositionSummary {
    /// The account holds nothing
    NoPositions,
    /// One row per held instrument that could be resolved
    Held(Vec<Position>),
}

impl PositionSummary {
    /// Get the rows, empty when nothing is held.
    pub fn positions(&self) -> &[Position] {
        match self {
            PositionSummary::NoPositions => &[],
            PositionSummary::Held(positions) => positions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions().is_empty()
    }
}

impl fmt::Display for PositionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSummary::NoPositions => write!(f, "No positions currently held."),
            PositionSummary::Held(positions) => write!(f, "{} position(s)", positions.len()),
        }
    }
}
