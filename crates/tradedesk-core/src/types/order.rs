//! Market orders and trade handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ResolvedContract;
use crate::error::OrderError;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(OrderError::InvalidSide(s.to_string())),
        }
    }
}

/// A validated market order for a resolved contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrder {
    contract: ResolvedContract,
    side: Side,
    quantity: u64,
}

impl MarketOrder {
    /// Create a market order, rejecting non-positive quantities.
    pub fn new(contract: ResolvedContract, side: Side, quantity: i64) -> Result<Self, OrderError> {
        let quantity = Self::check_quantity(quantity)?;
        Ok(Self {
            contract,
            side,
            quantity,
        })
    }

    /// Parse a side label and quantity from user input.
    pub fn parse(contract: ResolvedContract, side: &str, quantity: i64) -> Result<Self, OrderError> {
        let quantity = Self::check_quantity(quantity)?;
        let side: Side = side.parse()?;
        Ok(Self {
            contract,
            side,
            quantity,
        })
    }

    fn check_quantity(quantity: i64) -> Result<u64, OrderError> {
        u64::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(OrderError::InvalidQuantity(quantity))
    }

    pub fn contract(&self) -> &ResolvedContract {
        &self.contract
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

/// Order status as reported by the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    /// Order created but not yet transmitted
    PendingSubmit,
    /// Order accepted by the broker but not yet working at the exchange
    PreSubmitted,
    /// Order working at the exchange
    Submitted,
    /// Order completely filled
    Filled,
    /// Order canceled
    Cancelled,
    /// Order rejected or otherwise inactive
    Inactive,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeStatus::PendingSubmit => "PendingSubmit",
            TradeStatus::PreSubmitted => "PreSubmitted",
            TradeStatus::Submitted => "Submitted",
            TradeStatus::Filled => "Filled",
            TradeStatus::Cancelled => "Cancelled",
            TradeStatus::Inactive => "Inactive",
        };
        write!(f, "{}", s)
    }
}

/// Handle for a submitted order, carrying the status at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Broker order identifier
    pub order_id: String,
    pub contract: ResolvedContract,
    pub side: Side,
    pub quantity: u64,
    pub status: TradeStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Trade {
    /// Create a trade handle for an order.
    pub fn new(order_id: impl Into<String>, order: &MarketOrder, status: TradeStatus) -> Self {
        Self {
            order_id: order_id.into(),
            contract: order.contract.clone(),
            side: order.side,
            quantity: order.quantity,
            status,
            submitted_at: Utc::now(),
        }
    }
}
