//! Core data types for the trading console.

mod instrument;
mod ohlcv;
mod order;
mod position;
mod quote;
mod timeframe;

pub use instrument::{
    ContractDescriptor, ContractMonth, InstrumentKind, InstrumentSpec, ResolvedContract,
};
pub use ohlcv::{Bar, BarRecord, BarSeries};
pub use order::{MarketOrder, Side, Trade, TradeStatus};
pub use position::{BrokerPosition, Position, PositionSummary};
pub use quote::{Quote, QuoteSnapshot};
pub use timeframe::{BarSize, HistoryRequest, HistoryWindow, WhatToShow, WindowUnit};
