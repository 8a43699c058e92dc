//! Scripted broker session for unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tradedesk_core::error::SessionError;
use tradedesk_core::traits::{BrokerSession, MarketDataMode};
use tradedesk_core::types::{
    BarRecord, BrokerPosition, ContractDescriptor, ContractMonth, HistoryRequest, InstrumentKind,
    MarketOrder, QuoteSnapshot, ResolvedContract, Trade, TradeStatus,
};

/// Per-operation call counters.
#[derive(Default)]
pub struct Calls {
    pub qualify: AtomicUsize,
    pub quote: AtomicUsize,
    pub bars: AtomicUsize,
    pub positions: AtomicUsize,
    pub orders: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        [&self.qualify, &self.quote, &self.bars, &self.positions, &self.orders]
            .iter()
            .map(|c| Self::get(c))
            .sum()
    }
}

/// Session whose answers are fixed up front.
///
/// Quotes are served from a queue; once it runs dry the fallback is returned
/// for every further request.
#[derive(Default)]
pub struct ScriptedSession {
    pub calls: Calls,
    listings: Vec<ResolvedContract>,
    qualify_error: Option<SessionError>,
    quotes: Mutex<VecDeque<Result<QuoteSnapshot, SessionError>>>,
    fallback_quote: Option<QuoteSnapshot>,
    bars: Option<Result<Vec<BarRecord>, SessionError>>,
    positions: Vec<BrokerPosition>,
    order_error: Option<SessionError>,
    mode_error: Option<SessionError>,
    modes: Mutex<Vec<MarketDataMode>>,
    disconnects: AtomicUsize,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, contract: ResolvedContract) -> Self {
        self.listings.push(contract);
        self
    }

    pub fn with_qualify_error(mut self, err: SessionError) -> Self {
        self.qualify_error = Some(err);
        self
    }

    pub fn with_quotes(self, quotes: Vec<Result<QuoteSnapshot, SessionError>>) -> Self {
        self.quotes.lock().unwrap().extend(quotes);
        self
    }

    pub fn with_fallback_quote(mut self, quote: QuoteSnapshot) -> Self {
        self.fallback_quote = Some(quote);
        self
    }

    pub fn with_bars(mut self, bars: Result<Vec<BarRecord>, SessionError>) -> Self {
        self.bars = Some(bars);
        self
    }

    pub fn with_position(mut self, position: BrokerPosition) -> Self {
        self.positions.push(position);
        self
    }

    pub fn with_order_error(mut self, err: SessionError) -> Self {
        self.order_error = Some(err);
        self
    }

    pub fn with_mode_error(mut self, err: SessionError) -> Self {
        self.mode_error = Some(err);
        self
    }

    pub fn modes(&self) -> Vec<MarketDataMode> {
        self.modes.lock().unwrap().clone()
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrokerSession for ScriptedSession {
    async fn set_market_data_mode(&self, mode: MarketDataMode) -> Result<(), SessionError> {
        if let Some(err) = &self.mode_error {
            return Err(err.clone());
        }
        self.modes.lock().unwrap().push(mode);
        Ok(())
    }

    async fn qualify(
        &self,
        descriptor: &ContractDescriptor,
    ) -> Result<Vec<ResolvedContract>, SessionError> {
        let n = self.calls.qualify.fetch_add(1, Ordering::SeqCst) as i64;
        if let Some(err) = &self.qualify_error {
            return Err(err.clone());
        }
        Ok(self
            .listings
            .iter()
            .filter(|c| {
                c.kind == descriptor.kind
                    && c.symbol == descriptor.symbol
                    && (c.kind == InstrumentKind::Equity
                        || c.contract_month == descriptor.contract_month)
            })
            // a fresh handle per call, same canonical contract
            .map(|c| ResolvedContract {
                con_id: c.con_id + n * 1000,
                exchange: descriptor.exchange.clone(),
                currency: descriptor.currency.clone(),
                ..c.clone()
            })
            .collect())
    }

    async fn request_quote_snapshot(
        &self,
        _contract: &ResolvedContract,
    ) -> Result<QuoteSnapshot, SessionError> {
        self.calls.quote.fetch_add(1, Ordering::SeqCst);
        match self.quotes.lock().unwrap().pop_front() {
            Some(next) => next,
            None => Ok(self.fallback_quote.unwrap_or_default()),
        }
    }

    async fn request_bars(
        &self,
        _contract: &ResolvedContract,
        _request: &HistoryRequest,
    ) -> Result<Vec<BarRecord>, SessionError> {
        self.calls.bars.fetch_add(1, Ordering::SeqCst);
        self.bars.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_open_positions(&self) -> Result<Vec<BrokerPosition>, SessionError> {
        self.calls.positions.fetch_add(1, Ordering::SeqCst);
        Ok(self.positions.clone())
    }

    async fn submit_market_order(&self, order: &MarketOrder) -> Result<Trade, SessionError> {
        let n = self.calls.orders.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.order_error {
            return Err(err.clone());
        }
        Ok(Trade::new(format!("T{}", n + 1), order, TradeStatus::PreSubmitted))
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn equity(symbol: &str, con_id: i64) -> ResolvedContract {
    ResolvedContract {
        con_id,
        kind: InstrumentKind::Equity,
        symbol: symbol.to_string(),
        local_symbol: symbol.to_string(),
        exchange: "SMART".to_string(),
        currency: "USD".to_string(),
        contract_month: None,
    }
}

pub fn future(symbol: &str, local_symbol: &str, month: &str, con_id: i64) -> ResolvedContract {
    ResolvedContract {
        con_id,
        kind: InstrumentKind::Future,
        symbol: symbol.to_string(),
        local_symbol: local_symbol.to_string(),
        exchange: "CME".to_string(),
        currency: "USD".to_string(),
        contract_month: Some(month.parse::<ContractMonth>().unwrap()),
    }
}

pub fn complete_quote(bid: f64, ask: f64, last: f64) -> QuoteSnapshot {
    QuoteSnapshot::from_feed(Some(bid), Some(ask), Some(last))
}
