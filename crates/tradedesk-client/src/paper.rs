//! Paper broker session for offline use and simulation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;
use tradedesk_core::error::SessionError;
use tradedesk_core::traits::{BrokerSession, ConnectParams, Connector, MarketDataMode};
use tradedesk_core::types::{
    Bar, BarRecord, BrokerPosition, ContractDescriptor, ContractMonth, HistoryRequest,
    InstrumentKind, MarketOrder, QuoteSnapshot, ResolvedContract, Trade, TradeStatus, WindowUnit,
};
use uuid::Uuid;

/// Futures month codes, January first.
const MONTH_CODES: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];

type ListingKey = (InstrumentKind, String);
type ContractKey = (InstrumentKind, String, Option<ContractMonth>);

#[derive(Debug)]
struct PaperState {
    connected: bool,
    mode: MarketDataMode,
    /// Listed symbols and their current quote
    listings: HashMap<ListingKey, QuoteSnapshot>,
    /// conIds handed out so far
    contracts: HashMap<ContractKey, i64>,
    next_con_id: i64,
    bars: HashMap<String, Vec<Bar>>,
    positions: Vec<BrokerPosition>,
    trades: Vec<Trade>,
}

/// In-memory broker session.
///
/// Equities are listed by symbol. Futures are listed by root symbol and any
/// contract month of that root qualifies. Orders are accepted with
/// `Submitted` status and never filled.
#[derive(Debug)]
pub struct PaperSession {
    name: String,
    state: Mutex<PaperState>,
}

impl PaperSession {
    /// Create an empty, connected session.
    pub fn new() -> Self {
        Self {
            name: "paper".to_string(),
            state: Mutex::new(PaperState {
                connected: true,
                mode: MarketDataMode::default(),
                listings: HashMap::new(),
                contracts: HashMap::new(),
                next_con_id: 1,
                bars: HashMap::new(),
                positions: Vec::new(),
                trades: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, PaperState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// List an equity.
    pub fn list_equity(&self, symbol: &str, quote: QuoteSnapshot) {
        self.state()
            .listings
            .insert((InstrumentKind::Equity, symbol.to_uppercase()), quote);
    }

    /// List a futures root; every contract month of the root qualifies.
    pub fn list_future(&self, root: &str, quote: QuoteSnapshot) {
        self.state()
            .listings
            .insert((InstrumentKind::Future, root.to_uppercase()), quote);
    }

    /// Set the bar history served for a symbol.
    pub fn set_bars(&self, symbol: &str, bars: Vec<Bar>) {
        self.state().bars.insert(symbol.to_uppercase(), bars);
    }

    /// Add an open position to the account.
    pub fn add_position(&self, position: BrokerPosition) {
        self.state().positions.push(position);
    }

    /// Orders accepted so far.
    pub fn trades(&self) -> Vec<Trade> {
        self.state().trades.clone()
    }

    pub fn market_data_mode(&self) -> MarketDataMode {
        self.state().mode
    }

    fn connected(&self) -> Result<MutexGuard<'_, PaperState>, SessionError> {
        let state = self.state();
        if state.connected {
            Ok(state)
        } else {
            Err(SessionError::NotConnected)
        }
    }

    fn reconnect(&self) {
        self.state().connected = true;
    }
}

impl Default for PaperSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PaperState {
    fn is_known(&self, contract: &ResolvedContract) -> bool {
        self.contracts
            .get(&(contract.kind, contract.symbol.clone(), contract.contract_month))
            .is_some_and(|id| *id == contract.con_id)
    }
}

/// Exchange-local symbol of a futures contract, e.g. `ESZ4`.
fn local_future_symbol(root: &str, month: ContractMonth) -> String {
    let code = MONTH_CODES[(month.month() as usize - 1) % 12];
    format!("{}{}{}", root, code, month.year().rem_euclid(10))
}

/// Approximate span of a history window in milliseconds.
fn window_millis(request: &HistoryRequest) -> i64 {
    let secs: i64 = match request.window.unit {
        WindowUnit::Seconds => 1,
        WindowUnit::Days => 86_400,
        WindowUnit::Weeks => 7 * 86_400,
        WindowUnit::Months => 30 * 86_400,
        WindowUnit::Years => 365 * 86_400,
    };
    i64::from(request.window.amount) * secs * 1000
}

#[async_trait]
impl BrokerSession for PaperSession {
    async fn set_market_data_mode(&self, mode: MarketDataMode) -> Result<(), SessionError> {
        self.connected()?.mode = mode;
        Ok(())
    }

    async fn qualify(
        &self,
        descriptor: &ContractDescriptor,
    ) -> Result<Vec<ResolvedContract>, SessionError> {
        let mut state = self.connected()?;

        let listed = state
            .listings
            .contains_key(&(descriptor.kind, descriptor.symbol.clone()));
        let month = match descriptor.kind {
            InstrumentKind::Equity => None,
            InstrumentKind::Future => match descriptor.contract_month {
                Some(month) => Some(month),
                None => return Ok(Vec::new()),
            },
        };
        if !listed {
            return Ok(Vec::new());
        }

        let key = (descriptor.kind, descriptor.symbol.clone(), month);
        let con_id = match state.contracts.get(&key) {
            Some(id) => *id,
            None => {
                let id = state.next_con_id;
                state.next_con_id += 1;
                state.contracts.insert(key, id);
                id
            }
        };

        let local_symbol = match month {
            Some(month) => local_future_symbol(&descriptor.symbol, month),
            None => descriptor.symbol.clone(),
        };

        Ok(vec![ResolvedContract {
            con_id,
            kind: descriptor.kind,
            symbol: descriptor.symbol.clone(),
            local_symbol,
            exchange: descriptor.exchange.clone(),
            currency: descriptor.currency.clone(),
            contract_month: month,
        }])
    }

    async fn request_quote_snapshot(
        &self,
        contract: &ResolvedContract,
    ) -> Result<QuoteSnapshot, SessionError> {
        let state = self.connected()?;
        if !state.is_known(contract) {
            return Err(SessionError::Api(format!("Unknown contract {}", contract.label())));
        }
        Ok(state
            .listings
            .get(&(contract.kind, contract.symbol.clone()))
            .copied()
            .unwrap_or_default())
    }

    async fn request_bars(
        &self,
        contract: &ResolvedContract,
        request: &HistoryRequest,
    ) -> Result<Vec<BarRecord>, SessionError> {
        let state = self.connected()?;
        if !state.is_known(contract) {
            return Err(SessionError::Api(format!("Unknown contract {}", contract.label())));
        }

        let bars = match state.bars.get(&contract.symbol) {
            Some(bars) => bars,
            None => return Ok(Vec::new()),
        };
        let cutoff = bars
            .iter()
            .map(|b| b.timestamp)
            .max()
            .map(|last| last - window_millis(request))
            .unwrap_or(i64::MIN);

        Ok(bars
            .iter()
            .filter(|b| b.timestamp > cutoff)
            .map(|b| BarRecord::from(*b))
            .collect())
    }

    async fn list_open_positions(&self) -> Result<Vec<BrokerPosition>, SessionError> {
        Ok(self.connected()?.positions.clone())
    }

    async fn submit_market_order(&self, order: &MarketOrder) -> Result<Trade, SessionError> {
        let mut state = self.connected()?;
        if !state.is_known(order.contract()) {
            return Err(SessionError::Rejected(format!(
                "Unknown contract {}",
                order.contract().label()
            )));
        }

        let trade = Trade::new(Uuid::new_v4().to_string(), order, TradeStatus::Submitted);
        state.trades.push(trade.clone());
        info!("Paper order {} accepted: {} {} {}", trade.order_id, trade.side, trade.quantity, trade.contract.label());
        Ok(trade)
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        self.state().connected = false;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Hands out a shared [`PaperSession`].
#[derive(Debug, Clone)]
pub struct PaperConnector {
    session: Arc<PaperSession>,
}

impl PaperConnector {
    pub fn new(session: Arc<PaperSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<PaperSession> {
        &self.session
    }
}

#[async_trait]
impl Connector for PaperConnector {
    async fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn BrokerSession>, SessionError> {
        self.session.reconnect();
        info!("Connected to paper session as {}", params);
        Ok(self.session.clone())
    }
}
