//! Instrument descriptors and resolved contracts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ResolutionError;

/// Kind of tradable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Stocks and everything that is not a future
    Equity,
    /// Exchange-traded futures contract
    Future,
}

impl InstrumentKind {
    /// Broker security type code.
    pub fn sec_type(&self) -> &'static str {
        match self {
            InstrumentKind::Equity => "STK",
            InstrumentKind::Future => "FUT",
        }
    }

    /// Infer the kind from a broker-reported security type.
    ///
    /// Anything that is not a future is treated as an equity.
    pub fn from_sec_type(sec_type: &str) -> Self {
        if sec_type.eq_ignore_ascii_case("FUT") {
            InstrumentKind::Future
        } else {
            InstrumentKind::Equity
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKind::Equity => write!(f, "Stock"),
            InstrumentKind::Future => write!(f, "Future"),
        }
    }
}

impl FromStr for InstrumentKind {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" | "equity" | "stk" => Ok(InstrumentKind::Equity),
            "future" | "fut" => Ok(InstrumentKind::Future),
            _ => Err(ResolutionError::UnsupportedKind(s.to_string())),
        }
    }
}

/// A futures contract month in `YYYYMM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractMonth {
    year: i32,
    month: u32,
}

impl ContractMonth {
    /// Create a contract month, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Months from the quarterly table are always in range.
    pub(crate) fn quarterly(year: i32, month: u32) -> Self {
        debug_assert!(month % 3 == 0 && (3..=12).contains(&month));
        Self { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check if this is one of March, June, September or December.
    pub fn is_quarterly(&self) -> bool {
        self.month % 3 == 0
    }
}

impl fmt::Display for ContractMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for ContractMonth {
    type Err = ResolutionError;

    /// Accepts `YYYYMM`, or a broker last-trade date `YYYYMMDD` whose day is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ResolutionError::InvalidExpiration(s.to_string());

        if !(s.len() == 6 || s.len() == 8) || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..6].parse().map_err(|_| invalid())?;
        ContractMonth::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ContractMonth {
    type Error = ResolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContractMonth> for String {
    fn from(month: ContractMonth) -> Self {
        month.to_string()
    }
}

/// User-supplied description of an instrument to look up.
///
/// The kind decides which fields are meaningful: an equity never carries an
/// expiration or a quarter offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentSpec {
    kind: InstrumentKind,
    symbol: String,
    expiration: Option<ContractMonth>,
    quarter_offset: u32,
}

impl InstrumentSpec {
    /// Create a spec, dropping futures-only fields for equities.
    pub fn new(
        kind: InstrumentKind,
        symbol: impl Into<String>,
        expiration: Option<ContractMonth>,
        quarter_offset: u32,
    ) -> Self {
        let symbol = symbol.into().trim().to_uppercase();
        match kind {
            InstrumentKind::Equity => Self {
                kind,
                symbol,
                expiration: None,
                quarter_offset: 0,
            },
            InstrumentKind::Future => Self {
                kind,
                symbol,
                expiration,
                quarter_offset,
            },
        }
    }

    /// Create an equity spec.
    pub fn equity(symbol: impl Into<String>) -> Self {
        Self::new(InstrumentKind::Equity, symbol, None, 0)
    }

    /// Create a futures spec for the front quarterly month.
    pub fn future(symbol: impl Into<String>) -> Self {
        Self::new(InstrumentKind::Future, symbol, None, 0)
    }

    /// Parse the console's free-form input into a spec.
    pub fn parse(
        kind: &str,
        symbol: &str,
        expiration: Option<&str>,
        quarter_offset: u32,
    ) -> Result<Self, ResolutionError> {
        let kind: InstrumentKind = kind.parse()?;
        // equities ignore the expiration field, whatever it holds
        let expiration = match expiration.map(str::trim).filter(|e| !e.is_empty()) {
            Some(e) if kind == InstrumentKind::Future => Some(e.parse::<ContractMonth>()?),
            _ => None,
        };
        Ok(Self::new(kind, symbol, expiration, quarter_offset))
    }

    /// Pin a futures spec to an explicit contract month.
    pub fn with_expiration(self, expiration: ContractMonth) -> Self {
        Self::new(self.kind, self.symbol, Some(expiration), self.quarter_offset)
    }

    /// Skip `offset` quarters past the front month.
    pub fn with_quarter_offset(self, offset: u32) -> Self {
        Self::new(self.kind, self.symbol, self.expiration, offset)
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn expiration(&self) -> Option<ContractMonth> {
        self.expiration
    }

    pub fn quarter_offset(&self) -> u32 {
        self.quarter_offset
    }
}

impl fmt::Display for InstrumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.expiration) {
            (InstrumentKind::Future, Some(month)) => write!(f, "{} {} ({})", self.symbol, month, self.kind),
            (InstrumentKind::Future, None) if self.quarter_offset > 0 => {
                write!(f, "{} +{}Q ({})", self.symbol, self.quarter_offset, self.kind)
            }
            _ => write!(f, "{} ({})", self.symbol, self.kind),
        }
    }
}

/// Unqualified contract description sent to the broker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractDescriptor {
    pub kind: InstrumentKind,
    pub symbol: String,
    pub exchange: String,
    pub currency: String,
    /// Always set for futures, never for equities
    pub contract_month: Option<ContractMonth>,
}

/// Broker-side handle for a qualified contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedContract {
    /// Broker contract identifier
    pub con_id: i64,
    pub kind: InstrumentKind,
    /// Canonical root symbol
    pub symbol: String,
    /// Exchange-local symbol (e.g. `ESZ4`)
    pub local_symbol: String,
    pub exchange: String,
    pub currency: String,
    /// Canonical expiry for futures
    pub contract_month: Option<ContractMonth>,
}

impl ResolvedContract {
    /// Human-readable label, e.g. `ESZ4 (FUT)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.local_symbol, self.kind.sec_type())
    }

    /// Same canonical symbol and expiry, regardless of handle identity.
    pub fn is_equivalent(&self, other: &ResolvedContract) -> bool {
        self.kind == other.kind
            && self.symbol == other.symbol
            && self.contract_month == other.contract_month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("Stock".parse::<InstrumentKind>().unwrap(), InstrumentKind::Equity);
        assert_eq!("FUT".parse::<InstrumentKind>().unwrap(), InstrumentKind::Future);
        assert_eq!(
            "Option".parse::<InstrumentKind>(),
            Err(ResolutionError::UnsupportedKind("Option".into()))
        );
    }

    #[test]
    fn test_kind_from_sec_type() {
        assert_eq!(InstrumentKind::from_sec_type("FUT"), InstrumentKind::Future);
        assert_eq!(InstrumentKind::from_sec_type("STK"), InstrumentKind::Equity);
        assert_eq!(InstrumentKind::from_sec_type("OPT"), InstrumentKind::Equity);
    }

    #[test]
    fn test_contract_month_parse() {
        let month: ContractMonth = "202412".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 12);
        assert!(month.is_quarterly());
        assert_eq!(month.to_string(), "202412");

        let from_date: ContractMonth = "20250321".parse().unwrap();
        assert_eq!(from_date.to_string(), "202503");

        assert!("202413".parse::<ContractMonth>().is_err());
        assert!("2024-12".parse::<ContractMonth>().is_err());
        assert!("".parse::<ContractMonth>().is_err());
    }

    #[test]
    fn test_equity_spec_drops_futures_fields() {
        let month = ContractMonth::new(2024, 12).unwrap();
        let spec = InstrumentSpec::new(InstrumentKind::Equity, " aapl ", Some(month), 2);
        assert_eq!(spec.symbol(), "AAPL");
        assert_eq!(spec.expiration(), None);
        assert_eq!(spec.quarter_offset(), 0);
    }

    #[test]
    fn test_spec_parse() {
        let spec = InstrumentSpec::parse("Future", "es", Some("202503"), 0).unwrap();
        assert_eq!(spec.kind(), InstrumentKind::Future);
        assert_eq!(spec.symbol(), "ES");
        assert_eq!(spec.expiration().unwrap().to_string(), "202503");

        let spec = InstrumentSpec::parse("Future", "ES", Some(""), 1).unwrap();
        assert_eq!(spec.expiration(), None);
        assert_eq!(spec.quarter_offset(), 1);

        assert!(InstrumentSpec::parse("Bond", "T", None, 0).is_err());
        assert!(InstrumentSpec::parse("Future", "ES", Some("12/2024"), 0).is_err());

        let stock = InstrumentSpec::parse("Stock", "aapl", Some("12/2024"), 2).unwrap();
        assert_eq!(stock, InstrumentSpec::equity("AAPL"));
    }

    #[test]
    fn test_resolved_contract_label() {
        let contract = ResolvedContract {
            con_id: 1,
            kind: InstrumentKind::Future,
            symbol: "ES".into(),
            local_symbol: "ESZ4".into(),
            exchange: "CME".into(),
            currency: "USD".into(),
            contract_month: ContractMonth::new(2024, 12),
        };
        assert_eq!(contract.label(), "ESZ4 (FUT)");

        let other = ResolvedContract { con_id: 2, ..contract.clone() };
        assert!(contract.is_equivalent(&other));
    }
}
