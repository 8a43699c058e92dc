//! Plain-text reports for console results.

use tradedesk_core::types::{
    BarSeries, ContractMonth, PositionSummary, Quote, ResolvedContract, Trade,
};
use tradedesk_indicators::IndicatorSnapshot;

const RULE: &str = "───────────────────────────────────────────────────────────\n";

/// Shown wherever a value is undefined.
pub const UNAVAILABLE: &str = "n/a";

fn heading(s: &mut String, title: &str) {
    s.push_str(title);
    s.push('\n');
    s.push_str(RULE);
}

fn optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => UNAVAILABLE.to_string(),
    }
}

/// Outcome of a symbol validation.
pub fn validation(symbol: &str, valid: bool, reason: &str) -> String {
    if valid {
        format!("{} is valid\n", symbol)
    } else {
        format!("{} is not valid: {}\n", symbol, reason)
    }
}

pub fn contract(contract: &ResolvedContract) -> String {
    let mut s = String::new();
    heading(&mut s, "CONTRACT");
    s.push_str(&format!("  Contract:     {}\n", contract.label()));
    s.push_str(&format!("  Symbol:       {}\n", contract.symbol));
    s.push_str(&format!("  Con ID:       {}\n", contract.con_id));
    s.push_str(&format!("  Exchange:     {}\n", contract.exchange));
    s.push_str(&format!("  Currency:     {}\n", contract.currency));
    if let Some(month) = contract.contract_month {
        s.push_str(&format!("  Expiration:   {}\n", month));
    }
    s
}

pub fn quote(contract: &ResolvedContract, quote: &Quote) -> String {
    let mut s = String::new();
    heading(&mut s, &format!("QUOTE {}", contract.label()));
    s.push_str(&format!("  Bid:          {:.2}\n", quote.bid));
    s.push_str(&format!("  Ask:          {:.2}\n", quote.ask));
    s.push_str(&format!("  Last:         {:.2}\n", quote.last));
    s.push_str(&format!("  Spread:       {:.2} ({:.3}%)\n", quote.spread(), quote.spread_percent()));
    s
}

/// Bar table, most recent `limit` bars.
pub fn history(series: &BarSeries, limit: usize) -> String {
    let mut s = String::new();
    heading(
        &mut s,
        &format!("HISTORY {} ({} bars of {})", series.symbol, series.len(), series.bar_size),
    );
    s.push_str(&format!(
        "  {:<20} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "Time", "Open", "High", "Low", "Close", "Volume"
    ));

    let skip = series.len().saturating_sub(limit);
    for bar in series.iter().skip(skip) {
        let time = bar
            .datetime()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| bar.timestamp.to_string());
        s.push_str(&format!(
            "  {:<20} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            time, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    s
}

pub fn indicators(symbol: &str, period: usize, snapshot: &IndicatorSnapshot) -> String {
    let mut s = String::new();
    heading(&mut s, &format!("INDICATORS {}", symbol));
    s.push_str(&format!("  SMA({}):{:<6} {}\n", period, "", optional(snapshot.sma, 4)));
    s.push_str(&format!("  EMA({}):{:<6} {}\n", period, "", optional(snapshot.ema, 4)));
    s.push_str(&format!("  VWAP:{:<10} {}\n", "", optional(snapshot.vwap, 4)));
    s.push_str(&format!("  RSI({}):{:<6} {}\n", period, "", optional(snapshot.rsi, 2)));
    s
}

pub fn positions(summary: &PositionSummary) -> String {
    let rows = match summary {
        PositionSummary::NoPositions => return format!("{}\n", summary),
        PositionSummary::Held(rows) => rows,
    };

    let mut s = String::new();
    heading(&mut s, "POSITIONS");
    s.push_str(&format!(
        "  {:<20} {:<6} {:>12} {:>14} {:>14}\n",
        "Contract", "Side", "Quantity", "Avg Cost", "Last"
    ));
    for p in rows {
        s.push_str(&format!(
            "  {:<20} {:<6} {:>12} {:>14.2} {:>14}\n",
            p.contract_label,
            p.direction(),
            p.abs_quantity().normalize(),
            p.average_cost,
            optional(p.current_price, 2)
        ));
    }
    if rows.is_empty() {
        s.push_str("  (no position could be resolved)\n");
    }
    s
}

pub fn trade(trade: &Trade) -> String {
    let mut s = String::new();
    heading(&mut s, "ORDER");
    s.push_str(&format!("  Order ID:     {}\n", trade.order_id));
    s.push_str(&format!("  Contract:     {}\n", trade.contract.label()));
    s.push_str(&format!("  Action:       {}\n", trade.side));
    s.push_str(&format!("  Quantity:     {}\n", trade.quantity));
    s.push_str(&format!("  Status:       {}\n", trade.status));
    s.push_str(&format!(
        "  Submitted:    {}\n",
        trade.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    s
}

/// Upcoming quarterly contract months.
pub fn expirations(months: &[ContractMonth]) -> String {
    let mut s = String::new();
    heading(&mut s, "QUARTERLY EXPIRATIONS");
    for (offset, month) in months.iter().enumerate() {
        s.push_str(&format!("  +{}Q:          {}\n", offset, month));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tradedesk_core::types::{InstrumentKind, Position};

    fn es() -> ResolvedContract {
        ResolvedContract {
            con_id: 495512563,
            kind: InstrumentKind::Future,
            symbol: "ES".into(),
            local_symbol: "ESZ4".into(),
            exchange: "CME".into(),
            currency: "USD".into(),
            contract_month: ContractMonth::new(2024, 12),
        }
    }

    #[test]
    fn test_contract_report() {
        let report = contract(&es());
        assert!(report.contains("ESZ4 (FUT)"));
        assert!(report.contains("202412"));
    }

    #[test]
    fn test_undefined_indicators() {
        let snapshot = IndicatorSnapshot {
            sma: Some(11.0),
            ema: Some(10.5),
            vwap: Some(11.0),
            rsi: None,
        };
        let report = indicators("AAPL", 14, &snapshot);
        assert!(report.contains("11.0000"));
        assert!(report.lines().any(|l| l.starts_with("  RSI(14)") && l.ends_with(UNAVAILABLE)));
    }

    #[test]
    fn test_positions_report() {
        assert_eq!(positions(&PositionSummary::NoPositions), "No positions currently held.\n");

        let summary = PositionSummary::Held(vec![Position {
            contract_label: "ESZ4 (FUT)".into(),
            quantity: dec!(-2),
            average_cost: dec!(250125.5),
            current_price: None,
        }]);
        let report = positions(&summary);
        let row = report.lines().find(|l| l.contains("ESZ4 (FUT)")).unwrap();
        let columns: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(columns[2], "SHORT");
        assert_eq!(columns[3], "2");
        assert_eq!(columns[5], UNAVAILABLE);
    }

    #[test]
    fn test_validation_report() {
        assert_eq!(validation("AAPL", true, ""), "AAPL is valid\n");
        assert!(validation("", false, "Ticker symbol cannot be empty.").ends_with("empty.\n"));
    }
}
