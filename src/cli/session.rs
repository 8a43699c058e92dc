//! Console construction from configuration.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tradedesk_client::{
    ConsoleOptions, PaperConnector, PaperSession, RetryPolicy, RoutingConfig, TradingConsole,
};
use tradedesk_config::{AppConfig, PaperSettings};
use tradedesk_core::types::{BrokerPosition, QuoteSnapshot};

/// Seed a paper session from the `[paper]` section.
pub fn paper_session(settings: &PaperSettings) -> Result<Arc<PaperSession>> {
    let paper = Arc::new(PaperSession::new());

    for listing in &settings.equities {
        paper.list_equity(
            &listing.symbol,
            QuoteSnapshot::from_feed(listing.bid, listing.ask, listing.last),
        );
    }
    for listing in &settings.futures {
        paper.list_future(
            &listing.symbol,
            QuoteSnapshot::from_feed(listing.bid, listing.ask, listing.last),
        );
    }
    for position in &settings.positions {
        paper.add_position(BrokerPosition {
            symbol: position.symbol.to_uppercase(),
            local_symbol: position
                .local_symbol
                .clone()
                .unwrap_or_else(|| position.symbol.to_uppercase()),
            sec_type: position.sec_type.clone(),
            contract_month: position.contract_month,
            quantity: position.quantity,
            average_cost: position.average_cost,
        });
    }

    if let Some(dir) = &settings.bars_dir {
        let dir = Path::new(dir);
        for listing in settings.equities.iter().chain(&settings.futures) {
            let symbol = listing.symbol.to_uppercase();
            match tradedesk_data::load_symbol_csv(dir, &symbol)
                .with_context(|| format!("Failed to load bars for {}", symbol))?
            {
                Some(bars) => {
                    info!("Loaded {} bars for {}", bars.len(), symbol);
                    paper.set_bars(&symbol, bars);
                }
                None => warn!("No bar file for {} in {}", symbol, dir.display()),
            }
        }
    }

    Ok(paper)
}

/// Console options from configuration.
pub fn console_options(config: &AppConfig) -> ConsoleOptions {
    ConsoleOptions {
        market_data_mode: config.connection.market_data_mode,
        request_timeout: config.connection.request_timeout(),
        routing: RoutingConfig {
            equity_exchange: config.routing.equity_exchange.clone(),
            future_exchange: config.routing.future_exchange.clone(),
            currency: config.routing.currency.clone(),
        },
        retry: RetryPolicy::new(config.quotes.max_attempts, config.quotes.initial_delay()),
        history: config.history.request(),
        indicator_period: config.indicators.period,
        cache_contracts: config.cache.contracts,
    }
}

/// Connect a console to the configured paper session.
pub async fn open_console(config: &AppConfig) -> Result<TradingConsole> {
    let paper = paper_session(&config.paper)?;
    let connector = PaperConnector::new(paper);

    TradingConsole::connect(&connector, &config.connection.params(), console_options(config))
        .await
        .context("Failed to connect to broker session")
}
