//! Validate configuration command.

use crate::cli::ValidateConfigArgs;
use anyhow::Result;
use std::path::Path;
use tradedesk_config::load_config;

pub async fn run(config_path: &Path, args: ValidateConfigArgs) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Broker: {}", config.connection.params());
    println!("Market data: {}", config.connection.market_data_mode);
    println!(
        "Quote retries: {} attempt(s), {} ms initial backoff",
        config.quotes.max_attempts, config.quotes.initial_delay_ms
    );
    println!(
        "History: {} of {} bars",
        config.history.duration, config.history.bar_size
    );
    println!(
        "Paper listings: {} equities, {} futures, {} positions",
        config.paper.equities.len(),
        config.paper.futures.len(),
        config.paper.positions.len()
    );

    if args.print {
        println!();
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
