//! Bar data files for the trading console.

mod csv_source;

pub use csv_source::CsvBarSource;

use std::path::Path;
use thiserror::Error;
use tradedesk_core::types::Bar;

/// Bar file errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Bar file not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Load bars from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Bar>, DataError> {
    CsvBarSource::new(path)?.load_all()
}

/// Load `{symbol}.csv` (or its lowercase variant) from a directory, if present.
pub fn load_symbol_csv(dir: impl AsRef<Path>, symbol: &str) -> Result<Option<Vec<Bar>>, DataError> {
    let dir = dir.as_ref();
    let candidates = [
        dir.join(format!("{}.csv", symbol)),
        dir.join(format!("{}.csv", symbol.to_lowercase())),
    ];

    match candidates.iter().find(|p| p.exists()) {
        Some(path) => load_csv(path).map(Some),
        None => Ok(None),
    }
}
