//! CSV loader for the three simulator dumps.
//!
//! Rows are validated here, once. A missing column or non-numeric field is a
//! fatal, file-attributed error; the transforms assume clean numeric rows.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::transform::types::{BookLevelRow, LatencySample, TradeRow};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: csv::Error },
    #[error("malformed row in {}: {source}", path.display())]
    Row { path: PathBuf, source: csv::Error },
}

/// Everything one render call consumes. Empty tables are valid; each panel
/// degrades on its own.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub book: Vec<BookLevelRow>,
    pub latency: Vec<LatencySample>,
    pub trades: Vec<TradeRow>,
}

pub fn load_dir(dir: &Path) -> Result<DataSet, LoadError> {
    let book = read_rows(&dir.join("book.csv"))?;
    let latency = read_rows(&dir.join("latency.csv"))?;
    let trades = read_rows(&dir.join("trades.csv"))?;
    info!(
        book = book.len(),
        latency = latency.len(),
        trades = trades.len(),
        "loaded datasets"
    );
    Ok(DataSet {
        book,
        latency,
        trades,
    })
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| LoadError::Row {
            path: path.to_path_buf(),
            source,
        })
}
