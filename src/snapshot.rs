//! Loads the bank balances out of a genesis export into an immutable lookup table.
//!
//! Only `app_state.bank.balances` is read, everything else in the export is ignored. The table
//! is built once at startup and shared read-only afterwards.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    /// Base units as a decimal string. Parsed on lookup, see `lookup`.
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotBalanceEntry {
    pub address: String,
    pub coins: Vec<Coin>,
}

#[derive(Debug, Deserialize)]
struct Bank {
    balances: Vec<SnapshotBalanceEntry>,
}

#[derive(Debug, Deserialize)]
struct AppState {
    bank: Bank,
}

#[derive(Debug, Deserialize)]
struct Genesis {
    #[serde(default)]
    chain_id: Option<String>,
    app_state: AppState,
}

#[derive(Debug, Error)]
pub enum SnapshotLoadError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot does not match the genesis balances schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canonical address to the coins the snapshot granted it, in snapshot order.
#[derive(Debug, Default)]
pub struct BalanceTable {
    chain_id: Option<String>,
    balances: HashMap<String, Vec<Coin>>,
}

impl BalanceTable {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SnapshotLoadError> {
        let genesis: Genesis = serde_json::from_slice(bytes)?;
        Ok(Self::from_genesis(genesis))
    }

    pub fn from_json_str(text: &str) -> Result<Self, SnapshotLoadError> {
        let genesis: Genesis = serde_json::from_str(text)?;
        Ok(Self::from_genesis(genesis))
    }

    fn from_genesis(genesis: Genesis) -> Self {
        let entries = genesis.app_state.bank.balances;
        let mut balances = HashMap::with_capacity(entries.len());

        for SnapshotBalanceEntry { address, coins } in entries {
            if let Some(previous) = balances.insert(address, coins) {
                warn!(
                    ?previous,
                    "address listed more than once in snapshot, keeping the last entry"
                );
            }
        }

        Self {
            chain_id: genesis.chain_id,
            balances,
        }
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.chain_id.as_deref()
    }

    pub fn get(&self, address: &str) -> Option<&[Coin]> {
        self.balances.get(address).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

pub fn load_from_path(path: &Path) -> Result<BalanceTable, SnapshotLoadError> {
    debug!(path = %path.display(), "reading genesis snapshot");

    let bytes = fs::read(path).map_err(|source| SnapshotLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let table = BalanceTable::from_json_slice(&bytes)?;

    info!(
        chain_id = table.chain_id().unwrap_or("unknown"),
        accounts = table.len(),
        "loaded genesis snapshot"
    );

    Ok(table)
}
