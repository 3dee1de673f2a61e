//! Key-value persistence for ledgers.
//!
//! A store maps string keys to string values, the same contract as a browser's
//! local storage. Ledgers are written as one JSON snapshot under a single key.

pub mod json_backend;
pub mod memory;

use crate::{domain::Ledger, errors::Result};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Key the ledger snapshot is stored under unless configured otherwise.
pub const DEFAULT_LEDGER_KEY: &str = "expenses";

/// Abstraction over string key-value backends.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Loads the ledger stored under `key`. Missing, unreadable or malformed data
/// all yield an empty ledger; the cause is logged and never surfaced.
pub fn load_ledger(store: &dyn KeyValueStore, key: &str) -> Ledger {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no stored ledger, starting empty");
            return Ledger::new();
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored ledger, starting empty");
            return Ledger::new();
        }
    };

    match serde_json::from_str::<Ledger>(&raw) {
        Ok(ledger) => {
            tracing::debug!(key, transactions = ledger.len(), "ledger loaded");
            ledger
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "stored ledger is malformed, starting empty");
            Ledger::new()
        }
    }
}

/// Writes the full ledger snapshot under `key`.
pub fn save_ledger(store: &dyn KeyValueStore, key: &str, ledger: &Ledger) -> Result<()> {
    let json = serde_json::to_string(ledger)?;
    store.set(key, &json)?;
    tracing::debug!(key, transactions = ledger.len(), "ledger saved");
    Ok(())
}
