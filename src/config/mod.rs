use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::services::SuggestionThresholds,
    errors::{LedgerError, Result},
    storage::DEFAULT_LEDGER_KEY,
    utils::paths::{ensure_dir, tmp_path, PathResolver},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ISO 4217 code; `USD` renders with a `$` prefix, anything else as a suffix.
    pub currency: String,
    /// Store key the ledger snapshot lives under.
    pub storage_key: String,
    /// Disable colours and glyphs in CLI output.
    pub plain_output: bool,
    pub thresholds: SuggestionThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            storage_key: DEFAULT_LEDGER_KEY.into(),
            plain_output: false,
            thresholds: SuggestionThresholds::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let code = self.currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LedgerError::Config(format!(
                "currency must be a three-letter code, got `{}`",
                self.currency
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(LedgerError::Config("storage_key must not be empty".into()));
        }
        self.thresholds.validate()
    }
}

/// Loads and saves `config/config.json` under the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Missing file yields defaults; a present but invalid file is an error.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut config: Config = serde_json::from_str(&data)
            .map_err(|err| LedgerError::Config(format!("{}: {err}", self.path.display())))?;
        config.currency = config.currency.trim().to_uppercase();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
