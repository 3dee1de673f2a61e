use dialoguer::theme::ColorfulTheme;

use crate::{
    cli::{
        commands,
        output::{self, OutputPreferences},
        render::{format_currency, RenderOptions},
    },
    config::{Config, ConfigManager},
    core::tracker::Tracker,
    storage::json_backend::JsonFileStore,
};

use super::core::CliError;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    /// Script mode whenever `var` is present in the environment.
    pub fn from_env(var: &str) -> Self {
        if std::env::var_os(var).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: Tracker,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration and opens the ledger stored under the app directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = ConfigManager::new()?.load()?;
        let store = JsonFileStore::new(None)?;
        let tracker = Tracker::open(Box::new(store), config.storage_key.clone())
            .with_thresholds(config.thresholds);
        Ok(Self::with_tracker(mode, config, tracker))
    }

    pub fn with_tracker(mode: CliMode, config: Config, tracker: Tracker) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script || config.plain_output,
        });

        Self {
            mode,
            registry,
            tracker,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            currency: self.config.currency.clone(),
            plain: output::current_preferences().plain_mode,
        }
    }

    /// `ledger[3 | $120.00]> `, with a leading `-` on a negative balance.
    pub fn prompt(&self) -> String {
        let summary = self.tracker.summary();
        let sign = if summary.is_negative() { "-" } else { "" };
        format!(
            "ledger[{} | {sign}{}]> ",
            self.tracker.ledger().len(),
            format_currency(summary.balance, &self.config.currency)
        )
    }
}
