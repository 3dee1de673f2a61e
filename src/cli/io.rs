use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::output;
use crate::core::tracker::ConfirmationGate;
use crate::errors::{LedgerError, Result};

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Yes/no prompt on the terminal, defaulting to "no".
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str) -> Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_error)
}

pub(crate) fn prompt_error(err: dialoguer::Error) -> LedgerError {
    LedgerError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        err.to_string(),
    ))
}

/// Interactive confirmation gate backed by a dialoguer prompt.
pub struct TerminalGate<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> TerminalGate<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl ConfirmationGate for TerminalGate<'_> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        confirm_action(self.theme, prompt)
    }
}
