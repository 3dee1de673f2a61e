//! Dispatch, error reporting and the error types of the shell.

use std::io;

use thiserror::Error;

use crate::errors::LedgerError;

use super::io as cli_io;
use super::registry::CommandEntry;
use super::shell::parse_command_line;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellContext {
    /// Tokenizes and runs one input line.
    pub(crate) fn execute_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::debug!(command, "dispatching");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.closest(input, 3) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?")?)
    }

    /// Prints a failed command without leaving the shell.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message)
            | CommandError::Core(LedgerError::InvalidInput(message)) => {
                tracing::debug!(%message, "rejected input");
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            other => {
                tracing::warn!(error = %other, "command failed");
                cli_io::print_error(other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::tracker::Tracker;
    use crate::storage::{MemoryStore, DEFAULT_LEDGER_KEY};

    fn context() -> ShellContext {
        let tracker = Tracker::open(Box::new(MemoryStore::new()), DEFAULT_LEDGER_KEY);
        ShellContext::with_tracker(CliMode::Script, Config::default(), tracker)
    }

    #[test]
    fn add_then_delete_through_commands() {
        let mut context = context();
        context
            .execute_line("add expense 12.50 food \"Team lunch\" --date 2024-03-01")
            .unwrap();
        assert_eq!(context.tracker.ledger().len(), 1);

        let id = context.tracker.ledger().transactions()[0].id;
        context.execute_line(&format!("delete {id}")).unwrap();
        assert!(context.tracker.ledger().is_empty());
    }

    #[test]
    fn invalid_add_arguments_surface_as_errors() {
        let mut context = context();
        let err = context.execute_line("add expense lots food Lunch").unwrap_err();
        assert!(matches!(err, CommandError::Core(LedgerError::InvalidInput(_))));
        assert!(context.tracker.ledger().is_empty());
    }

    #[test]
    fn clear_in_script_mode_requires_flag() {
        let mut context = context();
        context.execute_line("add income 100 salary Pay").unwrap();
        context.execute_line("clear").unwrap();
        assert_eq!(context.tracker.ledger().len(), 1);
        context.execute_line("clear --yes").unwrap();
        assert!(context.tracker.ledger().is_empty());
    }

    #[test]
    fn unknown_commands_do_not_stop_the_shell() {
        let mut context = context();
        let control = context.execute_line("sumary").unwrap();
        assert_eq!(control, LoopControl::Continue);
        assert!(context.running);
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut context = context();
        assert_eq!(context.execute_line("EXIT").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn unbalanced_quotes_are_a_warning_only() {
        let mut context = context();
        assert_eq!(
            context.execute_line("add expense 5 food \"oops").unwrap(),
            LoopControl::Continue
        );
        assert!(context.tracker.ledger().is_empty());
    }
}
