//! Read-eval loop over the command registry: rustyline in a terminal, plain
//! stdin lines in script mode.

use std::{
    borrow::Cow,
    io::{self, BufRead},
    path::PathBuf,
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::render::format_currency;
use crate::domain::{Category, TransactionKind};
use crate::utils::{build_info, paths::PathResolver};

/// Set to run commands from stdin without prompts or colours.
pub const SCRIPT_ENV: &str = "POCKET_LEDGER_CLI_SCRIPT";

const HISTORY_FILE: &str = "history.txt";

pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::from_env(SCRIPT_ENV);
    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, key = context.tracker.storage_key(), "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ShellHelper::new(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let history = history_path();
    if let Err(err) = editor.load_history(&history) {
        tracing::debug!(error = %err, "no shell history loaded");
    }

    print_banner(context);

    while context.running {
        if let Some(helper) = editor.helper_mut() {
            helper.refresh_ids(context);
        }

        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if run_line(context, line) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history) {
        tracing::warn!(error = %err, path = %history.display(), "could not save shell history");
    }
    cli_io::print_info("Goodbye.");
    Ok(())
}

/// Runs one command per line. Blank lines and `#` comments are skipped.
fn run_script(context: &mut ShellContext, input: impl BufRead) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if run_line(context, line) == LoopControl::Exit || !context.running {
            break;
        }
    }
    Ok(())
}

fn run_line(context: &mut ShellContext, line: &str) -> LoopControl {
    match context.execute_line(line) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

fn print_banner(context: &ShellContext) {
    let summary = context.tracker.summary();
    let sign = if summary.is_negative() { "-" } else { "" };
    cli_io::print_info(build_info::current().short_label());
    cli_io::print_info(format!(
        "{} transaction(s) loaded, balance {sign}{}.",
        context.tracker.ledger().len(),
        format_currency(summary.balance, &context.config.currency)
    ));
    cli_io::print_hint("Type `help` to list commands, `?` or Tab to complete, `exit` to leave.");
}

fn history_path() -> PathBuf {
    PathResolver::base_dir().join(HISTORY_FILE)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, CommandError> {
    shell_words::split(input).map_err(|err| {
        CommandError::InvalidArguments(format!("could not read `{}`: {err}", input.trim()))
    })
}

/// Completion and usage hints that know the command table, transaction kinds,
/// category keys and the ids currently in the ledger.
struct ShellHelper {
    commands: Vec<(&'static str, &'static str)>,
    ids: Vec<String>,
    plain: bool,
}

impl ShellHelper {
    fn new(context: &ShellContext) -> Self {
        let mut helper = Self {
            commands: context
                .registry
                .list()
                .into_iter()
                .map(|entry| (entry.name, entry.usage))
                .collect(),
            ids: Vec::new(),
            plain: context.render_options().plain,
        };
        helper.refresh_ids(context);
        helper
    }

    fn refresh_ids(&mut self, context: &ShellContext) {
        self.ids = context
            .tracker
            .ledger()
            .iter()
            .map(|txn| txn.id.to_string())
            .collect();
    }

    /// Candidates for the word being typed, given the finished words before it.
    fn candidates(&self, previous: &[&str], partial: &str) -> Vec<String> {
        let command = previous.first().map(|word| word.to_ascii_lowercase());
        let pool: Vec<&str> = match (command.as_deref(), previous.len()) {
            (None, _) | (Some("help"), 1) => self.commands.iter().map(|(name, _)| *name).collect(),
            (Some("add"), 1) => vec![TransactionKind::Income.key(), TransactionKind::Expense.key()],
            (Some("add"), 3) => Category::ALL.iter().map(|category| category.key()).collect(),
            (Some("delete"), 1) => self.ids.iter().map(String::as_str).collect(),
            (Some("clear"), 1) => vec!["--yes"],
            _ => Vec::new(),
        };
        let needle = partial.to_ascii_lowercase();
        pool.into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .map(str::to_string)
            .collect()
    }

    /// Remaining usage once a known command and a space have been typed.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let name = line.strip_suffix(' ')?.trim();
        let (_, usage) = self
            .commands
            .iter()
            .find(|(command, _)| command.eq_ignore_ascii_case(name))?;
        let rest = usage.split_once(' ')?.1;
        Some(rest.to_string())
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let previous: Vec<&str> = prefix[..start].split_whitespace().collect();
        let pairs = self
            .candidates(&previous, &prefix[start..])
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for ShellHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if self.plain {
            Cow::Borrowed(hint)
        } else {
            Cow::Owned(hint.dimmed().to_string())
        }
    }
}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::tracker::Tracker;
    use crate::domain::TransactionDraft;
    use crate::storage::{MemoryStore, DEFAULT_LEDGER_KEY};

    fn context() -> ShellContext {
        let tracker = Tracker::open(Box::new(MemoryStore::new()), DEFAULT_LEDGER_KEY);
        ShellContext::with_tracker(CliMode::Script, Config::default(), tracker)
    }

    #[test]
    fn quoted_titles_stay_together() {
        let tokens = parse_command_line(r#"add expense 4.50 food "Flat white""#).unwrap();
        assert_eq!(tokens, vec!["add", "expense", "4.50", "food", "Flat white"]);
    }

    #[test]
    fn unbalanced_quotes_are_invalid_arguments() {
        let err = parse_command_line(r#"add expense 1 food "open"#).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn completes_commands_then_add_arguments() {
        let helper = ShellHelper::new(&context());
        assert_eq!(helper.candidates(&[], "su"), vec!["summary"]);
        assert_eq!(helper.candidates(&["add"], "in"), vec!["income"]);
        assert_eq!(helper.candidates(&["ADD", "expense", "12"], "tr"), vec!["transportation", "travel"]);
        assert!(helper.candidates(&["add", "expense", "12", "food"], "").is_empty());
        assert_eq!(helper.candidates(&["help"], "da"), vec!["dashboard"]);
        assert_eq!(helper.candidates(&["clear"], ""), vec!["--yes"]);
    }

    #[test]
    fn delete_completes_current_ids() {
        let mut context = context();
        let mut helper = ShellHelper::new(&context);
        assert!(helper.candidates(&["delete"], "").is_empty());

        let id = context
            .tracker
            .add_transaction(TransactionDraft::new(
                "Coffee",
                3.0,
                TransactionKind::Expense,
                Category::Food,
            ))
            .unwrap()
            .id;
        helper.refresh_ids(&context);
        assert_eq!(helper.candidates(&["delete"], ""), vec![id.to_string()]);
    }

    #[test]
    fn hints_show_remaining_usage() {
        let helper = ShellHelper::new(&context());
        assert_eq!(helper.usage_hint("delete ").as_deref(), Some("<id>"));
        assert_eq!(helper.usage_hint("clear ").as_deref(), Some("[--yes]"));
        assert_eq!(helper.usage_hint("list "), None);
        assert_eq!(helper.usage_hint("delete"), None);
    }

    #[test]
    fn script_skips_comments_and_stops_at_exit() {
        let mut context = context();
        let input = "# seed data\n\nadd income 100 salary Pay\nexit\nadd expense 5 food Snack\n";
        run_script(&mut context, input.as_bytes()).unwrap();
        assert_eq!(context.tracker.ledger().len(), 1);
        assert!(!context.running);
    }
}
