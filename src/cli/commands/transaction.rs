use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::forms::{self, TransactionWizard, ADD_USAGE};
use crate::cli::io::{self, TerminalGate};
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::core::tracker::{ClearOutcome, ConfirmationGate, FixedAnswer};
use crate::domain::TransactionId;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("delete", "Delete a transaction by id", "delete <id>", cmd_delete),
        CommandEntry::new(
            "clear",
            "Delete every transaction after confirmation",
            "clear [--yes]",
            cmd_clear,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = if args.is_empty() {
        if context.mode != CliMode::Interactive {
            return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
        }
        TransactionWizard::new(&context.theme).run(context.tracker.today())?
    } else {
        forms::draft_from_args(args)?
    };

    let opts = context.render_options();
    let added = context.tracker.add_transaction(draft)?;
    io::print_success("Transaction added successfully!");
    io::print_info(render::render_transaction_row(added, &opts));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let id: TransactionId = raw
        .trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a transaction id")))?;

    match context.tracker.delete_transaction(id)? {
        Some(removed) => io::print_success(format!("Deleted `{}`.", removed.title)),
        None => io::print_warning(format!("No transaction with id {id}.")),
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let assume_yes = match args {
        [] => false,
        ["--yes" | "-y"] => true,
        _ => return Err(CommandError::InvalidArguments("usage: clear [--yes]".into())),
    };

    let mut terminal;
    let mut fixed;
    let gate: &mut dyn ConfirmationGate = if assume_yes {
        fixed = FixedAnswer(true);
        &mut fixed
    } else if context.mode == CliMode::Script {
        fixed = FixedAnswer(false);
        &mut fixed
    } else {
        terminal = TerminalGate::new(&context.theme);
        &mut terminal
    };

    match context.tracker.clear_all(gate)? {
        ClearOutcome::NothingToClear => io::print_info("No transactions to clear!"),
        ClearOutcome::Cancelled => {
            io::print_info("Clear cancelled. Your transactions were kept.");
            if context.mode == CliMode::Script {
                io::print_hint("Use `clear --yes` to clear without a prompt.");
            }
        }
        ClearOutcome::Cleared(_) => io::print_success("All transactions cleared successfully!"),
    }
    Ok(())
}
