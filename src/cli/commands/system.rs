use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info::{self, BuildMetadata};
use crate::utils::paths::PathResolver;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "version",
            "Show build metadata and where the ledger is stored",
            "version",
            cmd_version,
        ),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(meta.short_label());
    for line in version_lines(&meta, context) {
        io::print_info(line);
    }
    Ok(())
}

fn version_lines(meta: &BuildMetadata, context: &ShellContext) -> Vec<String> {
    let base = PathResolver::base_dir();
    let rows = [
        ("Build", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built at", meta.timestamp.to_string()),
        ("Target", format!("{} / {}", meta.target, meta.profile)),
        ("Rustc", meta.rustc.to_string()),
        (
            "Ledger",
            format!(
                "`{}` with {} transaction(s)",
                context.tracker.storage_key(),
                context.tracker.ledger().len()
            ),
        ),
        ("Data dir", PathResolver::data_dir_in(&base).display().to_string()),
        ("Config", PathResolver::config_file_in(&base).display().to_string()),
        ("Currency", context.config.currency.clone()),
    ];
    rows.iter()
        .map(|(label, value)| format!("  {label:<9}: {value}"))
        .collect()
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => help::print_overview(&context.registry),
        [name] => match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        _ => return Err(CommandError::InvalidArguments("usage: help [command]".into())),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
