use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::domain::{Category, Displayable};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "Show recorded transactions, newest first", "list", cmd_list),
        CommandEntry::new("summary", "Show balance, income and expenses", "summary", cmd_summary),
        CommandEntry::new("chart", "Show expenses by category", "chart", cmd_chart),
        CommandEntry::new("tips", "Show budgeting suggestions", "tips", cmd_tips),
        CommandEntry::new(
            "dashboard",
            "Show summary, transactions, chart and tips together",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "categories",
            "List category keys accepted by `add`",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let opts = context.render_options();
    output_section("Recent Transactions");
    io::print_info(render::render_transactions(context.tracker.ledger(), &opts));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let opts = context.render_options();
    output_section("Summary");
    io::print_info(render::render_summary(&context.tracker.summary(), &opts));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let opts = context.render_options();
    let dashboard = context.tracker.dashboard();
    output_section("Expense Breakdown");
    io::print_info(render::render_chart(&dashboard.breakdown, &opts));
    Ok(())
}

fn cmd_tips(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let opts = context.render_options();
    let dashboard = context.tracker.dashboard();
    output_section("Smart Suggestions");
    io::print_info(render::render_suggestions(&dashboard.suggestions, &opts));
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let opts = context.render_options();
    let dashboard = context.tracker.dashboard();
    io::print_info(render::render_dashboard(
        &dashboard,
        context.tracker.ledger(),
        &opts,
    ));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let plain = context.render_options().plain;
    output_section("Categories");
    for category in Category::ALL {
        let label = if plain {
            category.label().to_string()
        } else {
            category.display_label()
        };
        io::print_info(format!("  {:<14} {}", category.key(), label));
    }
    Ok(())
}
