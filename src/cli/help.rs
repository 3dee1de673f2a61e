use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::domain::Category;

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for line in overview_lines(registry) {
        io::print_info(line);
    }
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    for line in command_lines(entry) {
        io::print_info(line);
    }
}

fn overview_lines(registry: &CommandRegistry) -> Vec<String> {
    let entries = registry.list();
    let width = entries.iter().map(|entry| entry.name.len()).max().unwrap_or(0);
    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| format!("  {:<width$}  {}", entry.name, entry.description))
        .collect();
    lines.push(String::new());
    lines.push("Use `help <command>` for usage and examples.".into());
    lines
}

fn command_lines(entry: &CommandEntry) -> Vec<String> {
    let mut lines = vec![
        format!("  {}", entry.description),
        format!("  Usage: {}", entry.usage),
    ];
    let examples = examples(entry.name);
    if !examples.is_empty() {
        lines.push("  Examples:".into());
        lines.extend(examples.iter().map(|example| format!("    {example}")));
    }
    if entry.name == "add" {
        let keys: Vec<&str> = Category::ALL.iter().map(|category| category.key()).collect();
        lines.push(format!("  Categories: {}", keys.join(", ")));
    }
    lines
}

fn examples(command: &str) -> &'static [&'static str] {
    match command {
        "add" => &[
            "add expense 12.50 food \"Team lunch\"",
            "add income 2500 salary Paycheck --date 2024-06-01",
        ],
        "delete" => &["delete 1717171717171"],
        "clear" => &["clear", "clear --yes"],
        "help" => &["help add"],
        _ => &[],
    }
}
