use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Command table keyed by name; iteration follows registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations under an existing name replace the handler but keep
    /// the original position.
    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }

    /// Closest registered name within `max_distance` edits of `input`.
    pub fn closest(&self, input: &str, max_distance: usize) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.names()
            .map(|name| (strsim::levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("summary", "", "summary", noop));
        registry.register(CommandEntry::new("add", "", "add", noop));
        registry.register(CommandEntry::new("list", "", "list", noop));
        registry
    }

    #[test]
    fn keeps_registration_order() {
        let names: Vec<_> = registry().names().collect();
        assert_eq!(names, vec!["summary", "add", "list"]);
    }

    #[test]
    fn duplicate_names_are_not_listed_twice() {
        let mut registry = registry();
        registry.register(CommandEntry::new("add", "again", "add", noop));
        assert_eq!(registry.list().len(), 3);
        assert_eq!(registry.get("add").map(|entry| entry.description), Some("again"));
    }

    #[test]
    fn closest_name_respects_distance() {
        let registry = registry();
        assert_eq!(registry.closest("sumary", 3), Some("summary"));
        assert_eq!(registry.closest("LST", 3), Some("list"));
        assert_eq!(registry.closest("zzzzzzzzz", 3), None);
    }
}
