//! Name-to-command registry

use std::collections::BTreeMap;

use crate::core::{SiteError, SiteResult};
use crate::orchestration::Command;

/// Maps command names (and aliases) to registered command prototypes
///
/// Populated once at startup. Resolution hands out an independent copy, so
/// running commands never changes what is registered.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
    aliases: BTreeMap<String, String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its own name and aliases
    pub fn add(&mut self, command: Box<dyn Command>) {
        let name = command.name();
        for alias in command.aliases() {
            self.aliases.insert((*alias).to_string(), name.to_string());
        }
        self.register(name, command);
    }

    /// Bind `name` to `command`, replacing any previous binding
    pub fn register(&mut self, name: impl Into<String>, command: Box<dyn Command>) {
        let name = name.into();
        if self.commands.contains_key(&name) {
            tracing::debug!("Replacing registered command '{}'", name);
        }
        self.commands.insert(name, command);
    }

    /// Look up a command by name or alias
    pub fn resolve(&self, name: &str) -> SiteResult<Box<dyn Command>> {
        let key = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.commands
            .get(key)
            .map(|command| command.clone_box())
            .ok_or_else(|| SiteError::CommandNotFound(name.to_string()))
    }

    /// Registered names in sorted order (aliases excluded)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Registered commands in name order
    pub fn commands(&self) -> impl Iterator<Item = (&str, &dyn Command)> {
        self.commands
            .iter()
            .map(|(name, command)| (name.as_str(), command.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
