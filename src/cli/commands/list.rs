//! sitectl list - List registered commands

use serde_json::json;

use crate::core::SiteResult;
use crate::orchestration::{Arguments, Command, ExecutionContext, ExitStatus, Options};

pub const NAME: &str = "list";

#[derive(Debug, Clone, Default)]
pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "List available commands"
    }

    fn configure(&mut self, _arguments: &Arguments, _options: &Options) {}

    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        let registry = context.registry();
        let width = registry.names().map(str::len).max().unwrap_or(0);

        let mut lines = Vec::new();
        let mut entries = Vec::new();
        for (name, command) in registry.commands() {
            let aliases = command.aliases();
            let mut line = format!("{:width$}  {}", name, command.description(), width = width);
            if !aliases.is_empty() {
                line.push_str(&format!(" ({})", aliases.join(", ")));
            }
            lines.push(line);
            entries.push(json!({
                "name": name,
                "description": command.description(),
                "aliases": aliases,
            }));
        }

        context.io().report(&lines, &json!({ "commands": entries }));
        Ok(0)
    }
}
