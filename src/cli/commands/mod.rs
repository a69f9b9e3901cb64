//! CLI command implementations

pub mod database;
pub mod dotenv;
pub mod exec;
pub mod list;

use crate::orchestration::CommandRegistry;

/// Registry with every built-in command
pub fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.add(Box::new(database::create::CreateCommand::default()));
    registry.add(Box::new(database::drop::DropCommand::default()));
    registry.add(Box::new(database::query::QueryCommand::default()));
    registry.add(Box::new(database::restore::RestoreCommand::default()));
    registry.add(Box::new(dotenv::DotenvInitCommand::default()));
    registry.add(Box::new(exec::ExecCommand::default()));
    registry.add(Box::new(list::ListCommand));
    registry
}
