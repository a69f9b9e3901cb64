//! sitectl database - Database commands

pub mod create;
pub mod drop;
pub mod query;
pub mod restore;

use clap::{Args, Subcommand};

use crate::orchestration::RequestDescriptor;

#[derive(Args)]
pub struct DatabaseArgs {
    #[command(subcommand)]
    pub command: DatabaseCommands,
}

#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// Create a database
    #[command(visible_alias = "dbcr")]
    Create(create::CreateArgs),

    /// Drop a database
    #[command(visible_alias = "dbd")]
    Drop(drop::DropArgs),

    /// Restore a database from a dump file
    #[command(visible_alias = "dbr")]
    Restore(restore::RestoreArgs),

    /// Execute a SQL statement
    #[command(visible_alias = "dbq")]
    Query(query::QueryArgs),
}

impl DatabaseArgs {
    pub fn into_request(self) -> RequestDescriptor {
        match self.command {
            DatabaseCommands::Create(args) => args.into_request(),
            DatabaseCommands::Drop(args) => args.into_request(),
            DatabaseCommands::Restore(args) => args.into_request(),
            DatabaseCommands::Query(args) => args.into_request(),
        }
    }
}
