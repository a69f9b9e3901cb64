//! sitectl database drop - Drop the database of a connection

use clap::Args;

use crate::core::{SiteResult, DEFAULT_CONNECTION};
use crate::orchestration::{
    Arguments, Command, ExecutionContext, ExitStatus, Options, RequestDescriptor,
};

use super::query;

pub const NAME: &str = "database:drop";

#[derive(Args)]
pub struct DropArgs {
    /// Connection key from sitectl.toml
    #[arg(default_value = DEFAULT_CONNECTION)]
    pub database: String,
}

impl DropArgs {
    pub fn into_request(self) -> RequestDescriptor {
        RequestDescriptor::new(NAME).argument("database", self.database)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DropCommand {
    database: String,
    options: Options,
}

impl Command for DropCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["dbd"]
    }

    fn description(&self) -> &'static str {
        "Drop a database"
    }

    fn configure(&mut self, arguments: &Arguments, options: &Options) {
        self.database = arguments.get_or("database", DEFAULT_CONNECTION).to_string();
        self.options = options.clone();
    }

    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        let flags = context.flags().overlay(&self.options);
        let connection = context.config().connection(&self.database)?;

        if !flags.skip_prompts() {
            let question = format!(
                "All tables in {} will be dropped, continue?",
                connection.database
            );
            if !context.io().confirm(&question, true)? {
                context.io().warning("Drop cancelled");
                return Ok(1);
            }
        }

        let status = context.run_commands([RequestDescriptor::new(query::NAME)
            .argument(
                "query",
                format!("DROP DATABASE IF EXISTS {}", connection.database),
            )
            .option("database", self.database.clone())
            .option("learning", flags.learning)])?;

        if status != 0 {
            return Ok(1);
        }

        context
            .io()
            .success(&format!("Database {} dropped", connection.database));

        Ok(0)
    }
}
