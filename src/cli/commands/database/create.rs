//! sitectl database create - Create the database of a connection

use clap::Args;

use crate::core::{SiteResult, DEFAULT_CONNECTION};
use crate::orchestration::{
    Arguments, Command, ExecutionContext, ExitStatus, Options, RequestDescriptor,
};

use super::query;

pub const NAME: &str = "database:create";

#[derive(Args)]
pub struct CreateArgs {
    /// Connection key from sitectl.toml
    #[arg(default_value = DEFAULT_CONNECTION)]
    pub database: String,
}

impl CreateArgs {
    pub fn into_request(self) -> RequestDescriptor {
        RequestDescriptor::new(NAME).argument("database", self.database)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateCommand {
    database: String,
    options: Options,
}

impl Command for CreateCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["dbcr"]
    }

    fn description(&self) -> &'static str {
        "Create a database"
    }

    fn configure(&mut self, arguments: &Arguments, options: &Options) {
        self.database = arguments.get_or("database", DEFAULT_CONNECTION).to_string();
        self.options = options.clone();
    }

    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        let flags = context.flags().overlay(&self.options);
        let connection = context.config().connection(&self.database)?;

        let status = context.run_commands([RequestDescriptor::new(query::NAME)
            .argument(
                "query",
                format!("CREATE DATABASE IF NOT EXISTS {}", connection.database),
            )
            .option("database", self.database.clone())
            .option("learning", flags.learning)])?;

        if status != 0 {
            return Ok(1);
        }

        context
            .io()
            .success(&format!("Database {} created", connection.database));

        Ok(0)
    }
}
