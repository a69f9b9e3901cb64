//! sitectl database query - Run a query through the database client

use clap::Args;

use crate::core::{SiteResult, DEFAULT_CONNECTION};
use crate::database::ClientInvocation;
use crate::orchestration::{
    Arguments, Command, ExecutionContext, ExitStatus, Options, RequestDescriptor,
};

pub const NAME: &str = "database:query";

#[derive(Args)]
pub struct QueryArgs {
    /// SQL to execute
    pub query: String,

    /// Connection key from sitectl.toml
    #[arg(long, default_value = DEFAULT_CONNECTION)]
    pub database: String,
}

impl QueryArgs {
    pub fn into_request(self) -> RequestDescriptor {
        RequestDescriptor::new(NAME)
            .argument("query", self.query)
            .option("database", self.database)
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCommand {
    query: Option<String>,
    database: Option<String>,
    options: Options,
}

impl Command for QueryCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["dbq"]
    }

    fn description(&self) -> &'static str {
        "Execute a SQL statement directly as argument"
    }

    fn configure(&mut self, arguments: &Arguments, options: &Options) {
        self.query = arguments.get("query").map(str::to_string);
        self.database = options.string("database");
        self.options = options.clone();
    }

    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        let flags = context.flags().overlay(&self.options);

        let query = match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => query,
            _ => {
                context.io().error("No query given");
                return Ok(1);
            }
        };

        let key = self.database.as_deref().unwrap_or(DEFAULT_CONNECTION);
        let connection = context.config().connection(key)?;
        let invocation = ClientInvocation::query(connection, query);

        if flags.learning {
            context.io().comment(&invocation.to_string());
        }

        invocation
            .runner(context.site_root())
            .run_program(invocation.program, &invocation.args)
    }
}
