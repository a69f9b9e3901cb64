//! sitectl database restore - Recreate a database from a dump file

use std::env;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::commands::exec;
use crate::core::{Connection, Driver, SiteError, SiteResult, DEFAULT_CONNECTION};
use crate::database::import_line;
use crate::orchestration::{
    Arguments, Command, ExecutionContext, ExitStatus, Options, RequestDescriptor,
};

use super::{create, drop};

pub const NAME: &str = "database:restore";

#[derive(Args)]
pub struct RestoreArgs {
    /// Connection key from sitectl.toml
    #[arg(default_value = DEFAULT_CONNECTION)]
    pub database: String,

    /// Dump file to import (.sql or .sql.gz)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl RestoreArgs {
    pub fn into_request(self) -> RequestDescriptor {
        let request = RequestDescriptor::new(NAME).argument("database", self.database);
        match self.file {
            Some(file) => request.option("file", file.to_string_lossy().into_owned()),
            None => request,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RestoreCommand {
    database: String,
    file: Option<String>,
    options: Options,
}

impl RestoreCommand {
    /// Dump path made absolute against the invoking directory
    fn dump_path(file: &str) -> SiteResult<PathBuf> {
        let path = Path::new(file);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()?.join(path)
        };

        if !path.is_file() {
            return Err(SiteError::FileNotFound(path));
        }
        Ok(path)
    }
}

impl Command for RestoreCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["dbr"]
    }

    fn description(&self) -> &'static str {
        "Restore a database from a dump file"
    }

    fn configure(&mut self, arguments: &Arguments, options: &Options) {
        self.database = arguments.get_or("database", DEFAULT_CONNECTION).to_string();
        self.file = options.string("file");
        self.options = options.clone();
    }

    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        let flags = context.flags().overlay(&self.options);
        let connection = context.config().connection(&self.database)?;

        let Some(file) = self.file.as_deref() else {
            context
                .io()
                .error("No dump file given, provide one with --file");
            return Ok(1);
        };
        let dump = Self::dump_path(file)?;
        let dump = dump.to_string_lossy();

        let import = import_line(connection, &dump);
        if flags.learning {
            let masked = Connection {
                password: "******".to_string(),
                ..connection.clone()
            };
            context.io().comment(&import_line(&masked, &dump));
        }

        let import = RequestDescriptor::new(exec::NAME)
            .argument("bin", import)
            .option("learning", false);

        let requests = match connection.driver {
            Driver::Mysql => vec![
                RequestDescriptor::new(drop::NAME)
                    .argument("database", self.database.clone())
                    .option("yes", flags.yes)
                    .option("learning", flags.learning)
                    .option("no-interaction", flags.no_interaction),
                RequestDescriptor::new(create::NAME)
                    .argument("database", self.database.clone())
                    .option("learning", flags.learning)
                    .option("no-interaction", flags.no_interaction),
                import,
            ],
            Driver::Pgsql => vec![import],
        };

        tracing::debug!(
            driver = %connection.driver,
            steps = requests.len(),
            "Restoring {}",
            connection.database
        );

        if context.run_commands(requests)? != 0 {
            return Ok(1);
        }

        context
            .io()
            .success(&format!("Database restored from {}", file));

        Ok(0)
    }
}
