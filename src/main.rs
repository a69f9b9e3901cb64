//! sitectl - Site administration CLI
//!
//! Creates, drops and restores site databases and scaffolds environment
//! files. Every invocation becomes a request that runs through the same
//! command runner nested commands use.

mod cli;
mod core;
mod database;
mod dotenv;
mod orchestration;
mod process;
mod utils;

use std::env;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::output::TerminalIo;
use crate::cli::Cli;
use crate::core::{Config, SiteResult};
use crate::orchestration::{ExecutionContext, ExitStatus};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let json_output = cli.json;

    let status = match run(cli) {
        Ok(status) => status,
        Err(e) => {
            if json_output {
                let error_json = serde_json::json!({
                    "error": true,
                    "message": e.to_string()
                });
                eprintln!("{}", error_json);
            } else {
                eprintln!("{} {}", console::style("error:").red().bold(), e);
            }
            e.exit_code()
        }
    };

    std::process::exit(status);
}

fn run(cli: Cli) -> SiteResult<ExitStatus> {
    let site_root = if cli.root.is_absolute() {
        cli.root.clone()
    } else {
        env::current_dir()?.join(&cli.root)
    };

    let config = Config::load(&site_root)?;
    let registry = cli::commands::registry();
    let io = TerminalIo::new(cli.json, cli.quiet);

    let mut flags = cli.flags();
    if utils::is_ci() && !flags.no_interaction {
        tracing::debug!("CI environment detected, disabling prompts");
        flags.no_interaction = true;
    }

    let context = ExecutionContext::new(&registry, &io, &config, &site_root, flags);
    let request = cli.command.into_request();
    tracing::debug!(
        command = request.name(),
        registered = registry.len(),
        root = %site_root.display(),
        "Dispatching"
    );

    context.run_commands([request])
}
