//! CLI module for sitectl
//!
//! Provides command-line interface using clap.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::orchestration::{GlobalFlags, RequestDescriptor};
use commands::*;

/// sitectl - Site administration from the command line
#[derive(Parser)]
#[command(name = "sitectl")]
#[command(author = "sitectl Contributors")]
#[command(version)]
#[command(about = "Create, drop and restore site databases and scaffold environment files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output result messages in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Never ask interactive questions
    #[arg(short, long, global = true)]
    pub no_interaction: bool,

    /// Show the queries and commands being run
    #[arg(short, long, global = true)]
    pub learning: bool,

    /// Site root directory
    #[arg(long, global = true, default_value = ".", env = "SITECTL_ROOT")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Database commands
    #[command(visible_alias = "db")]
    Database(database::DatabaseArgs),

    /// Environment file commands
    Dotenv(dotenv::DotenvArgs),

    /// Execute an external command from the site root
    Exec(exec::ExecArgs),

    /// List available commands
    List,
}

impl Cli {
    pub fn flags(&self) -> GlobalFlags {
        GlobalFlags {
            yes: self.yes,
            no_interaction: self.no_interaction,
            learning: self.learning,
        }
    }
}

impl Commands {
    /// The request the runner executes for this invocation
    pub fn into_request(self) -> RequestDescriptor {
        match self {
            Commands::Database(args) => args.into_request(),
            Commands::Dotenv(args) => args.into_request(),
            Commands::Exec(args) => args.into_request(),
            Commands::List => RequestDescriptor::new(list::NAME),
        }
    }
}
