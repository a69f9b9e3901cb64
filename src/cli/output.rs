//! Output formatting for CLI

use console::style;
use dialoguer::{Confirm, Input};
use serde::Serialize;

use crate::core::{Io, SiteResult};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a generated command in learning mode
pub fn comment(message: &str) {
    println!("{} {}", style("$").dim(), style(message).dim());
}

/// Print a step in a process
pub fn step(number: usize, total: usize, message: &str) {
    println!(
        "{} {}",
        style(format!("[{}/{}]", number, total)).dim(),
        message
    );
}

/// Print JSON output
pub fn json<T: Serialize>(data: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Terminal implementation of [`Io`]
pub struct TerminalIo {
    json: bool,
    quiet: bool,
}

impl TerminalIo {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    fn emit_json(&self, success: bool, message: &str) {
        let payload = serde_json::json!({
            "success": success,
            "message": message,
        });
        if let Err(e) = json(&payload) {
            tracing::warn!("Could not render JSON output: {}", e);
        }
    }
}

impl Io for TerminalIo {
    fn success(&self, message: &str) {
        if self.json {
            self.emit_json(true, message);
        } else {
            success(message);
        }
    }

    fn info(&self, message: &str) {
        if !self.quiet && !self.json {
            info(message);
        }
    }

    fn warning(&self, message: &str) {
        if !self.json {
            warning(message);
        }
    }

    fn error(&self, message: &str) {
        if self.json {
            self.emit_json(false, message);
        } else {
            error(message);
        }
    }

    fn comment(&self, message: &str) {
        if !self.quiet && !self.json {
            comment(message);
        }
    }

    fn step(&self, number: usize, total: usize, message: &str) {
        if !self.quiet && !self.json {
            step(number, total, message);
        }
    }

    fn report(&self, lines: &[String], data: &serde_json::Value) {
        if self.json {
            if let Err(e) = json(data) {
                tracing::warn!("Could not render JSON output: {}", e);
            }
        } else {
            for line in lines {
                println!("{}", line);
            }
        }
    }

    fn confirm(&self, question: &str, default: bool) -> SiteResult<bool> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()?)
    }

    fn ask(&self, question: &str, default: &str) -> SiteResult<String> {
        Ok(Input::new()
            .with_prompt(question)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()?)
    }
}
