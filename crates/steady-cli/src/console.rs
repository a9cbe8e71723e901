//! CLI console utilities

use colored::*;
use steady_core::{SteadyError, UserFriendlyError};

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message to stderr (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.len()).dimmed());
    }

    /// Render a failure, with suggestions when it came from the client
    pub fn report(&self, error: &anyhow::Error) {
        match error.downcast_ref::<SteadyError>() {
            Some(steady) => {
                let friendly = UserFriendlyError::from(steady);
                self.error(&friendly.to_string());
                if self.verbose && !friendly.error_code.is_empty() {
                    eprintln!("{}", format!("[{}]", friendly.error_code).dimmed());
                }
            }
            None => self.error(&format!("{:#}", error)),
        }
    }
}
