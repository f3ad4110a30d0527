//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use colored::{ColoredString, Colorize};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing with proper filtering. `RUST_LOG` wins; the verbose
/// flag bumps the default from `info` to `debug`.
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::InvalidArgument(format!("failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn success(msg: &str) -> ColoredString {
        msg.green().bold()
    }

    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn warning(msg: &str) -> ColoredString {
        msg.yellow().bold()
    }

    pub fn highlight(msg: &str) -> ColoredString {
        msg.cyan().bold()
    }

    pub fn dim(msg: &str) -> ColoredString {
        msg.dimmed()
    }
}

/// Read one trimmed line from stdin, printing `label` first.
pub fn prompt(label: &str) -> CliResult<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt with a default used when the answer is empty.
pub fn prompt_with_default(label: &str, default: &str) -> CliResult<String> {
    let answer = prompt(&format!("{} [{}]: ", label, default))?;
    Ok(if answer.is_empty() { default.to_string() } else { answer })
}

/// Yes/no question defaulting to no, like the original scripts' `[y/N]`.
pub fn prompt_yes_no(label: &str) -> CliResult<bool> {
    let answer = prompt(&format!("{} [y/N]: ", label))?;
    Ok(parse_yes(&answer))
}

pub(crate) fn parse_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
