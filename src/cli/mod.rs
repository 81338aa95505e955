//! CLI module for histql
//!
//! Provides command-line access to:
//! - prepare: load and prepare a query config
//! - describe-key: render a raw store key
//! - encode-symbol: show a name's encodings

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{describe, encode_symbol, prepare, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};

use crate::observability::{Logger, Severity};

/// Parses process arguments and runs the selected command.
///
/// Errors are also reported on stdout as a JSON error object.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let level = Severity::parse(&cli.log_level).ok_or_else(|| {
        CliError::invalid_argument(format!("Unknown log level '{}'", cli.log_level))
    })?;
    Logger::set_min_severity(level);

    let result = run_command(cli.command);
    if let Err(e) = &result {
        write_error(e)?;
    }
    result
}
