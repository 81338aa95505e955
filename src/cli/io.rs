//! JSON output for the CLI
//!
//! Every command writes exactly one JSON object line to stdout.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&serde_json::json!({
        "status": "ok",
        "data": data
    }))
}

/// Write an error response to stdout
pub fn write_error(error: &CliError) -> CliResult<()> {
    write_json(&error_body(error))
}

fn error_body(error: &CliError) -> Value {
    serde_json::json!({
        "status": "error",
        "code": error.code_str(),
        "message": error.message()
    })
}

fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
