//! JSON output for CLI commands
//!
//! Every command writes exactly one JSON object to stdout:
//! `{"status":"ok","data":...}` on success, or
//! `{"status":"error","code":...,"message":...}` on failure.

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&mut io::stdout(), &json!({ "status": "ok", "data": data }))
}

pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_value(
        &mut io::stdout(),
        &json!({ "status": "error", "code": code, "message": message }),
    )
}

fn write_value<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
