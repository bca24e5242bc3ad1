use std::io::Write;

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(data: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_to(&mut out, data, format, pretty)?;
    out.flush()?;
    Ok(())
}

/// NDJSON emits one line per element of the top-level `events` array.
pub fn write_to<W: Write>(
    out: &mut W,
    data: &Value,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(data)?
            } else {
                serde_json::to_string(data)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => {
            let rows = data
                .get("events")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for row in rows {
                writeln!(out, "{}", serde_json::to_string(row)?)?;
            }
        }
    }

    Ok(())
}
