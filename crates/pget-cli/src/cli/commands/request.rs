//! Request command: one JSON-described request, body printed to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use pget_core::request;

/// Reads the request description from a file or an inline string, performs
/// it, and prints the response body.
pub fn run_request(file: Option<&Path>, json: Option<&str>) -> Result<()> {
    let raw = match (file, json) {
        (Some(path), None) => fs::read_to_string(path)
            .with_context(|| format!("cannot read request file {}", path.display()))?,
        (None, Some(inline)) => inline.to_string(),
        _ => bail!("provide exactly one of --file or --json"),
    };

    let config = request::parse_config(&raw)?;
    let response = request::perform(&config)?;
    tracing::debug!(
        "request returned HTTP {} ({} bytes)",
        response.status,
        response.body.len()
    );

    let mut stdout = io::stdout().lock();
    stdout.write_all(&response.body)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
