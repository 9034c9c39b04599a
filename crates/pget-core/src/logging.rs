//! Logging setup. Log lines go to a file under the XDG state home so
//! stdout/stderr stay clean for the per-job report streams.

use std::fs;
use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pget_core=debug,pget_cli=debug"))
}

/// Initializes logging to `$XDG_STATE_HOME/pget/pget.log` (usually
/// `~/.local/state/pget/pget.log`). Fails when the state directory cannot
/// be used; callers should then fall back to [`init_stderr`].
pub fn init() -> Result<()> {
    let dirs = xdg::BaseDirectories::with_prefix("pget")?;
    let path = dirs.place_state_file("pget.log")?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(move || -> Box<dyn io::Write> {
            match file.try_clone() {
                Ok(clone) => Box::new(clone),
                Err(_) => Box::new(io::stderr()),
            }
        })
        .with_ansi(false)
        .init();
    Ok(())
}

/// Stderr logging for when the state directory is unavailable.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
