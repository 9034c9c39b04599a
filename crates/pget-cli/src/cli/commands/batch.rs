//! Batch command: run the parallel download pipeline over a manifest.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

use anyhow::{bail, Context, Result};
use pget_core::config::PgetConfig;
use pget_core::pipeline;
use pget_core::report::Reporter;

/// Downloads every manifest line on a pool of parallel workers. Per-job
/// failures are reported on stderr and do not affect the exit status; only
/// setup problems are errors.
pub fn run_batch(cfg: &PgetConfig, threads: Option<usize>, input: Option<&Path>) -> Result<()> {
    let worker_count = threads.unwrap_or(cfg.default_threads);
    if worker_count == 0 {
        bail!("thread count must be a positive integer");
    }

    let reporter = Reporter::stdio();
    let options = cfg.transfer_options();

    let summary = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open manifest {}", path.display()))?;
            pipeline::run_batch(BufReader::new(file), worker_count, &reporter, &options)?
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("no manifest on stdin; pipe `<url>\\t<destination>` lines in or pass --input FILE");
            }
            pipeline::run_batch(stdin.lock(), worker_count, &reporter, &options)?
        }
    };

    tracing::debug!(
        "batch command done ({} ok, {} failed, {} invalid)",
        summary.succeeded,
        summary.failed,
        summary.malformed
    );
    Ok(())
}
