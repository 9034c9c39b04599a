//! One pipeline run: manifest in, downloads out, summary back.

use std::io::BufRead;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::download::TransferOptions;
use crate::manifest;
use crate::pool::{JobCounters, WorkerPool};
use crate::queue::BoundedQueue;
use crate::report::Reporter;

/// Workers used when neither flag nor config says otherwise.
pub const DEFAULT_WORKERS: usize = 4;
/// Hard cap; larger requests are clamped.
pub const MAX_WORKERS: usize = 64;

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: u64,
    pub failed: u64,
    pub malformed: u64,
}

fn effective_workers(requested: usize) -> Result<usize> {
    if requested == 0 {
        bail!("worker count must be at least 1");
    }
    Ok(requested.min(MAX_WORKERS))
}

/// Runs one batch: reads `<url>\t<destination>` lines from `input`,
/// downloads them on `worker_count` parallel workers, and blocks until every
/// accepted job has been attempted. Per-job failures are reported through
/// `reporter` and counted; only setup problems (bad worker count, spawn
/// failure) are errors.
pub fn run_batch<R: BufRead>(
    input: R,
    worker_count: usize,
    reporter: &Reporter,
    options: &TransferOptions,
) -> Result<BatchSummary> {
    let worker_count = effective_workers(worker_count)?;

    // libcurl's process-wide state must be ready before handles are created
    // on worker threads; curl::init is idempotent.
    curl::init();

    let queue = Arc::new(BoundedQueue::new(worker_count * 2));
    let counters = Arc::new(JobCounters::default());
    let pool = WorkerPool::start(
        worker_count,
        Arc::clone(&queue),
        reporter.clone(),
        Arc::clone(&counters),
        *options,
    )?;
    tracing::info!("batch started with {} workers", worker_count);

    let mut malformed = 0u64;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // Treated like end of input; accepted jobs still drain.
                tracing::warn!("stopped reading manifest: {}", e);
                break;
            }
        };
        if line.is_empty() {
            continue;
        }
        match manifest::parse_line(&line) {
            Some(job) => {
                if queue.push(job).is_err() {
                    break;
                }
            }
            None => {
                malformed += 1;
                reporter.malformed(&line);
            }
        }
    }

    queue.close();
    pool.await_completion();

    let summary = BatchSummary {
        succeeded: counters.succeeded.load(Ordering::Relaxed),
        failed: counters.failed.load(Ordering::Relaxed),
        malformed,
    };
    tracing::info!(
        "batch finished: {} downloaded, {} failed, {} invalid lines",
        summary.succeeded,
        summary.failed,
        summary.malformed
    );
    Ok(summary)
}
