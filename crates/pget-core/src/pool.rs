//! Fixed pool of download worker threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

use crate::download::{self, TransferOptions};
use crate::manifest::DownloadJob;
use crate::queue::BoundedQueue;
use crate::report::Reporter;

/// Pipeline-wide success/failure tallies, updated by workers.
#[derive(Debug, Default)]
pub struct JobCounters {
    pub succeeded: AtomicU64,
    pub failed: AtomicU64,
}

/// Number of workers that have not yet exited, with a condvar to wait on.
/// Lives under its own lock, decoupled from the queue's.
struct ActiveWorkers {
    count: Mutex<usize>,
    all_done: Condvar,
}

impl ActiveWorkers {
    fn new(count: usize) -> Self {
        Self {
            count: Mutex::new(count),
            all_done: Condvar::new(),
        }
    }

    fn worker_exited(&self) {
        let mut count = self.count.lock().unwrap();
        *count -= 1;
        if *count == 0 {
            self.all_done.notify_all();
        }
    }

    fn wait_idle(&self) {
        let mut count = self.count.lock().unwrap();
        while *count > 0 {
            count = self.all_done.wait(count).unwrap();
        }
    }

    fn active(&self) -> usize {
        *self.count.lock().unwrap()
    }
}

/// Decrements the active count exactly once, even if the worker unwinds.
struct ExitGuard(Arc<ActiveWorkers>);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.0.worker_exited();
    }
}

/// A running set of download workers feeding off one shared queue.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
    active: Arc<ActiveWorkers>,
}

impl WorkerPool {
    /// Spawns `worker_count` threads, each looping pop -> download -> report
    /// until the queue is closed and drained. A failed spawn is a setup
    /// error: the queue is closed and already-running workers are joined
    /// before it is returned.
    pub fn start(
        worker_count: usize,
        queue: Arc<BoundedQueue<DownloadJob>>,
        reporter: Reporter,
        counters: Arc<JobCounters>,
        options: TransferOptions,
    ) -> Result<Self> {
        let active = Arc::new(ActiveWorkers::new(worker_count));
        let mut handles = Vec::with_capacity(worker_count);

        for index in 0..worker_count {
            let guard = ExitGuard(Arc::clone(&active));
            let worker_queue = Arc::clone(&queue);
            let reporter = reporter.clone();
            let counters = Arc::clone(&counters);
            let spawned = thread::Builder::new()
                .name(format!("pget-worker-{index}"))
                .spawn(move || {
                    let _guard = guard;
                    worker_loop(&worker_queue, &reporter, &counters, &options);
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // The failed spawn dropped its guard already; workers
                    // that were never attempted must not be waited for.
                    for _ in index + 1..worker_count {
                        active.worker_exited();
                    }
                    queue.close();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(e).context("failed to spawn download worker");
                }
            }
        }

        Ok(Self { handles, active })
    }

    /// Blocks until every worker has exited, then joins the threads to
    /// reclaim their resources.
    pub fn await_completion(self) {
        self.active.wait_idle();
        for handle in self.handles {
            handle
                .join()
                .unwrap_or_else(|e| panic!("download worker panicked: {:?}", e));
        }
    }

    /// Workers that have not yet exited.
    pub fn active_workers(&self) -> usize {
        self.active.active()
    }
}

fn worker_loop(
    queue: &BoundedQueue<DownloadJob>,
    reporter: &Reporter,
    counters: &JobCounters,
    options: &TransferOptions,
) {
    while let Some(job) = queue.pop() {
        match download::download_job(&job, options) {
            Ok(()) => {
                counters.succeeded.fetch_add(1, Ordering::Relaxed);
                reporter.success(&job);
            }
            Err(err) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("download failed for {}: {}", job.url, err);
                reporter.failure(&job, &err);
            }
        }
    }
}
