//! Serialized per-job status lines.
//!
//! Workers report concurrently; each line must come out whole. Reports use
//! dedicated sinks (stdout/stderr in production, buffers in tests) so they
//! stay separate from tracing output.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::manifest::DownloadJob;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes one line per pipeline event. Clones share the same sinks, so
/// lines from different workers never interleave mid-line.
#[derive(Clone)]
pub struct Reporter {
    out: Sink,
    err: Sink,
}

impl Reporter {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            err: Arc::new(Mutex::new(err)),
        }
    }

    /// Successes to stdout, failures and warnings to stderr.
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn success(&self, job: &DownloadJob) {
        write_line(
            &self.out,
            format_args!("Downloaded {} -> {}", job.url, job.destination.display()),
        );
    }

    pub fn failure(&self, job: &DownloadJob, cause: &dyn fmt::Display) {
        write_line(
            &self.err,
            format_args!("Failed to download {}: {}", job.url, cause),
        );
    }

    pub fn malformed(&self, line: &str) {
        write_line(&self.err, format_args!("Invalid input line: {}", line));
    }
}

// Report IO must never take a worker down; write errors are dropped.
fn write_line(sink: &Sink, args: fmt::Arguments<'_>) {
    let mut w = sink.lock().unwrap();
    let _ = writeln!(w, "{}", args);
    let _ = w.flush();
}
