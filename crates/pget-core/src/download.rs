//! Single-job download: fetch one URL into one destination file.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::time::Duration;

use curl::easy::Easy;

use crate::manifest::DownloadJob;

/// Transfer knobs applied to every download handle.
#[derive(Debug, Clone, Copy)]
pub struct TransferOptions {
    /// Connection establishment timeout. `None` keeps libcurl's default.
    pub connect_timeout: Option<Duration>,
    /// Redirect-follow cap.
    pub max_redirects: u32,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Some(Duration::from_secs(30)),
            max_redirects: 10,
        }
    }
}

/// Why one download failed. Covers a single job only; setup problems such
/// as worker spawn failures are reported through the pipeline instead.
#[derive(Debug)]
pub enum DownloadError {
    /// The destination's parent directory could not be created.
    Directory(io::Error),
    /// The destination file could not be opened for writing.
    Open(io::Error),
    /// Transport-level failure (DNS, connect, protocol, aborted transfer).
    Curl(curl::Error),
    /// The server answered with a non-success status.
    Http(u32),
    /// A received chunk could not be written to the destination.
    Storage(io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Directory(e) => write!(f, "cannot create directory: {}", e),
            DownloadError::Open(e) => write!(f, "cannot open destination: {}", e),
            DownloadError::Curl(e) => write!(f, "{}", e),
            DownloadError::Http(code) => write!(f, "HTTP {}", code),
            DownloadError::Storage(e) => write!(f, "write failed: {}", e),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Directory(e)
            | DownloadError::Open(e)
            | DownloadError::Storage(e) => Some(e),
            DownloadError::Curl(e) => Some(e),
            DownloadError::Http(_) => None,
        }
    }
}

/// Downloads one job: ensures the parent directories exist, opens the
/// destination with truncation, streams the body into it, and checks the
/// final status. Any failure after the file was created removes the partial
/// artifact before returning.
pub fn download_job(job: &DownloadJob, options: &TransferOptions) -> Result<(), DownloadError> {
    if let Some(parent) = job.destination.parent() {
        fs::create_dir_all(parent).map_err(DownloadError::Directory)?;
    }
    let file = File::create(&job.destination).map_err(DownloadError::Open)?;
    match transfer_to_file(&job.url, file, options) {
        Ok(()) => Ok(()),
        Err(err) => {
            // Never leave a partial artifact behind.
            let _ = fs::remove_file(&job.destination);
            Err(err)
        }
    }
}

fn transfer_to_file(
    url: &str,
    mut file: File,
    options: &TransferOptions,
) -> Result<(), DownloadError> {
    let mut easy = Easy::new();
    easy.url(url).map_err(DownloadError::Curl)?;
    easy.follow_location(true).map_err(DownloadError::Curl)?;
    easy.max_redirections(options.max_redirects)
        .map_err(DownloadError::Curl)?;
    if let Some(timeout) = options.connect_timeout {
        easy.connect_timeout(timeout).map_err(DownloadError::Curl)?;
    }

    // Filled by the write callback; readable only after the transfer drops.
    let mut write_error: Option<io::Error> = None;
    let result = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match file.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // short count aborts the transfer
                }
            })
            .map_err(DownloadError::Curl)?;
        transfer.perform()
    };

    if let Err(e) = result {
        if e.is_write_error() {
            if let Some(io_err) = write_error.take() {
                return Err(DownloadError::Storage(io_err));
            }
        }
        return Err(DownloadError::Curl(e));
    }

    let code = easy.response_code().map_err(DownloadError::Curl)?;
    if code < 200 || code >= 300 {
        return Err(DownloadError::Http(code));
    }
    Ok(())
}
