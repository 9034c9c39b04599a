//! Line-oriented download manifest: `<url>\t<destination>` per line.

use std::path::PathBuf;

/// One unit of work: fetch `url` and store the body at `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub url: String,
    pub destination: PathBuf,
}

/// Parses one manifest line. The line splits at the first TAB; everything
/// after it (minus a trailing line ending) is the destination path. Lines
/// without a TAB are malformed and yield `None`.
pub fn parse_line(line: &str) -> Option<DownloadJob> {
    let (url, destination) = line.split_once('\t')?;
    let destination = destination.trim_end_matches(['\r', '\n']);
    Some(DownloadJob {
        url: url.to_string(),
        destination: PathBuf::from(destination),
    })
}
