// src/writer.rs

//! One-shot "write this string to that file" helper.

use std::path::Path;

use anyhow::anyhow;
use tracing::{debug, error, info};

use crate::errors::{ProcsyncError, Result};
use crate::fs::FileSystem;

/// Write `contents` to `path`, replacing whatever was there.
///
/// Returns the number of bytes written.
pub fn write_string(fs: &dyn FileSystem, path: &Path, contents: &str) -> Result<usize> {
    if path.as_os_str().is_empty() {
        error!("no output file given");
        return Err(ProcsyncError::Other(anyhow!(
            "output file path must not be empty"
        )));
    }

    let bytes = contents.as_bytes();
    debug!(path = ?path, len = bytes.len(), "writing string");

    if let Err(err) = fs.write(path, bytes) {
        error!(path = ?path, error = %err, "failed to write string");
        return Err(ProcsyncError::Other(err));
    }

    info!(path = ?path, bytes = bytes.len(), "wrote string to file");
    Ok(bytes.len())
}
