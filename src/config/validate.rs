// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile, WorkerSection};
use crate::errors::{ProcsyncError, Result};
use crate::types::FileMode;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ProcsyncError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let mode = validate_redirect_mode(&raw.redirect.mode)?;
        validate_worker(&raw.worker)?;
        Ok(ConfigFile::new_unchecked(mode, raw.worker))
    }
}

fn validate_redirect_mode(mode: &str) -> Result<FileMode> {
    mode.parse::<FileMode>()
        .map_err(|e| ProcsyncError::InvalidFileMode(format!("[redirect].mode: {e}")))
}

fn validate_worker(worker: &WorkerSection) -> Result<()> {
    if worker.count == 0 {
        return Err(ProcsyncError::ConfigError(
            "[worker].count must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
