// src/errors.rs

//! Crate-wide error types.
//!
//! - [`ExecError`] describes why a child process run did not succeed. The
//!   executors log it and collapse it into an [`ExecOutcome`].
//! - [`LockError`] is what a [`RawLock`] reports from `acquire`/`release`.
//! - [`ProcsyncError`] is everything else (config, bookkeeping, IO).
//!
//! [`ExecOutcome`]: crate::exec::ExecOutcome
//! [`RawLock`]: crate::sync::RawLock

use std::path::PathBuf;

use thiserror::Error;

use crate::exec::FailureKind;

#[derive(Error, Debug)]
pub enum ProcsyncError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid file mode: {0}")]
    InvalidFileMode(String),

    #[error("Failed to start worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Worker thread panicked: {0}")]
    WorkerPanicked(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a single execution failed.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' could not be executed: {source}")]
    NotExecutable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {code}")]
    NonZeroExit { program: String, code: u8 },

    #[error("'{program}' terminated abnormally (signal {signal:?})")]
    Abnormal {
        program: String,
        signal: Option<i32>,
    },

    #[error("failed to open redirect target {path:?}: {source}")]
    RedirectOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to bind {path:?} to child stdout: {source}")]
    RedirectBind {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExecError {
    /// The collapsed failure class reported to callers.
    pub fn kind(&self) -> FailureKind {
        match self {
            ExecError::InvalidCommand(_) => FailureKind::InvalidCommand,
            ExecError::Spawn { .. } => FailureKind::Spawn,
            ExecError::NotExecutable { .. } => FailureKind::NotExecutable,
            ExecError::Wait { .. } => FailureKind::Wait,
            ExecError::NonZeroExit { code, .. } => FailureKind::NonZeroExit(*code),
            ExecError::Abnormal { signal, .. } => FailureKind::Abnormal { signal: *signal },
            ExecError::RedirectOpen { .. } => FailureKind::RedirectOpen,
            ExecError::RedirectBind { .. } => FailureKind::RedirectBind,
        }
    }

    /// Short name of the phase that failed, used as a log field.
    pub fn phase(&self) -> &'static str {
        match self {
            ExecError::InvalidCommand(_) => "validate",
            ExecError::Spawn { .. } | ExecError::NotExecutable { .. } => "spawn",
            ExecError::Wait { .. } => "wait",
            ExecError::NonZeroExit { .. } | ExecError::Abnormal { .. } => "exit",
            ExecError::RedirectOpen { .. } | ExecError::RedirectBind { .. } => "redirect",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("release called on a lock that is not held")]
    NotHeld,

    #[error("{0}")]
    Other(String),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ProcsyncError>;
