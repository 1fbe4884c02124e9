// src/exec/mod.rs

//! Process execution layer.
//!
//! This module spawns one child process per call using
//! `tokio::process::Command`, waits for it, and folds every way the run can
//! go wrong into a single [`ExecOutcome`].
//!
//! - [`spec`] holds [`CommandSpec`], the argv handed to the executors.
//! - [`command`] runs a spec with inherited stdio (plus the shell variant).
//! - [`redirect`] runs a spec with stdout bound to a [`RedirectTarget`].
//!
//! Detailed failure information ([`ExecError`]) is logged through `tracing`
//! and is also available from the `try_*` variants.
//!
//! [`ExecError`]: crate::errors::ExecError

pub mod command;
pub mod redirect;
pub mod spec;

pub use command::{execute, execute_shell, try_execute};
pub use redirect::{execute_redirected, try_execute_redirected, RedirectTarget};
pub use spec::CommandSpec;

/// Failure class of an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Empty argv or a non-absolute program path.
    InvalidCommand,
    /// Process creation itself failed (systemic).
    Spawn,
    /// The program does not exist or may not be executed.
    NotExecutable,
    /// Retrieving the exit status failed.
    Wait,
    /// The child exited normally with this non-zero code.
    NonZeroExit(u8),
    /// The child was terminated without an exit code (e.g. by a signal).
    Abnormal { signal: Option<i32> },
    RedirectOpen,
    RedirectBind,
}

/// Outcome of one execution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Success,
    Failed(FailureKind),
}

impl ExecOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecOutcome::Success)
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            ExecOutcome::Success => None,
            ExecOutcome::Failed(kind) => Some(*kind),
        }
    }
}

impl From<ExecOutcome> for bool {
    fn from(outcome: ExecOutcome) -> Self {
        outcome.is_success()
    }
}
