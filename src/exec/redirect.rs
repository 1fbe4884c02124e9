// src/exec/redirect.rs

//! Executor variant that sends the child's stdout into a file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::errors::ExecError;
use crate::exec::command::{build_command, collapse, spawn_and_wait};
use crate::exec::{CommandSpec, ExecOutcome};
use crate::types::FileMode;

/// File that receives a child's standard output.
///
/// Opened write-only with create + truncate. The permission bits only take
/// effect when the file is created (and are subject to the process umask).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    path: PathBuf,
    mode: FileMode,
}

impl RedirectTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: FileMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    fn open(&self) -> std::io::Result<File> {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(self.mode.bits());
        }

        opts.open(&self.path)
    }
}

/// Run `spec` with stdout bound to `target` and report a pass/fail outcome.
///
/// If the target cannot be opened or bound, no child is spawned.
pub async fn execute_redirected(target: &RedirectTarget, spec: &CommandSpec) -> ExecOutcome {
    collapse(spec, try_execute_redirected(target, spec).await)
}

/// Same as [`execute_redirected`] but hands back the detailed error.
pub async fn try_execute_redirected(
    target: &RedirectTarget,
    spec: &CommandSpec,
) -> Result<(), ExecError> {
    // Validate first so a bad spec never truncates the target.
    let program = spec.validate()?;

    let file = target.open().map_err(|source| ExecError::RedirectOpen {
        path: target.path.clone(),
        source,
    })?;

    debug!(path = ?target.path, mode = %target.mode, "opened redirect target");

    // The child gets its own descriptor; the parent's stdout is untouched.
    let child_stdout = file.try_clone().map_err(|source| ExecError::RedirectBind {
        path: target.path.clone(),
        source,
    })?;

    let mut cmd = build_command(program, spec);
    cmd.stdout(Stdio::from(child_stdout));

    let result = spawn_and_wait(program, &mut cmd).await;

    // `cmd` still owns the duplicate handed to the child.
    drop(cmd);
    drop(file);
    debug!(path = ?target.path, "closed redirect target");

    result
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::exec::FailureKind;

    #[test]
    fn default_mode_is_0644() {
        let target = RedirectTarget::new("/tmp/out.txt");
        assert_eq!(target.mode().bits(), 0o644);
        assert_eq!(target.path(), Path::new("/tmp/out.txt"));
    }

    #[tokio::test]
    async fn invalid_spec_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.txt");
        std::fs::write(&path, "previous").unwrap();

        let target = RedirectTarget::new(&path);
        let spec = CommandSpec::from_argv(["echo", "hi"]);

        let outcome = execute_redirected(&target, &spec).await;
        assert_eq!(outcome, ExecOutcome::Failed(FailureKind::InvalidCommand));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
    }
}
