// src/exec/command.rs

//! Spawn-and-wait protocol shared by every executor.

use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::errors::ExecError;
use crate::exec::{CommandSpec, ExecOutcome, FailureKind};

/// Shell used by [`execute_shell`].
pub const SHELL: &str = "/bin/sh";

/// Run `spec` with inherited stdio and report a pass/fail outcome.
///
/// The outcome is `Success` only if the child was spawned, its status was
/// retrieved, and it exited with code 0. Anything else is logged and
/// reported as `Failed`.
pub async fn execute(spec: &CommandSpec) -> ExecOutcome {
    collapse(spec, try_execute(spec).await)
}

/// Same as [`execute`] but hands back the detailed error.
pub async fn try_execute(spec: &CommandSpec) -> Result<(), ExecError> {
    let program = spec.validate()?;
    let mut cmd = build_command(program, spec);
    spawn_and_wait(program, &mut cmd).await
}

/// Run a command line through `/bin/sh -c`.
///
/// `None` is a failure and spawns nothing. Any string, blank included, is
/// handed to the shell untouched, so `Some("")` succeeds like `sh -c ''`.
pub async fn execute_shell(cmd: Option<&str>) -> ExecOutcome {
    let Some(line) = cmd else {
        let err = ExecError::InvalidCommand("no shell command given".to_string());
        warn!(error = %err, "refusing to run missing shell command");
        return ExecOutcome::Failed(err.kind());
    };

    let spec = CommandSpec::new(SHELL).arg("-c").arg(line);
    execute(&spec).await
}

/// Base command for `spec`: argv applied, stdin inherited, child killed if
/// the waiting future is dropped.
pub(crate) fn build_command(program: &str, spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(spec.arguments())
        .stdin(Stdio::inherit())
        .kill_on_drop(true);
    cmd
}

/// Spawn `cmd`, wait for it and evaluate its exit status.
pub(crate) async fn spawn_and_wait(program: &str, cmd: &mut Command) -> Result<(), ExecError> {
    info!(program, "spawning child process");

    let mut child = cmd.spawn().map_err(|source| spawn_error(program, source))?;

    debug!(program, pid = ?child.id(), "child running; waiting for exit");

    let status = child.wait().await.map_err(|source| ExecError::Wait {
        program: program.to_string(),
        source,
    })?;

    debug!(program, %status, "child exited");

    check_status(program, status)
}

fn spawn_error(program: &str, source: std::io::Error) -> ExecError {
    let program = program.to_string();
    match source.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => {
            ExecError::NotExecutable { program, source }
        }
        // Raised before fork for argv the OS cannot represent.
        ErrorKind::InvalidInput => {
            ExecError::InvalidCommand(format!("'{program}' rejected before spawn: {source}"))
        }
        _ => ExecError::Spawn { program, source },
    }
}

/// Normalize a raw exit status to "code 0-255 or abnormal termination".
fn check_status(program: &str, status: ExitStatus) -> Result<(), ExecError> {
    match status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(ExecError::NonZeroExit {
            program: program.to_string(),
            code: (code & 0xff) as u8,
        }),
        None => Err(ExecError::Abnormal {
            program: program.to_string(),
            signal: termination_signal(&status),
        }),
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Log the detailed result and fold it into an [`ExecOutcome`].
pub(crate) fn collapse(spec: &CommandSpec, result: Result<(), ExecError>) -> ExecOutcome {
    match result {
        Ok(()) => {
            info!(cmd = %spec, "command succeeded");
            ExecOutcome::Success
        }
        Err(ExecError::NonZeroExit { program, code }) => {
            warn!(cmd = %spec, program = %program, exit_code = code, "command exited with non-zero status");
            ExecOutcome::Failed(FailureKind::NonZeroExit(code))
        }
        Err(err) => {
            error!(
                cmd = %spec,
                phase = err.phase(),
                error = %err,
                "command execution error"
            );
            ExecOutcome::Failed(err.kind())
        }
    }
}
