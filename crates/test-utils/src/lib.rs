//! Shared helpers for the `procsync` integration tests.
//!
//! `builders` makes command specs and config files, `fake_lock` has lock
//! doubles for the worker tests.

pub mod builders;
pub mod fake_lock;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Ceiling for any single child process a test waits on. The slowest
/// children in the suite sleep well under a second.
pub const CHILD_TIMEOUT: Duration = Duration::from_secs(5);

/// Route executor and worker logs into the harness capture.
///
/// Filtered by `RUST_LOG` (default `info`). Worker lines carry their
/// `procsync-worker-N` thread name so interleaved holders can be told
/// apart in a failing test's output.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_names(true)
            .init();
    });
}

/// Await an executor call, failing the test if the child hangs past
/// [`CHILD_TIMEOUT`] instead of blocking the whole run.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(CHILD_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("child process still running after {CHILD_TIMEOUT:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procsync::exec::{execute, ExecOutcome};

    #[tokio::test]
    async fn finished_child_passes_its_outcome_through() {
        init_tracing();

        let outcome = with_timeout(execute(&builders::exit_with(0))).await;
        assert_eq!(outcome, ExecOutcome::Success);
    }
}
