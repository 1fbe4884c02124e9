// src/sync/worker.rs

//! Synchronized worker: wait, lock, hold, unlock, report.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::errors::{ProcsyncError, Result};
use crate::sync::RawLock;

static NEXT_WORKER_ID: AtomicUsize = AtomicUsize::new(1);

/// Lifecycle of a worker.
///
/// `Completed` is reached whether or not the lock operations succeeded;
/// [`SyncTask::completed`] says which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    Created = 0,
    WaitingToAcquire = 1,
    Holding = 2,
    Released = 3,
    Completed = 4,
}

impl WorkerState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => WorkerState::Created,
            1 => WorkerState::WaitingToAcquire,
            2 => WorkerState::Holding,
            3 => WorkerState::Released,
            _ => WorkerState::Completed,
        }
    }
}

/// State shared between a worker thread and its [`TaskHandle`].
///
/// The lock is borrowed through an `Arc`; its owner decides its lifetime.
pub struct SyncTask {
    acquire_delay: Duration,
    hold_delay: Duration,
    lock: Arc<dyn RawLock>,
    completed: AtomicBool,
    state: AtomicU8,
}

impl fmt::Debug for SyncTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncTask")
            .field("acquire_delay", &self.acquire_delay)
            .field("hold_delay", &self.hold_delay)
            .field("state", &self.state())
            .field("completed", &self.completed())
            .finish_non_exhaustive()
    }
}

impl SyncTask {
    fn new(lock: Arc<dyn RawLock>, acquire_delay: Duration, hold_delay: Duration) -> Self {
        Self {
            acquire_delay,
            hold_delay,
            lock,
            completed: AtomicBool::new(false),
            state: AtomicU8::new(WorkerState::Created as u8),
        }
    }

    pub fn acquire_delay(&self) -> Duration {
        self.acquire_delay
    }

    pub fn hold_delay(&self) -> Duration {
        self.hold_delay
    }

    /// True once the worker acquired and released the lock without error.
    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    pub fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: WorkerState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Worker body. Never panics on lock errors; they only clear the flag.
    fn run(&self) {
        self.set_state(WorkerState::WaitingToAcquire);
        thread::sleep(self.acquire_delay);

        let clean = match self.lock.acquire() {
            Ok(()) => {
                self.set_state(WorkerState::Holding);
                debug!(hold_ms = self.hold_delay.as_millis() as u64, "lock acquired");
                thread::sleep(self.hold_delay);

                // Leave Holding before giving the lock up so that no two
                // workers are ever observed holding at once.
                self.set_state(WorkerState::Released);
                match self.lock.release() {
                    Ok(()) => {
                        debug!("lock released");
                        true
                    }
                    Err(err) => {
                        error!(error = %err, "failed to release lock");
                        false
                    }
                }
            }
            Err(err) => {
                error!(error = %err, "failed to acquire lock; skipping hold phase");
                false
            }
        };

        self.completed.store(clean, Ordering::Release);
        self.set_state(WorkerState::Completed);
    }
}

/// Handle to a launched worker.
#[derive(Debug)]
pub struct TaskHandle {
    task: Arc<SyncTask>,
    thread: JoinHandle<()>,
}

impl TaskHandle {
    /// Thread name, e.g. `procsync-worker-3`.
    pub fn name(&self) -> Option<&str> {
        self.thread.thread().name()
    }

    /// Shared task state; stays readable after the handle is joined.
    pub fn task(&self) -> Arc<SyncTask> {
        Arc::clone(&self.task)
    }

    pub fn state(&self) -> WorkerState {
        self.task.state()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the worker is done and return its completion flag.
    pub fn join(self) -> Result<bool> {
        self.thread
            .join()
            .map_err(|payload| ProcsyncError::WorkerPanicked(panic_message(payload.as_ref())))?;
        Ok(self.task.completed())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Start a worker that sleeps `acquire_delay`, takes `lock`, holds it for
/// `hold_delay` and releases it.
///
/// Returns as soon as the thread is started. Only a failure to start the
/// thread is reported here; lock errors end up in the completion flag.
pub fn launch(
    lock: Arc<dyn RawLock>,
    acquire_delay: Duration,
    hold_delay: Duration,
) -> Result<TaskHandle> {
    let task = Arc::new(SyncTask::new(lock, acquire_delay, hold_delay));
    let id = NEXT_WORKER_ID.fetch_add(1, Ordering::Relaxed);
    let name = format!("procsync-worker-{id}");

    let worker = Arc::clone(&task);
    let span_name = name.clone();
    let thread = thread::Builder::new()
        .name(name)
        .spawn(move || {
            let span = tracing::info_span!("worker", name = %span_name);
            let _entered = span.enter();
            worker.run();
        })
        .map_err(ProcsyncError::WorkerSpawn)?;

    info!(
        worker = id,
        acquire_ms = acquire_delay.as_millis() as u64,
        hold_ms = hold_delay.as_millis() as u64,
        "worker launched"
    );

    Ok(TaskHandle { task, thread })
}
