// src/sync/mod.rs

//! Synchronized worker built on a caller-owned lock.
//!
//! - [`lock`] defines the [`RawLock`] seam and the production
//!   [`BlockingLock`].
//! - [`worker`] contains [`launch`], which starts a worker thread and
//!   returns a [`TaskHandle`] to join it.

pub mod lock;
pub mod worker;

pub use lock::{BlockingLock, RawLock};
pub use worker::{launch, SyncTask, TaskHandle, WorkerState};
