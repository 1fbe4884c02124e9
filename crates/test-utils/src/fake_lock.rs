use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use procsync::errors::LockError;
use procsync::sync::{BlockingLock, RawLock};

/// Which step a [`FailingLock`] should fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Acquire,
    Release,
}

/// A lock that reports an error on one of its two steps and records every
/// call it receives.
#[derive(Debug)]
pub struct FailingLock {
    fail_on: FailOn,
    calls: Mutex<Vec<&'static str>>,
}

impl FailingLock {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            fail_on,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl RawLock for FailingLock {
    fn acquire(&self) -> Result<(), LockError> {
        self.calls.lock().unwrap().push("acquire");
        match self.fail_on {
            FailOn::Acquire => Err(LockError::Other("injected acquire failure".to_string())),
            FailOn::Release => Ok(()),
        }
    }

    fn release(&self) -> Result<(), LockError> {
        self.calls.lock().unwrap().push("release");
        match self.fail_on {
            FailOn::Release => Err(LockError::Other("injected release failure".to_string())),
            FailOn::Acquire => Ok(()),
        }
    }
}

/// A real [`BlockingLock`] that also tracks how many callers hold it at
/// once and the highest value ever seen.
#[derive(Debug, Default)]
pub struct CountingLock {
    inner: BlockingLock,
    holders: AtomicUsize,
    max_holders: AtomicUsize,
    acquisitions: AtomicUsize,
}

impl CountingLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_holders(&self) -> usize {
        self.max_holders.load(Ordering::SeqCst)
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl RawLock for CountingLock {
    fn acquire(&self) -> Result<(), LockError> {
        self.inner.acquire()?;
        let now = self.holders.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_holders.fetch_max(now, Ordering::SeqCst);
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) -> Result<(), LockError> {
        self.holders.fetch_sub(1, Ordering::SeqCst);
        self.inner.release()
    }
}
