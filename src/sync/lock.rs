// src/sync/lock.rs

//! Lock seam used by the synchronized worker.
//!
//! Workers only need "acquire" and "release" as two separate, fallible
//! steps, so the trait exposes exactly that instead of a guard type. This
//! lets tests plug in locks that fail on either step.

use std::fmt::Debug;

use parking_lot::{Condvar, Mutex};

use crate::errors::LockError;

/// A mutual-exclusion lock with explicit acquire/release.
pub trait RawLock: Send + Sync + Debug {
    /// Block until the lock is held by the caller.
    fn acquire(&self) -> Result<(), LockError>;

    /// Give the lock up. Must only be called by the current holder.
    fn release(&self) -> Result<(), LockError>;
}

/// Blocking lock built on a `parking_lot::Mutex<bool>` and a
/// `parking_lot::Condvar`.
///
/// Unlike a guard-based mutex, ownership is not tied to a scope, so release
/// is its own step and misuse shows up as [`LockError::NotHeld`].
#[derive(Debug, Default)]
pub struct BlockingLock {
    locked: Mutex<bool>,
    available: Condvar,
}

impl BlockingLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of whether somebody currently holds the lock.
    pub fn is_locked(&self) -> bool {
        *self.locked.lock()
    }
}

impl RawLock for BlockingLock {
    fn acquire(&self) -> Result<(), LockError> {
        let mut locked = self.locked.lock();
        self.available.wait_while(&mut locked, |held| *held);
        *locked = true;
        Ok(())
    }

    fn release(&self) -> Result<(), LockError> {
        let mut locked = self.locked.lock();
        if !*locked {
            return Err(LockError::NotHeld);
        }
        *locked = false;
        drop(locked);
        self.available.notify_one();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn acquire_then_release() {
        let lock = BlockingLock::new();
        assert!(!lock.is_locked());

        lock.acquire().unwrap();
        assert!(lock.is_locked());

        lock.release().unwrap();
        assert!(!lock.is_locked());
    }

    #[test]
    fn release_without_holding_is_an_error() {
        let lock = BlockingLock::new();
        assert_eq!(lock.release(), Err(LockError::NotHeld));
    }

    #[test]
    fn second_acquire_blocks_until_release() {
        let lock = Arc::new(BlockingLock::new());
        let entered = Arc::new(AtomicBool::new(false));

        lock.acquire().unwrap();

        let contender = {
            let lock = Arc::clone(&lock);
            let entered = Arc::clone(&entered);
            thread::spawn(move || {
                lock.acquire().unwrap();
                entered.store(true, Ordering::SeqCst);
                lock.release().unwrap();
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!entered.load(Ordering::SeqCst));

        lock.release().unwrap();
        contender.join().unwrap();
        assert!(entered.load(Ordering::SeqCst));
    }

    #[test]
    fn holder_panicking_does_not_wedge_the_lock() {
        let lock = Arc::new(BlockingLock::new());

        let holder = {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                lock.acquire().unwrap();
                panic!("holder died while holding the lock");
            })
        };
        assert!(holder.join().is_err());

        // Still held by the dead thread; an explicit release frees it.
        assert!(lock.is_locked());
        lock.release().unwrap();

        lock.acquire().unwrap();
        assert!(lock.is_locked());
        lock.release().unwrap();
    }
}
