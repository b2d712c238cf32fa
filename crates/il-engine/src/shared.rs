//! Thread-safe handle: one exclusive critical section per operation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use il_topology::{BfsRouter, Router};

use crate::Interlocking;

/// Cloneable handle to an [`Interlocking`] behind a mutex.
///
/// Resolution is global (one train's move can depend on another's), so a
/// whole tick runs under the single lock; there is no finer-grained
/// locking.  A poisoned lock is recovered: every tick commits atomically,
/// so the state behind it is always consistent.
#[derive(Debug)]
pub struct SharedInterlocking<R: Router = BfsRouter> {
    inner: Arc<Mutex<Interlocking<R>>>,
}

impl<R: Router> Clone for SharedInterlocking<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: Router> From<Interlocking<R>> for SharedInterlocking<R> {
    fn from(interlocking: Interlocking<R>) -> Self {
        Self::new(interlocking)
    }
}

impl<R: Router> SharedInterlocking<R> {
    pub fn new(interlocking: Interlocking<R>) -> Self {
        Self { inner: Arc::new(Mutex::new(interlocking)) }
    }

    /// Exclusive access for compound operations.
    pub fn lock(&self) -> MutexGuard<'_, Interlocking<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_train(&self, id: &str, entry: i64, exit: i64) -> bool {
        self.lock().add_train(id, entry, exit)
    }

    pub fn move_trains<I, S>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lock().move_trains(ids)
    }

    pub fn get_section(&self, section: i64) -> Option<String> {
        self.lock().get_section(section).map(str::to_owned)
    }

    pub fn get_train(&self, id: &str) -> i64 {
        self.lock().get_train(id)
    }
}
