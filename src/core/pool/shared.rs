//=========================================================================
// Shared Pool
//=========================================================================
//
// Mutex-protected pool for hosts where several threads acquire and
// release against the same pool.
//
// Every operation holds the lock across the container mutation and the
// factory hook, so idle/outstanding bookkeeping is never observed
// half-updated.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use parking_lot::Mutex;

//=== Internal Dependencies ===============================================

use super::{PoolError, PoolHandle, PoolStats, ReleaseOutcome, ResourceFactory, ResourcePool};

//=== SharedPool ==========================================================

/// Cloneable, thread-safe handle to a [`ResourcePool`].
///
/// Cloning shares the same pool. The pool is torn down when the last
/// clone is dropped, or earlier via [`dispose`](Self::dispose).
pub struct SharedPool<T, F: ResourceFactory<T>> {
    inner: Arc<Mutex<ResourcePool<T, F>>>,
}

impl<T, F: ResourceFactory<T>> SharedPool<T, F> {
    /// Wraps an existing pool.
    pub fn new(pool: ResourcePool<T, F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    pub fn acquire(&self) -> Result<PoolHandle, PoolError> {
        self.inner.lock().acquire()
    }

    pub fn release(&self, handle: PoolHandle) -> Result<ReleaseOutcome, PoolError> {
        self.inner.lock().release(handle)
    }

    pub fn prewarm(&self, count: usize) -> Result<usize, PoolError> {
        self.inner.lock().prewarm(count)
    }

    pub fn drain(&self) -> Result<usize, PoolError> {
        self.inner.lock().drain()
    }

    pub fn dispose(&self) -> Result<usize, PoolError> {
        self.inner.lock().dispose()
    }

    /// Runs `access` against the lent instance named by `handle`.
    ///
    /// The pool stays locked while `access` runs; do not call back into
    /// the same pool from inside it.
    pub fn with<R>(
        &self,
        handle: PoolHandle,
        access: impl FnOnce(&mut T) -> R,
    ) -> Result<R, PoolError> {
        let mut pool = self.inner.lock();
        let resource = pool.get_mut(handle)?;
        Ok(access(resource))
    }

    /// Runs `access` with exclusive access to the whole pool.
    pub fn lock_with<R>(&self, access: impl FnOnce(&mut ResourcePool<T, F>) -> R) -> R {
        access(&mut self.inner.lock())
    }

    pub fn is_outstanding(&self, handle: PoolHandle) -> bool {
        self.inner.lock().is_outstanding(handle)
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }
}

impl<T, F: ResourceFactory<T>> Clone for SharedPool<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
