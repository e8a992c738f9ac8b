//=========================================================================
// Pool Handles
//=========================================================================
//
// Generational handles naming instances lent out by a pool.
//
// Architecture:
//   PoolHandle { pool, index, generation }
//       pool       → which ResourcePool issued it (process-unique)
//       index      → slot in the pool's outstanding slab
//       generation → bumped every time the slot is vacated
//
// A handle validates only while its instance is outstanding. Once the
// instance is released or evicted the slot generation moves on, so a
// stale copy of the handle can never reach the slot's next occupant.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== PoolId ==============================================================

/// Process-unique identifier of a pool instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u64);

impl PoolId {
    /// Allocates the next unused pool id.
    pub(crate) fn next() -> Self {
        static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

//=== PoolHandle ==========================================================

/// Handle to an instance currently lent out by a pool.
///
/// Handles are `Copy` so deferred callbacks can hold on to them cheaply.
/// Holding a handle does not keep anything alive: every access goes
/// through the pool, which rejects handles that are no longer outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    pool: PoolId,
    index: u32,
    generation: u32,
}

impl PoolHandle {
    pub(crate) fn new(pool: PoolId, index: u32, generation: u32) -> Self {
        Self {
            pool,
            index,
            generation,
        }
    }

    /// Returns the id of the pool that issued this handle.
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    pub(crate) fn index(&self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for PoolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}v{}", self.pool.0, self.index, self.generation)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
