//=========================================================================
// Resource Factory
//=========================================================================
//
// Capability contract supplied by each pooled resource type.
//
// Lifecycle:
//   create() ──► on_acquire() ──► [lent] ──► on_release() ──► [idle]
//                    ▲                                           │
//                    └───────────────────────────────────────────┘
//   on_evict() when the pool discards an instance for good
//
// Expensive construction lives in `create`/`on_evict`; cheap per-use
// reset lives in `on_acquire`/`on_release`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::error::CreationError;

//=== ResourceFactory =====================================================

/// Creates, resets, quiesces and destroys instances for a pool.
///
/// Only [`create`](Self::create) is required. The hooks default to doing
/// nothing, and [`on_evict`](Self::on_evict) defaults to dropping the
/// instance.
///
/// # Examples
///
/// ```rust
/// use aetheric_pool::core::pool::{CreationError, ResourceFactory};
///
/// struct ScratchBuffers;
///
/// impl ResourceFactory<Vec<u8>> for ScratchBuffers {
///     fn create(&mut self) -> Result<Vec<u8>, CreationError> {
///         Ok(Vec::with_capacity(4096))
///     }
///
///     fn on_release(&mut self, buffer: &mut Vec<u8>) {
///         buffer.clear();
///     }
/// }
/// ```
pub trait ResourceFactory<T> {
    /// Constructs a brand-new instance in a safe default state.
    fn create(&mut self) -> Result<T, CreationError>;

    /// Called once per acquire, before the instance is handed out.
    fn on_acquire(&mut self, _resource: &mut T) {}

    /// Called once per release, before the instance is idled or evicted.
    fn on_release(&mut self, _resource: &mut T) {}

    /// Called when the pool permanently discards an instance.
    fn on_evict(&mut self, resource: T) {
        drop(resource);
    }
}

//=== FnFactory ===========================================================

/// Factory backed by a creation closure, with no-op hooks.
///
/// Convenient for pools of plain values that need no reset logic.
pub struct FnFactory<C> {
    create: C,
}

impl<C> FnFactory<C> {
    /// Wraps a creation closure.
    pub fn new(create: C) -> Self {
        Self { create }
    }
}

impl<T, C> ResourceFactory<T> for FnFactory<C>
where
    C: FnMut() -> Result<T, CreationError>,
{
    fn create(&mut self) -> Result<T, CreationError> {
        (self.create)()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
