//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_pool::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Pool core
pub use crate::core::pool::{
    CreationError, FnFactory, PoolConfig, PoolError, PoolHandle, PoolStats, ReleaseOutcome, ResourceFactory,
    ResourcePool, SharedPool,
};

// Deferred release
pub use crate::core::scheduler::{release_channel, ReleaseInbox, ReleaseScheduler, ReleaseSender, ReleaseTicket};

// Feedback pools
pub use crate::feedback::audio::{AudioBackend, AudioClip, AudioPool, AudioSettings, HeadlessAudioBackend};
pub use crate::feedback::vfx::{EffectTemplate, VfxPool};
