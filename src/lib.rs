//=========================================================================
// Aetheric Pool: Library Root
//
// Object pooling and resource lifecycle management for game runtimes.
//
// Responsibilities:
// - Lend reusable instances through generational handles (`ResourcePool`)
// - Delegate creation and reset hooks to a `ResourceFactory`
// - Return instances later, on a timer or condition (`ReleaseScheduler`)
//   or from other threads (`release_channel`)
// - Provide ready-made pools for sound effects and particle bursts
//
// Typical usage:
// ```
// use aetheric_pool::prelude::*;
//
// let factory = FnFactory::new(|| Ok::<_, CreationError>(Vec::<u8>::with_capacity(64)));
// let mut pool = ResourcePool::new(factory, PoolConfig::new("buffers")).unwrap();
//
// let handle = pool.acquire().unwrap();
// pool.get_mut(handle).unwrap().push(1);
// pool.release(handle).unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine-agnostic pool and scheduling primitives.
// `feedback` builds audio and VFX pools on top of them.
//
pub mod core;
pub mod feedback;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::pool::{
    CreationError, PoolConfig, PoolError, PoolHandle, ResourceFactory, ResourcePool, SharedPool,
};
pub use crate::core::scheduler::ReleaseScheduler;
