//=========================================================================
// Pool System
//=========================================================================
//
// Generic object pooling with a composable resource lifecycle.
//
// Architecture:
//   ResourceFactory<T> (capability, supplied per resource type)
//          ↓
//   ResourcePool<T, F> (single owner, &mut self)
//          ↓
//   SharedPool<T, F>   (Arc<Mutex<..>> for multi-threaded hosts)
//
// Components:
// - `error`: CreationError / PoolError taxonomy
// - `handle`: generational handles for lent instances
// - `factory`: the create / acquire / release / evict contract
// - `config`: constructor-time capacity options
// - `resource_pool`: the pool itself
// - `shared`: mutex-protected pool handle
//
//=========================================================================

//=== Module Declarations =================================================

mod config;
mod error;
mod factory;
mod handle;
mod resource_pool;
mod shared;

//=== Public API ==========================================================

pub use config::PoolConfig;
pub use error::{CreationError, PoolError};
pub use factory::{FnFactory, ResourceFactory};
pub use handle::{PoolHandle, PoolId};
pub use resource_pool::{PoolStats, ReleaseOutcome, ResourcePool};
pub use shared::SharedPool;
