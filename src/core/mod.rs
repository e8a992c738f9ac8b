//=========================================================================
// Core Systems
//
// Engine-agnostic pooling primitives.
//
// Components:
// - `pool`: the resource pool, its factory contract, handles and errors
// - `scheduler`: deferred and cross-thread release paths
//
// Everything here runs on the caller's thread; nothing spawns threads
// or blocks except `SharedPool` locking and bounded release channels.
//
//=========================================================================

pub mod pool;
pub mod scheduler;
