//=========================================================================
// Release Scheduling
//=========================================================================
//
// Deferred return-to-pool paths, kept outside the pool so the pool
// itself stays synchronous and non-blocking.
//
// Components:
// - `release_scheduler`: time/condition based release, cancellable by ticket
// - `release_inbox`: release requests from other threads, drained per tick
//
//=========================================================================

//=== Module Declarations =================================================

mod release_inbox;
mod release_scheduler;

//=== Public API ==========================================================

pub use release_inbox::{release_channel, DrainReport, ReleaseInbox, ReleaseSender, MAX_REQUESTS_PER_DRAIN};
pub use release_scheduler::{ReleaseScheduler, ReleaseTicket, TickReport};
