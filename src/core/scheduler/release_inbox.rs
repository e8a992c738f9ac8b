//=========================================================================
// Release Inbox
//=========================================================================
//
// Cross-thread release requests with bounded draining on the owner.
//
// Architecture:
//   worker threads → ReleaseSender::request() → crossbeam channel
//                                                     ↓
//   owner thread (tick boundary) → ReleaseInbox::drain_into(&mut pool)
//
// Lets completion signals raised off the owner thread (e.g. a mixer
// reporting a finished voice) return instances without sharing the pool.
// Bounded draining keeps one flood of requests from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::pool::{PoolHandle, ReleaseOutcome, ResourceFactory, ResourcePool};

//=== Constants ===========================================================

/// Maximum requests applied per [`ReleaseInbox::drain_into`] call.
pub const MAX_REQUESTS_PER_DRAIN: usize = 256;

//=== Channel Construction ================================================

/// Creates a connected sender/inbox pair.
///
/// With `Some(capacity)` the channel is bounded and
/// [`ReleaseSender::request`] blocks while it is full.
pub fn release_channel(capacity: Option<usize>) -> (ReleaseSender, ReleaseInbox) {
    let (sender, receiver) = match capacity {
        Some(capacity) => bounded(capacity),
        None => unbounded(),
    };
    (ReleaseSender { sender }, ReleaseInbox { receiver })
}

//=== ReleaseSender =======================================================

/// Sending half, cloneable and usable from any thread.
#[derive(Debug, Clone)]
pub struct ReleaseSender {
    sender: Sender<PoolHandle>,
}

impl ReleaseSender {
    /// Asks the owner thread to release `handle` at its next drain.
    ///
    /// Returns `false` if the inbox has been dropped.
    pub fn request(&self, handle: PoolHandle) -> bool {
        if self.sender.send(handle).is_err() {
            warn!(
                target: "pool::inbox",
                "Inbox disconnected, dropping release request for {}",
                handle
            );
            return false;
        }
        true
    }
}

//=== DrainReport =========================================================

/// Outcome of one [`ReleaseInbox::drain_into`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainReport {
    /// Requests that returned an instance to the pool.
    pub released: usize,

    /// Of `released`, how many ended in eviction.
    pub evicted: usize,

    /// Requests ignored: stale or duplicate handle, or disposed pool.
    pub skipped: usize,

    /// Requests the pool rejected.
    pub failed: usize,

    /// `true` if every sender has been dropped and the queue is empty.
    pub disconnected: bool,
}

//=== ReleaseInbox ========================================================

/// Receiving half, owned by the pool's owner thread.
#[derive(Debug)]
pub struct ReleaseInbox {
    receiver: Receiver<PoolHandle>,
}

impl ReleaseInbox {
    /// Applies pending release requests to `pool`.
    ///
    /// At most [`MAX_REQUESTS_PER_DRAIN`] requests are applied; the rest
    /// wait for the next call.
    pub fn drain_into<T, F: ResourceFactory<T>>(&mut self, pool: &mut ResourcePool<T, F>) -> DrainReport {
        let mut report = DrainReport::default();
        let mut drained = 0;

        while drained < MAX_REQUESTS_PER_DRAIN {
            let handle = match self.receiver.try_recv() {
                Ok(handle) => handle,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    report.disconnected = true;
                    break;
                }
            };
            drained += 1;

            if !pool.is_outstanding(handle) {
                trace!(target: "pool::inbox", "Skipping release of {}: not outstanding", handle);
                report.skipped += 1;
                continue;
            }

            match pool.release(handle) {
                Ok(ReleaseOutcome::Pooled) => report.released += 1,
                Ok(ReleaseOutcome::Evicted) => {
                    report.released += 1;
                    report.evicted += 1;
                }
                Err(e) => {
                    warn!(target: "pool::inbox", "Release of {} failed: {}", handle, e);
                    report.failed += 1;
                }
            }
        }

        if drained >= MAX_REQUESTS_PER_DRAIN && !self.receiver.is_empty() {
            warn!(
                target: "pool::inbox",
                "Release backlog: drained {} requests, {} still queued",
                drained,
                self.receiver.len()
            );
        }

        report
    }

    /// Number of requests waiting to be drained.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
