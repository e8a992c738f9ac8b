//=========================================================================
// Release Scheduler
//=========================================================================
//
// Deferred, cancellable return-to-pool driven by the fixed tick.
//
// Architecture:
//   schedule(handle, delay) ──► pending (sorted by due time)
//                                   ↓
//   tick(dt, &mut pool) ──► due entries ──► condition? ──► pool.release()
//
// The scheduler is owned by the subsystem that lends instances out,
// never by the pool. An entry whose pool has been disposed, or whose
// handle is no longer outstanding, fires as a no-op.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::pool::{PoolHandle, ReleaseOutcome, ResourceFactory, ResourcePool};

//=== ReleaseTicket =======================================================

/// Identifies a scheduled release so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReleaseTicket(u64);

//=== TickReport ==========================================================

/// What happened to due entries during one [`ReleaseScheduler::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Entries that returned their instance to the pool.
    pub released: usize,

    /// Of `released`, how many ended in eviction (idle set full).
    pub evicted: usize,

    /// Due entries whose completion condition is not met yet.
    pub waiting: usize,

    /// Entries dropped as no-ops (disposed pool, handle not outstanding).
    pub skipped: usize,

    /// Entries whose release was rejected by the pool.
    pub failed: usize,
}

//=== PendingRelease ======================================================

type ReleaseCondition<T> = Box<dyn FnMut(&T) -> bool + Send>;

struct PendingRelease<T> {
    ticket: ReleaseTicket,
    handle: PoolHandle,
    due: Duration,
    condition: Option<ReleaseCondition<T>>,
}

//=== ReleaseScheduler ====================================================

/// Releases lent instances back to their pool once a delay has elapsed
/// (and, optionally, once a completion condition holds).
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use aetheric_pool::core::pool::{CreationError, FnFactory, PoolConfig, ResourcePool};
/// use aetheric_pool::core::scheduler::ReleaseScheduler;
///
/// let factory = FnFactory::new(|| Ok::<_, CreationError>(0u32));
/// let mut pool = ResourcePool::new(factory, PoolConfig::default()).unwrap();
/// let mut scheduler = ReleaseScheduler::new();
///
/// let handle = pool.acquire().unwrap();
/// scheduler.schedule(handle, Duration::from_millis(500));
///
/// scheduler.tick(Duration::from_millis(250), &mut pool);
/// assert!(pool.is_outstanding(handle));
///
/// scheduler.tick(Duration::from_millis(250), &mut pool);
/// assert!(!pool.is_outstanding(handle));
/// ```
pub struct ReleaseScheduler<T> {
    now: Duration,
    next_ticket: u64,
    pending: Vec<PendingRelease<T>>,
}

impl<T> ReleaseScheduler<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scheduler with its clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_ticket: 0,
            pending: Vec::new(),
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Releases `handle` once `delay` has elapsed.
    pub fn schedule(&mut self, handle: PoolHandle, delay: Duration) -> ReleaseTicket {
        self.insert(handle, delay, None)
    }

    /// Releases `handle` once `delay` has elapsed and `condition` holds.
    ///
    /// The condition is re-polled every tick after the delay until it
    /// returns `true`.
    pub fn schedule_when<C>(&mut self, handle: PoolHandle, delay: Duration, condition: C) -> ReleaseTicket
    where
        C: FnMut(&T) -> bool + Send + 'static,
    {
        self.insert(handle, delay, Some(Box::new(condition)))
    }

    //--- Cancellation -----------------------------------------------------

    /// Cancels a scheduled release. Returns `false` if it already fired
    /// or was cancelled before.
    pub fn cancel(&mut self, ticket: ReleaseTicket) -> bool {
        match self.pending.iter().position(|entry| entry.ticket == ticket) {
            Some(pos) => {
                self.pending.remove(pos);
                trace!(target: "pool::scheduler", "Cancelled {:?}", ticket);
                true
            }
            None => false,
        }
    }

    /// Cancels every scheduled release for `handle`. Returns how many
    /// entries were removed.
    pub fn cancel_handle(&mut self, handle: PoolHandle) -> usize {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.handle != handle);
        before - self.pending.len()
    }

    /// Cancels everything. Used when the owning subsystem shuts down.
    pub fn clear(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        if cancelled > 0 {
            debug!(target: "pool::scheduler", "Cleared {} pending releases", cancelled);
        }
        cancelled
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the clock by `dt` and fires every due entry against `pool`.
    ///
    /// Entries fire in due order; entries due at the same instant fire in
    /// scheduling order.
    pub fn tick<F: ResourceFactory<T>>(&mut self, dt: Duration, pool: &mut ResourcePool<T, F>) -> TickReport {
        self.now += dt;
        let mut report = TickReport::default();

        if pool.is_disposed() {
            if !self.pending.is_empty() {
                debug!(
                    target: "pool::scheduler",
                    "Pool disposed, dropping {} pending releases",
                    self.pending.len()
                );
                report.skipped = self.pending.len();
                self.pending.clear();
            }
            return report;
        }

        let now = self.now;
        let split = self.pending.partition_point(|entry| entry.due <= now);
        let due: Vec<PendingRelease<T>> = self.pending.drain(..split).collect();
        let mut waiting = Vec::new();

        for mut entry in due {
            if !pool.is_outstanding(entry.handle) {
                trace!(
                    target: "pool::scheduler",
                    "{:?} skipped: {} no longer outstanding",
                    entry.ticket,
                    entry.handle
                );
                report.skipped += 1;
                continue;
            }

            if let Some(condition) = entry.condition.as_mut() {
                let ready = pool.get(entry.handle).is_ok_and(|resource| condition(resource));
                if !ready {
                    report.waiting += 1;
                    waiting.push(entry);
                    continue;
                }
            }

            match pool.release(entry.handle) {
                Ok(ReleaseOutcome::Pooled) => report.released += 1,
                Ok(ReleaseOutcome::Evicted) => {
                    report.released += 1;
                    report.evicted += 1;
                }
                Err(e) => {
                    warn!(target: "pool::scheduler", "{:?} failed to release: {}", entry.ticket, e);
                    report.failed += 1;
                }
            }
        }

        // Still-waiting entries were due first; keep them at the front.
        self.pending.splice(0..0, waiting);
        report
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` if `ticket` is still pending.
    pub fn is_scheduled(&self, ticket: ReleaseTicket) -> bool {
        self.pending.iter().any(|entry| entry.ticket == ticket)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total time advanced through [`tick`](Self::tick).
    pub fn now(&self) -> Duration {
        self.now
    }

    //--- Internal Helpers -------------------------------------------------

    fn insert(
        &mut self,
        handle: PoolHandle,
        delay: Duration,
        condition: Option<ReleaseCondition<T>>,
    ) -> ReleaseTicket {
        let ticket = ReleaseTicket(self.next_ticket);
        self.next_ticket += 1;

        let due = self.now + delay;
        let at = self.pending.partition_point(|entry| entry.due <= due);
        self.pending.insert(
            at,
            PendingRelease {
                ticket,
                handle,
                due,
                condition,
            },
        );

        trace!(target: "pool::scheduler", "{:?} scheduled for {} at {:?}", ticket, handle, due);
        ticket
    }
}

impl<T> Default for ReleaseScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ReleaseScheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseScheduler")
            .field("now", &self.now)
            .field("pending", &self.pending.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
