//=========================================================================
// Resource Pool
//=========================================================================
//
// Bounded pool of reusable instances with a factory-driven lifecycle.
//
// Architecture:
//   ResourcePool<T, F>
//     ├─ idle:  Vec<T>          LIFO stack, bounded by max_idle_capacity
//     ├─ slots: Vec<Slot<T>>    outstanding instances, addressed by handle
//     └─ factory: F             create / on_acquire / on_release / on_evict
//
// Flow:
//   acquire() → idle.pop() or create() → slot → on_acquire() → handle
//   release(handle) → slot.take() → on_release() → idle.push() or on_evict()
//
// Every instance lives in exactly one of `idle` or `slots`. Container
// membership is committed before the hook runs, so a panicking hook
// leaves the bookkeeping in the state the caller observed.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::config::PoolConfig;
use super::error::PoolError;
use super::factory::ResourceFactory;
use super::handle::{PoolHandle, PoolId};

//=== ReleaseOutcome ======================================================

/// What happened to an instance after a successful release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Returned to the idle set for reuse.
    Pooled,

    /// Idle set was full; the instance was evicted.
    Evicted,
}

//=== PoolStats ===========================================================

/// Snapshot of pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Instances available for reuse.
    pub idle: usize,

    /// Instances currently lent out.
    pub outstanding: usize,

    /// Instances ever created by the factory. Never decremented.
    pub total_created: usize,

    /// Instances permanently discarded. Never decremented.
    pub total_evicted: usize,
}

//=== Slot ================================================================

struct Slot<T> {
    generation: u32,
    resource: Option<T>,
}

//=== ResourcePool ========================================================

/// Generic bounded pool with acquire/release lifecycle hooks.
///
/// Instances are lent out through [`PoolHandle`]s and accessed with
/// [`get`](Self::get) / [`get_mut`](Self::get_mut) while outstanding.
///
/// # Examples
///
/// ```rust
/// use aetheric_pool::core::pool::{CreationError, FnFactory, PoolConfig, ResourcePool};
///
/// let factory = FnFactory::new(|| Ok::<_, CreationError>(String::with_capacity(64)));
/// let mut pool = ResourcePool::new(factory, PoolConfig::new("strings")).unwrap();
///
/// let handle = pool.acquire().unwrap();
/// pool.get_mut(handle).unwrap().push_str("hello");
/// pool.release(handle).unwrap();
///
/// assert_eq!(pool.idle_count(), 1);
/// assert!(pool.release(handle).is_err());
/// ```
pub struct ResourcePool<T, F: ResourceFactory<T>> {
    id: PoolId,
    config: PoolConfig,
    factory: F,
    idle: Vec<T>,
    slots: Vec<Slot<T>>,
    free_slots: Vec<u32>,
    outstanding: usize,
    total_created: usize,
    total_evicted: usize,
    disposed: bool,
}

impl<T, F: ResourceFactory<T>> ResourcePool<T, F> {
    //--- Construction -----------------------------------------------------

    /// Creates a pool, pre-warming `default_capacity` instances if the
    /// config asks for it.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Creation`] if pre-warming fails. Instances
    /// created before the failure are evicted with the dropped pool.
    pub fn new(factory: F, config: PoolConfig) -> Result<Self, PoolError> {
        let reserve = config.default_capacity().min(config.max_idle_capacity());

        let mut pool = Self {
            id: PoolId::next(),
            idle: Vec::with_capacity(reserve),
            slots: Vec::with_capacity(reserve),
            free_slots: Vec::new(),
            factory,
            config,
            outstanding: 0,
            total_created: 0,
            total_evicted: 0,
            disposed: false,
        };

        debug!(
            target: "pool",
            "[{}] Pool created (default capacity: {}, max idle: {})",
            pool.config.label(),
            pool.config.default_capacity(),
            pool.config.max_idle_capacity()
        );

        if pool.config.prewarm() {
            let count = pool.config.default_capacity();
            pool.prewarm(count)?;
        }

        Ok(pool)
    }

    //--- Lending ----------------------------------------------------------

    /// Lends out an instance, reusing the most recently idled one if any.
    ///
    /// # Errors
    ///
    /// - [`PoolError::Disposed`] if the pool was disposed.
    /// - [`PoolError::Exhausted`] if `max_outstanding` is reached.
    /// - [`PoolError::Creation`] if the factory fails; state is unchanged.
    pub fn acquire(&mut self) -> Result<PoolHandle, PoolError> {
        self.ensure_live()?;

        if let Some(limit) = self.config.max_outstanding() {
            if self.outstanding >= limit {
                warn!(
                    target: "pool",
                    "[{}] Acquire refused: {} instances outstanding (limit {})",
                    self.config.label(),
                    self.outstanding,
                    limit
                );
                return Err(PoolError::Exhausted { limit });
            }
        }

        let resource = match self.idle.pop() {
            Some(resource) => resource,
            None => {
                let resource = self.factory.create().map_err(|e| {
                    warn!(target: "pool", "[{}] Resource creation failed: {}", self.config.label(), e);
                    PoolError::Creation(e)
                })?;
                self.total_created += 1;
                trace!(
                    target: "pool",
                    "[{}] Created instance #{}",
                    self.config.label(),
                    self.total_created
                );
                resource
            }
        };

        let handle = self.insert_outstanding(resource);

        if let Some(resource) = self.slots[handle.index()].resource.as_mut() {
            self.factory.on_acquire(resource);
        }

        trace!(target: "pool", "[{}] Acquired {}", self.config.label(), handle);
        Ok(handle)
    }

    /// Takes back a lent instance.
    ///
    /// The instance is idled if there is room, otherwise it is evicted.
    /// Either way the handle is invalid afterwards.
    ///
    /// # Errors
    ///
    /// - [`PoolError::Disposed`] if the pool was disposed.
    /// - [`PoolError::NotOwned`] if the handle is not outstanding here
    ///   (double release, stale or foreign handle). Nothing is changed.
    pub fn release(&mut self, handle: PoolHandle) -> Result<ReleaseOutcome, PoolError> {
        self.ensure_live()?;

        let Some(mut resource) = self.take_outstanding(handle) else {
            warn!(
                target: "pool",
                "[{}] Rejected release of {}: not outstanding in this pool",
                self.config.label(),
                handle
            );
            return Err(PoolError::NotOwned { handle });
        };

        self.factory.on_release(&mut resource);

        if self.idle.len() < self.config.max_idle_capacity() {
            self.idle.push(resource);
            trace!(target: "pool", "[{}] Released {} to idle", self.config.label(), handle);
            Ok(ReleaseOutcome::Pooled)
        } else {
            debug!(
                target: "pool",
                "[{}] Idle set full ({}), evicting {}",
                self.config.label(),
                self.idle.len(),
                handle
            );
            self.evict(resource);
            Ok(ReleaseOutcome::Evicted)
        }
    }

    //--- Capacity Management ----------------------------------------------

    /// Creates up to `count` idle instances ahead of demand.
    ///
    /// Bounded by the free room in the idle set. Returns how many
    /// instances were created.
    ///
    /// # Errors
    ///
    /// Stops at the first creation failure and returns it. Instances
    /// created before the failure stay idle.
    pub fn prewarm(&mut self, count: usize) -> Result<usize, PoolError> {
        self.ensure_live()?;

        let room = self.config.max_idle_capacity().saturating_sub(self.idle.len());
        let target = count.min(room);
        if target < count {
            debug!(
                target: "pool",
                "[{}] Prewarm of {} clamped to {} by max idle capacity",
                self.config.label(),
                count,
                target
            );
        }

        self.idle.reserve(target);

        for created in 0..target {
            let mut resource = match self.factory.create() {
                Ok(resource) => resource,
                Err(e) => {
                    warn!(
                        target: "pool",
                        "[{}] Prewarm stopped after {} of {}: {}",
                        self.config.label(),
                        created,
                        target,
                        e
                    );
                    return Err(e.into());
                }
            };
            self.total_created += 1;
            self.factory.on_release(&mut resource);
            self.idle.push(resource);
        }

        debug!(target: "pool", "[{}] Prewarmed {} instances", self.config.label(), target);
        Ok(target)
    }

    /// Evicts every idle instance. Outstanding instances are untouched.
    ///
    /// Returns how many instances were evicted.
    pub fn drain(&mut self) -> Result<usize, PoolError> {
        self.ensure_live()?;

        let evicted = self.evict_idle();
        debug!(target: "pool", "[{}] Drained {} idle instances", self.config.label(), evicted);
        Ok(evicted)
    }

    /// Tears the pool down, evicting idle and outstanding instances.
    ///
    /// Handles still held by callers become invalid; their owners get no
    /// further notification. Every later operation fails with
    /// [`PoolError::Disposed`].
    ///
    /// Returns how many instances were evicted.
    pub fn dispose(&mut self) -> Result<usize, PoolError> {
        self.ensure_live()?;
        self.disposed = true;

        let mut evicted = self.evict_idle();

        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            if let Some(resource) = slot.resource.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.outstanding -= 1;
                self.evict(resource);
                evicted += 1;
            }
        }

        self.slots.clear();
        self.free_slots.clear();

        info!(
            target: "pool",
            "[{}] Pool disposed ({} evicted, {} created in total)",
            self.config.label(),
            evicted,
            self.total_created
        );
        Ok(evicted)
    }

    //--- Access -----------------------------------------------------------

    /// Returns the lent instance named by `handle`.
    pub fn get(&self, handle: PoolHandle) -> Result<&T, PoolError> {
        self.ensure_live()?;
        self.slot(handle)
            .and_then(|slot| slot.resource.as_ref())
            .ok_or(PoolError::NotOwned { handle })
    }

    /// Returns the lent instance named by `handle`, mutably.
    pub fn get_mut(&mut self, handle: PoolHandle) -> Result<&mut T, PoolError> {
        self.ensure_live()?;
        self.slot_mut(handle)
            .and_then(|slot| slot.resource.as_mut())
            .ok_or(PoolError::NotOwned { handle })
    }

    /// Visits every outstanding instance with its handle.
    pub fn for_each_outstanding_mut(&mut self, mut visit: impl FnMut(PoolHandle, &mut T)) {
        let id = self.id;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(resource) = slot.resource.as_mut() {
                visit(PoolHandle::new(id, index as u32, slot.generation), resource);
            }
        }
    }

    /// Returns the handles of every outstanding instance.
    pub fn outstanding_handles(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        let id = self.id;
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.resource.is_some())
            .map(move |(index, slot)| PoolHandle::new(id, index as u32, slot.generation))
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` if `handle` names an instance currently lent out.
    pub fn is_outstanding(&self, handle: PoolHandle) -> bool {
        !self.disposed && self.slot(handle).is_some_and(|slot| slot.resource.is_some())
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    pub fn outstanding_count(&self) -> usize {
        self.outstanding
    }

    pub fn total_created(&self) -> usize {
        self.total_created
    }

    pub fn total_evicted(&self) -> usize {
        self.total_evicted
    }

    /// Returns a snapshot of all counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.idle.len(),
            outstanding: self.outstanding,
            total_created: self.total_created,
            total_evicted: self.total_evicted,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Mutable factory access, e.g. to change settings applied on acquire.
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_live(&self) -> Result<(), PoolError> {
        if self.disposed {
            Err(PoolError::Disposed)
        } else {
            Ok(())
        }
    }

    fn slot(&self, handle: PoolHandle) -> Option<&Slot<T>> {
        if handle.pool() != self.id {
            return None;
        }
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
    }

    fn slot_mut(&mut self, handle: PoolHandle) -> Option<&mut Slot<T>> {
        if handle.pool() != self.id {
            return None;
        }
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
    }

    fn insert_outstanding(&mut self, resource: T) -> PoolHandle {
        self.outstanding += 1;

        if let Some(index) = self.free_slots.pop() {
            let slot = &mut self.slots[index as usize];
            slot.resource = Some(resource);
            return PoolHandle::new(self.id, index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            resource: Some(resource),
        });
        PoolHandle::new(self.id, index, 0)
    }

    fn take_outstanding(&mut self, handle: PoolHandle) -> Option<T> {
        let slot = self.slot_mut(handle)?;
        let resource = slot.resource.take()?;

        // A slot whose generation would wrap is retired, never reused.
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free_slots.push(handle.index() as u32);
            }
            None => debug!(
                target: "pool",
                "[{}] Retiring slot {}: generations exhausted",
                self.config.label(),
                handle.index()
            ),
        }

        self.outstanding -= 1;
        Some(resource)
    }

    fn evict_idle(&mut self) -> usize {
        let mut evicted = 0;
        while let Some(resource) = self.idle.pop() {
            self.evict(resource);
            evicted += 1;
        }
        evicted
    }

    fn evict(&mut self, resource: T) {
        self.total_evicted += 1;
        self.factory.on_evict(resource);
    }
}

//--- Teardown ------------------------------------------------------------

impl<T, F: ResourceFactory<T>> Drop for ResourcePool<T, F> {
    fn drop(&mut self) {
        // Running hooks while unwinding from a hook panic would abort.
        if self.disposed || std::thread::panicking() {
            return;
        }
        if let Ok(evicted) = self.dispose() {
            trace!(target: "pool", "[{}] Dropped with {} evictions", self.config.label(), evicted);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pool::{CreationError, FnFactory};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    //--- Test Helpers -----------------------------------------------------

    #[derive(Debug)]
    struct Probe {
        id: u32,
        uses: u32,
        payload: Option<&'static str>,
    }

    #[derive(Default)]
    struct CountingFactory {
        created: u32,
        acquired: u32,
        released: u32,
        evicted: Vec<u32>,
        fail_next: bool,
        panic_on_acquire: bool,
        panic_on_release: bool,
    }

    impl ResourceFactory<Probe> for CountingFactory {
        fn create(&mut self) -> Result<Probe, CreationError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(CreationError::new("factory offline"));
            }
            self.created += 1;
            Ok(Probe {
                id: self.created,
                uses: 0,
                payload: None,
            })
        }

        fn on_acquire(&mut self, probe: &mut Probe) {
            if self.panic_on_acquire {
                panic!("acquire hook failed");
            }
            self.acquired += 1;
            probe.uses += 1;
        }

        fn on_release(&mut self, probe: &mut Probe) {
            if self.panic_on_release {
                panic!("release hook failed");
            }
            self.released += 1;
            probe.payload = None;
        }

        fn on_evict(&mut self, probe: Probe) {
            self.evicted.push(probe.id);
        }
    }

    fn pool_with(max_idle: usize) -> ResourcePool<Probe, CountingFactory> {
        let config = PoolConfig::new("test").with_max_idle_capacity(max_idle);
        ResourcePool::new(CountingFactory::default(), config).unwrap()
    }

    fn assert_bookkeeping<T, F: ResourceFactory<T>>(pool: &ResourcePool<T, F>) {
        let stats = pool.stats();
        assert!(stats.idle + stats.outstanding <= stats.total_created);
        assert_eq!(stats.idle + stats.outstanding + stats.total_evicted, stats.total_created);
    }

    //=====================================================================
    // Acquire / Release
    //=====================================================================

    #[test]
    fn acquire_creates_when_idle_is_empty() {
        let mut pool = pool_with(4);
        let handle = pool.acquire().unwrap();

        assert_eq!(pool.total_created(), 1);
        assert_eq!(pool.outstanding_count(), 1);
        assert_eq!(pool.idle_count(), 0);
        assert_eq!(pool.get(handle).unwrap().uses, 1);
        assert_eq!(pool.factory().acquired, 1);
    }

    #[test]
    fn acquire_reuses_idle_without_creating() {
        let mut pool = pool_with(4);
        let first = pool.acquire().unwrap();
        pool.release(first).unwrap();

        let second = pool.acquire().unwrap();

        assert_eq!(pool.factory().created, 1, "Idle instance must be reused");
        assert_eq!(pool.get(second).unwrap().id, 1);
        assert_eq!(pool.get(second).unwrap().uses, 2);
        assert_ne!(first, second, "Reused instance gets a fresh handle");
    }

    #[test]
    fn release_runs_hook_and_idles_instance() {
        let mut pool = pool_with(4);
        let handle = pool.acquire().unwrap();
        pool.get_mut(handle).unwrap().payload = Some("explosion.wav");

        assert_eq!(pool.release(handle).unwrap(), ReleaseOutcome::Pooled);
        assert_eq!(pool.factory().released, 1);
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.outstanding_count(), 0);

        let reused = pool.acquire().unwrap();
        assert_eq!(pool.get(reused).unwrap().payload, None, "Release hook must clear payload");
    }

    #[test]
    fn reuse_is_lifo() {
        let mut pool = pool_with(4);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(a).unwrap();
        pool.release(b).unwrap();

        let next = pool.acquire().unwrap();
        assert_eq!(pool.get(next).unwrap().id, 2, "Most recently released comes back first");
    }

    #[test]
    fn outstanding_instances_are_never_aliased() {
        let mut pool = pool_with(4);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();

        assert_ne!(a, b);
        assert_ne!(pool.get(a).unwrap().id, pool.get(b).unwrap().id);
    }

    //=====================================================================
    // Contract Violations
    //=====================================================================

    #[test]
    fn double_release_is_rejected_without_state_change() {
        let mut pool = pool_with(4);
        let handle = pool.acquire().unwrap();
        pool.release(handle).unwrap();
        let before = pool.stats();

        let err = pool.release(handle).unwrap_err();

        assert!(matches!(err, PoolError::NotOwned { handle: h } if h == handle));
        assert_eq!(pool.stats(), before);
        assert_eq!(pool.factory().released, 1, "Hook must not run for rejected release");
    }

    #[test]
    fn stale_handle_does_not_reach_slot_reuse() {
        let mut pool = pool_with(4);
        let stale = pool.acquire().unwrap();
        pool.release(stale).unwrap();
        let fresh = pool.acquire().unwrap();

        assert!(pool.get(stale).is_err());
        assert!(pool.release(stale).is_err());
        assert!(pool.is_outstanding(fresh));
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let mut ours = pool_with(4);
        let mut theirs = pool_with(4);
        let _own = ours.acquire().unwrap();
        let foreign = theirs.acquire().unwrap();

        assert!(matches!(ours.release(foreign), Err(PoolError::NotOwned { .. })));
        assert_eq!(ours.outstanding_count(), 1);
        assert!(theirs.is_outstanding(foreign));
    }

    #[test]
    fn creation_failure_leaves_state_unchanged() {
        let mut pool = pool_with(4);
        pool.factory_mut().fail_next = true;
        let before = pool.stats();

        let err = pool.acquire().unwrap_err();

        assert!(matches!(err, PoolError::Creation(_)));
        assert_eq!(pool.stats(), before);
        assert_eq!(pool.factory().acquired, 0);

        // Factory recovered, next acquire succeeds.
        assert!(pool.acquire().is_ok());
    }

    #[test]
    fn panicking_hooks_leave_membership_committed() {
        let mut pool = pool_with(4);

        pool.factory_mut().panic_on_acquire = true;
        let acquired = catch_unwind(AssertUnwindSafe(|| pool.acquire()));
        pool.factory_mut().panic_on_acquire = false;

        assert!(acquired.is_err());
        let stats = pool.stats();
        assert_eq!((stats.idle, stats.outstanding, stats.total_created), (0, 1, 1));

        let handle = pool.acquire().unwrap();
        pool.factory_mut().panic_on_release = true;
        let released = catch_unwind(AssertUnwindSafe(|| pool.release(handle)));
        pool.factory_mut().panic_on_release = false;

        assert!(released.is_err());
        assert!(!pool.is_outstanding(handle), "Release unregisters before the hook runs");
        let stats = pool.stats();
        assert_eq!(
            (stats.idle, stats.outstanding, stats.total_created, stats.total_evicted),
            (0, 1, 2, 0)
        );

        // The instance orphaned by the acquire panic is still torn down.
        assert_eq!(pool.dispose().unwrap(), 1);
        assert_eq!(pool.factory().evicted, vec![1]);
    }

    #[test]
    fn exhausted_slot_generation_retires_slot() {
        let mut pool = pool_with(4);
        let first = pool.acquire().unwrap();
        pool.release(first).unwrap();
        pool.slots[first.index()].generation = u32::MAX;

        let last = pool.acquire().unwrap();
        assert_eq!(last.index(), first.index());
        assert_eq!(last.generation(), u32::MAX);
        pool.release(last).unwrap();

        let next = pool.acquire().unwrap();
        assert_ne!(next.index(), last.index(), "Retired slot must not be reused");
        assert!(!pool.is_outstanding(last));
        assert!(pool.release(last).is_err());
        assert!(pool.is_outstanding(next));
    }

    #[test]
    fn max_outstanding_limits_lending() {
        let config = PoolConfig::new("limited").with_max_outstanding(2);
        let mut pool = ResourcePool::new(CountingFactory::default(), config).unwrap();

        let a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();
        assert!(matches!(pool.acquire(), Err(PoolError::Exhausted { limit: 2 })));

        pool.release(a).unwrap();
        assert!(pool.acquire().is_ok());
    }

    //=====================================================================
    // Capacity & Eviction
    //=====================================================================

    #[test]
    fn release_at_full_idle_evicts_exactly_once() {
        let mut pool = pool_with(1);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(a).unwrap();

        assert_eq!(pool.release(b).unwrap(), ReleaseOutcome::Evicted);
        assert_eq!(pool.factory().evicted, vec![2]);
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.total_evicted(), 1);
    }

    #[test]
    fn overflow_scenario_keeps_first_two_released() {
        let mut pool = pool_with(2);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        let c = pool.acquire().unwrap();
        assert_eq!(pool.total_created(), 3);

        assert_eq!(pool.release(a).unwrap(), ReleaseOutcome::Pooled);
        assert_eq!(pool.release(b).unwrap(), ReleaseOutcome::Pooled);
        assert_eq!(pool.release(c).unwrap(), ReleaseOutcome::Evicted);

        assert_eq!(pool.idle_count(), 2);
        assert_eq!(pool.factory().evicted, vec![3], "Incoming release C is discarded");

        let first = pool.acquire().unwrap();
        let second = pool.acquire().unwrap();
        assert_eq!(pool.get(first).unwrap().id, 2, "B comes back first (LIFO)");
        assert_eq!(pool.get(second).unwrap().id, 1);
    }

    #[test]
    fn prewarm_fills_idle_set() {
        let mut pool = pool_with(8);
        assert_eq!(pool.prewarm(5).unwrap(), 5);

        assert_eq!(pool.idle_count(), 5);
        assert_eq!(pool.total_created(), 5);
        assert_eq!(pool.outstanding_count(), 0);
        assert_eq!(pool.factory().released, 5, "Prewarmed instances are quiesced");
    }

    #[test]
    fn prewarm_is_bounded_by_idle_capacity() {
        let mut pool = pool_with(3);
        let handle = pool.acquire().unwrap();
        pool.release(handle).unwrap();

        assert_eq!(pool.prewarm(10).unwrap(), 2);
        assert_eq!(pool.idle_count(), 3);
    }

    #[test]
    fn prewarm_failure_keeps_created_instances() {
        let mut pool = pool_with(8);
        pool.prewarm(2).unwrap();
        pool.factory_mut().fail_next = true;

        assert!(pool.prewarm(3).is_err());
        assert_eq!(pool.idle_count(), 2);
        assert_bookkeeping(&pool);
    }

    #[test]
    fn config_prewarm_happens_on_construction() {
        let config = PoolConfig::new("warm")
            .with_default_capacity(4)
            .with_max_idle_capacity(3)
            .with_prewarm(true);
        let pool = ResourcePool::new(CountingFactory::default(), config).unwrap();

        assert_eq!(pool.idle_count(), 3, "Prewarm clamps to max idle capacity");
        assert_eq!(pool.total_created(), 3);
    }

    #[test]
    fn drain_evicts_idle_only() {
        let mut pool = pool_with(4);
        pool.prewarm(3).unwrap();
        let held = pool.acquire().unwrap();

        assert_eq!(pool.drain().unwrap(), 2);
        assert_eq!(pool.idle_count(), 0);
        assert!(pool.is_outstanding(held));
        assert_eq!(pool.factory().evicted.len(), 2);
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    #[test]
    fn dispose_evicts_idle_and_outstanding() {
        let mut pool = pool_with(4);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        let held = pool.acquire().unwrap();
        pool.release(a).unwrap();
        pool.release(b).unwrap();

        assert_eq!(pool.dispose().unwrap(), 3);
        assert_eq!(pool.factory().evicted.len(), 3);
        assert_eq!(pool.idle_count(), 0);
        assert_eq!(pool.outstanding_count(), 0);
        assert!(!pool.is_outstanding(held));

        assert!(matches!(pool.acquire(), Err(PoolError::Disposed)));
        assert!(matches!(pool.release(held), Err(PoolError::Disposed)));
        assert!(matches!(pool.get(held), Err(PoolError::Disposed)));
        assert!(matches!(pool.dispose(), Err(PoolError::Disposed)));
    }

    #[test]
    fn drop_evicts_through_factory() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct Tracked(Rc<Cell<u32>>);

        impl ResourceFactory<u32> for Tracked {
            fn create(&mut self) -> Result<u32, CreationError> {
                Ok(0)
            }

            fn on_evict(&mut self, _resource: u32) {
                self.0.set(self.0.get() + 1);
            }
        }

        let evictions = Rc::new(Cell::new(0));
        {
            let mut pool =
                ResourcePool::new(Tracked(Rc::clone(&evictions)), PoolConfig::default()).unwrap();
            pool.prewarm(2).unwrap();
            let _held = pool.acquire().unwrap();
        }

        assert_eq!(evictions.get(), 2);
    }

    //=====================================================================
    // Invariants
    //=====================================================================

    #[test]
    fn bookkeeping_holds_for_mixed_sequences() {
        let mut pool = ResourcePool::new(
            FnFactory::new(|| Ok::<_, CreationError>(0u64)),
            PoolConfig::new("mixed").with_max_idle_capacity(3),
        )
        .unwrap();

        // Deterministic LCG drives the operation mix.
        let mut seed: u32 = 0x2545_f491;
        let mut held: Vec<PoolHandle> = Vec::new();

        for _ in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            match seed % 5 {
                0 | 1 => held.push(pool.acquire().unwrap()),
                2 | 3 if !held.is_empty() => {
                    let handle = held.swap_remove(seed as usize % held.len());
                    pool.release(handle).unwrap();
                }
                4 => {
                    pool.prewarm(1).unwrap();
                }
                _ => {}
            }
            assert_bookkeeping(&pool);
            assert_eq!(pool.outstanding_count(), held.len());
            assert!(pool.idle_count() <= 3);
        }
    }

    #[test]
    fn for_each_outstanding_visits_lent_instances() {
        let mut pool = pool_with(4);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(a).unwrap();

        let mut visited = Vec::new();
        pool.for_each_outstanding_mut(|handle, probe| {
            probe.payload = Some("tick");
            visited.push(handle);
        });

        assert_eq!(visited, vec![b]);
        assert_eq!(pool.outstanding_handles().collect::<Vec<_>>(), vec![b]);
        assert_eq!(pool.get(b).unwrap().payload, Some("tick"));
    }
}
