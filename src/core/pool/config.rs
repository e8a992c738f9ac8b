//=========================================================================
// Pool Configuration
//=========================================================================
//
// Constructor-time capacity options for a ResourcePool.
//
//   PoolConfig::new("sfx")
//       .with_default_capacity(10)     pre-warm size / initial reservation
//       .with_max_idle_capacity(30)    eviction threshold
//       .with_max_outstanding(64)      optional lending limit
//       .with_prewarm(true)            create default_capacity up front
//
//=========================================================================

//=== PoolConfig ==========================================================

/// Capacity options for a [`ResourcePool`](super::ResourcePool).
///
/// # Default Values
///
/// - **label**: `"pool"`
/// - **default_capacity**: 20
/// - **max_idle_capacity**: 100
/// - **max_outstanding**: unlimited
/// - **prewarm**: `false`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    label: String,
    default_capacity: usize,
    max_idle_capacity: usize,
    max_outstanding: Option<usize>,
    prewarm: bool,
}

impl PoolConfig {
    /// Creates a config with default capacities and the given log label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default_capacity: 20,
            max_idle_capacity: 100,
            max_outstanding: None,
            prewarm: false,
        }
    }

    /// Sets how many instances are reserved, and created when pre-warming.
    ///
    /// Default: 20
    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Sets the maximum number of idle instances kept for reuse.
    ///
    /// Releases beyond this threshold evict the released instance.
    ///
    /// Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_max_idle_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Max idle capacity must be positive");
        self.max_idle_capacity = capacity;
        self
    }

    /// Limits how many instances may be lent out at once.
    ///
    /// # Panics
    ///
    /// Panics if `limit == 0`.
    pub fn with_max_outstanding(mut self, limit: usize) -> Self {
        assert!(limit > 0, "Max outstanding must be positive");
        self.max_outstanding = Some(limit);
        self
    }

    /// Creates `default_capacity` idle instances when the pool is built.
    pub fn with_prewarm(mut self, prewarm: bool) -> Self {
        self.prewarm = prewarm;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    pub fn max_idle_capacity(&self) -> usize {
        self.max_idle_capacity
    }

    pub fn max_outstanding(&self) -> Option<usize> {
        self.max_outstanding
    }

    pub fn prewarm(&self) -> bool {
        self.prewarm
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new("pool")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
