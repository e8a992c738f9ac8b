//=========================================================================
// Pooled Visual Effects
//=========================================================================
//
// Short-lived particle bursts spawned from a pool and despawned on a
// timer.
//
// Architecture:
//   VfxPool
//     ├─ ResourcePool<ParticleEffect, ParticleEffectFactory>
//     └─ ReleaseScheduler<ParticleEffect>   (timed despawns)
//
// Flow:
//   spawn(template, pos, lifetime) → acquire → emit → schedule despawn
//   update(dt)                     → simulate → fire due despawns
//   despawn(h)                     → cancel timer → release now
//
//=========================================================================

//=== Module Declarations =================================================

mod effect;

//=== Public API ==========================================================

pub use effect::{EffectTemplate, Particle, ParticleEffect, ParticleEffectFactory};

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::pool::{PoolConfig, PoolError, PoolHandle, PoolStats, ResourcePool};
use crate::core::scheduler::{ReleaseScheduler, TickReport};

//=== Constants ===========================================================

/// Particles preallocated per effect by [`VfxPool::new`].
pub const DEFAULT_PARTICLE_BUDGET: usize = 64;

//=== VfxPool =============================================================

/// Spawns pooled effects and despawns them after their lifetime.
pub struct VfxPool {
    pool: ResourcePool<ParticleEffect, ParticleEffectFactory>,
    despawns: ReleaseScheduler<ParticleEffect>,
}

impl VfxPool {
    /// Creates a pool labelled `vfx` with [`DEFAULT_PARTICLE_BUDGET`].
    pub fn new() -> Result<Self, PoolError> {
        Self::with_config(ParticleEffectFactory::new(DEFAULT_PARTICLE_BUDGET), PoolConfig::new("vfx"))
    }

    pub fn with_config(factory: ParticleEffectFactory, config: PoolConfig) -> Result<Self, PoolError> {
        let pool = ResourcePool::new(factory, config)?;
        info!(
            target: "feedback::vfx",
            "VFX pool ready ({} particles per effect)",
            pool.factory().particle_budget()
        );
        Ok(Self {
            pool,
            despawns: ReleaseScheduler::new(),
        })
    }

    //--- Spawning ---------------------------------------------------------

    /// Emits `template` at `position` and despawns it after `lifetime`.
    pub fn spawn(&mut self, template: &EffectTemplate, position: [f32; 3], lifetime: Duration) -> Result<PoolHandle, PoolError> {
        let handle = self.pool.acquire().map_err(|e| {
            warn!(target: "feedback::vfx", "Cannot spawn '{}': {}", template.name(), e);
            e
        })?;

        self.pool.get_mut(handle)?.emit(template, position);
        self.despawns.schedule(handle, lifetime);

        debug!(
            target: "feedback::vfx",
            "Spawned '{}' as {} for {:.2}s",
            template.name(),
            handle,
            lifetime.as_secs_f32()
        );
        Ok(handle)
    }

    /// Returns the effect now, cancelling its timer.
    pub fn despawn(&mut self, handle: PoolHandle) -> Result<(), PoolError> {
        self.despawns.cancel_handle(handle);
        self.pool.release(handle)?;
        Ok(())
    }

    /// Despawns every live effect. Returns how many were returned.
    pub fn despawn_all(&mut self) -> usize {
        let handles: Vec<PoolHandle> = self.pool.outstanding_handles().collect();
        handles
            .into_iter()
            .filter(|handle| self.despawn(*handle).is_ok())
            .count()
    }

    //--- Update Loop ------------------------------------------------------

    /// Simulates live effects by `dt`, then despawns the expired ones.
    pub fn update(&mut self, dt: Duration) -> TickReport {
        self.pool.for_each_outstanding_mut(|_, effect| effect.advance(dt));
        self.despawns.tick(dt, &mut self.pool)
    }

    /// Cancels pending despawns and destroys every effect.
    pub fn shutdown(&mut self) -> Result<usize, PoolError> {
        self.despawns.clear();
        let destroyed = self.pool.dispose()?;
        info!(target: "feedback::vfx", "VFX pool shut down ({} effects destroyed)", destroyed);
        Ok(destroyed)
    }

    //--- Query API --------------------------------------------------------

    pub fn effect(&self, handle: PoolHandle) -> Result<&ParticleEffect, PoolError> {
        self.pool.get(handle)
    }

    /// Handles of every live effect.
    pub fn active_effects(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        self.pool.outstanding_handles()
    }

    pub fn active_count(&self) -> usize {
        self.pool.outstanding_count()
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
