//=========================================================================
// Particle Effect
//=========================================================================
//
// Pooled burst effect with a preallocated particle buffer.
//
// Lifecycle:
//   create      → buffer allocated at the factory's particle budget
//   on_acquire  → activated, buffer emptied (capacity kept)
//   on_release  → emission stopped, buffer emptied, deactivated
//   on_evict    → dropped
//
// Bursts are laid out deterministically on a ring around the origin.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::pool::{CreationError, ResourceFactory};

//=== EffectTemplate ======================================================

/// Describes one kind of burst.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTemplate {
    name: Arc<str>,
    burst: usize,
    particle_lifetime: Duration,
    speed: f32,
}

impl EffectTemplate {
    /// # Default Values
    ///
    /// - `burst`: 16 particles
    /// - `particle_lifetime`: 500ms
    /// - `speed`: 1.0 units/s
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            burst: 16,
            particle_lifetime: Duration::from_millis(500),
            speed: 1.0,
        }
    }

    pub fn with_burst(mut self, burst: usize) -> Self {
        self.burst = burst;
        self
    }

    pub fn with_particle_lifetime(mut self, lifetime: Duration) -> Self {
        assert!(!lifetime.is_zero(), "Particle lifetime must be positive");
        self.particle_lifetime = lifetime;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn burst(&self) -> usize {
        self.burst
    }

    pub fn particle_lifetime(&self) -> Duration {
        self.particle_lifetime
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

//=== Particle ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub age: Duration,
}

//=== ParticleEffect ======================================================

/// A reusable effect instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleEffect {
    id: u32,
    active: bool,
    template: Option<EffectTemplate>,
    origin: [f32; 3],
    budget: usize,
    particles: Vec<Particle>,
    elapsed: Duration,
}

impl ParticleEffect {
    fn new(id: u32, budget: usize) -> Self {
        Self {
            id,
            active: false,
            budget,
            template: None,
            origin: [0.0; 3],
            particles: Vec::with_capacity(budget),
            elapsed: Duration::ZERO,
        }
    }

    //--- Query API --------------------------------------------------------

    /// Factory-assigned id, stable across reuse.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn template(&self) -> Option<&EffectTemplate> {
        self.template.as_ref()
    }

    pub fn origin(&self) -> [f32; 3] {
        self.origin
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Most particles one burst can hold.
    pub fn particle_budget(&self) -> usize {
        self.budget
    }

    pub fn particle_capacity(&self) -> usize {
        self.particles.capacity()
    }

    /// Time since the current burst was emitted.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// `true` while any particle is alive.
    pub fn is_emitting(&self) -> bool {
        !self.particles.is_empty()
    }

    //--- Simulation -------------------------------------------------------

    /// Emits `template`'s burst at `origin`, capped by the particle budget.
    pub(crate) fn emit(&mut self, template: &EffectTemplate, origin: [f32; 3]) {
        self.template = Some(template.clone());
        self.origin = origin;
        self.elapsed = Duration::ZERO;
        self.particles.clear();

        let count = template.burst.min(self.budget);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            self.particles.push(Particle {
                position: origin,
                velocity: [angle.cos() * template.speed, 0.0, angle.sin() * template.speed],
                age: Duration::ZERO,
            });
        }

        trace!(target: "feedback::vfx", "Effect #{} emitted {} particles", self.id, count);
    }

    /// Moves particles and retires the ones past their lifetime.
    pub(crate) fn advance(&mut self, dt: Duration) {
        let Some(lifetime) = self.template.as_ref().map(EffectTemplate::particle_lifetime) else {
            return;
        };
        self.elapsed += dt;

        let step = dt.as_secs_f32();
        for particle in &mut self.particles {
            particle.age += dt;
            for axis in 0..3 {
                particle.position[axis] += particle.velocity[axis] * step;
            }
        }
        self.particles.retain(|particle| particle.age < lifetime);
    }

    fn reset(&mut self) {
        self.particles.clear();
        self.template = None;
        self.elapsed = Duration::ZERO;
    }
}

//=== ParticleEffectFactory ===============================================

/// Creates effects with a fixed particle budget.
#[derive(Debug)]
pub struct ParticleEffectFactory {
    particle_budget: usize,
    next_id: u32,
}

impl ParticleEffectFactory {
    pub fn new(particle_budget: usize) -> Self {
        assert!(particle_budget > 0, "Particle budget must be positive");
        Self {
            particle_budget,
            next_id: 0,
        }
    }

    pub fn particle_budget(&self) -> usize {
        self.particle_budget
    }
}

impl ResourceFactory<ParticleEffect> for ParticleEffectFactory {
    fn create(&mut self) -> Result<ParticleEffect, CreationError> {
        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| CreationError::new("effect id space exhausted"))?;
        Ok(ParticleEffect::new(id, self.particle_budget))
    }

    fn on_acquire(&mut self, effect: &mut ParticleEffect) {
        effect.reset();
        effect.active = true;
    }

    fn on_release(&mut self, effect: &mut ParticleEffect) {
        effect.reset();
        effect.active = false;
    }

    fn on_evict(&mut self, effect: ParticleEffect) {
        debug!(target: "feedback::vfx", "Destroying effect #{}", effect.id);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
