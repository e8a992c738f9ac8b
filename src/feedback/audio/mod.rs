//=========================================================================
// Pooled Sound Effects
//=========================================================================
//
// One-shot sound effects played from a pool of reusable emitters.
//
// Architecture:
//   AudioPool
//     ├─ ResourcePool<AudioEmitter, AudioEmitterFactory<B>>
//     └─ ReleaseScheduler<AudioEmitter>   (automatic returns)
//
// Flow:
//   play(clip)  → acquire emitter → start voice → schedule return
//   update(dt)  → advance playheads → fire due returns
//   stop(h)     → cancel pending return → release now
//
// An emitter goes back to the pool once its clip length plus
// `RETURN_GRACE` has elapsed and the emitter has stopped playing.
//
//=========================================================================

//=== Module Declarations =================================================

mod backend;
mod clip;
mod emitter;
mod settings;

//=== Public API ==========================================================

pub use backend::{AudioBackend, HeadlessAudioBackend, HeadlessVoice, VoiceId, VoiceParams};
pub use clip::AudioClip;
pub use emitter::{AudioEmitter, AudioEmitterFactory};
pub use settings::AudioSettings;

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::pool::{PoolConfig, PoolError, PoolHandle, PoolStats, ResourcePool};
use crate::core::scheduler::{ReleaseScheduler, TickReport};

//=== Constants ===========================================================

/// Extra time after a clip's length before its emitter may return.
pub const RETURN_GRACE: Duration = Duration::from_millis(100);

/// Emitters kept on hand before the idle set starts to grow.
pub const DEFAULT_EMITTER_CAPACITY: usize = 10;

/// Idle emitters retained; further releases are destroyed.
pub const MAX_IDLE_EMITTERS: usize = 30;

//=== AudioPool ===========================================================

/// Plays one-shot clips on pooled emitters and returns them when done.
pub struct AudioPool<B: AudioBackend> {
    pool: ResourcePool<AudioEmitter, AudioEmitterFactory<B>>,
    returns: ReleaseScheduler<AudioEmitter>,
}

impl<B: AudioBackend> AudioPool<B> {
    /// Creates a pool labelled `sfx` with the default capacities.
    pub fn new(backend: B, settings: AudioSettings) -> Result<Self, PoolError> {
        Self::with_config(backend, settings, Self::default_config())
    }

    pub fn with_config(backend: B, settings: AudioSettings, config: PoolConfig) -> Result<Self, PoolError> {
        let factory = AudioEmitterFactory::new(backend, settings);
        let pool = ResourcePool::new(factory, config)?;

        info!(
            target: "feedback::audio",
            "Audio pool ready (gain {:.2}, idle cap {})",
            settings.sfx_gain(),
            pool.config().max_idle_capacity()
        );

        Ok(Self {
            pool,
            returns: ReleaseScheduler::new(),
        })
    }

    pub fn default_config() -> PoolConfig {
        PoolConfig::new("sfx")
            .with_default_capacity(DEFAULT_EMITTER_CAPACITY)
            .with_max_idle_capacity(MAX_IDLE_EMITTERS)
    }

    //--- Playback ---------------------------------------------------------

    /// Plays `clip` in 2D at `volume_scale` × the configured sfx gain.
    pub fn play(&mut self, clip: &AudioClip, volume_scale: f32) -> Result<PoolHandle, PoolError> {
        self.start(clip, None, volume_scale)
    }

    /// Plays `clip` fully positional at `position`.
    pub fn play_at(&mut self, clip: &AudioClip, position: [f32; 3], volume_scale: f32) -> Result<PoolHandle, PoolError> {
        self.start(clip, Some(position), volume_scale)
    }

    /// Stops playback and returns the emitter now, cancelling its
    /// scheduled return.
    pub fn stop(&mut self, handle: PoolHandle) -> Result<(), PoolError> {
        self.returns.cancel_handle(handle);
        self.pool.release(handle)?;
        debug!(target: "feedback::audio", "Stopped {}", handle);
        Ok(())
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances every playing emitter by `dt`, then returns the ones
    /// that are finished.
    pub fn update(&mut self, dt: Duration) -> TickReport {
        self.pool.for_each_outstanding_mut(|_, emitter| emitter.advance(dt));
        self.returns.tick(dt, &mut self.pool)
    }

    //--- Configuration ----------------------------------------------------

    /// Applies new volumes to emitters acquired from now on.
    pub fn set_settings(&mut self, settings: AudioSettings) {
        self.pool.factory_mut().set_settings(settings);
    }

    pub fn settings(&self) -> &AudioSettings {
        self.pool.factory().settings()
    }

    /// Creates up to `count` emitters ahead of demand.
    pub fn prewarm(&mut self, count: usize) -> Result<usize, PoolError> {
        self.pool.prewarm(count)
    }

    /// Cancels pending returns and destroys every emitter.
    pub fn shutdown(&mut self) -> Result<usize, PoolError> {
        self.returns.clear();
        let destroyed = self.pool.dispose()?;
        info!(target: "feedback::audio", "Audio pool shut down ({} emitters destroyed)", destroyed);
        Ok(destroyed)
    }

    //--- Query API --------------------------------------------------------

    pub fn emitter(&self, handle: PoolHandle) -> Result<&AudioEmitter, PoolError> {
        self.pool.get(handle)
    }

    /// `true` while `handle` is out of the pool and its clip is playing.
    pub fn is_playing(&self, handle: PoolHandle) -> bool {
        self.pool.get(handle).is_ok_and(AudioEmitter::is_playing)
    }

    /// Emitters currently out of the pool.
    pub fn active_count(&self) -> usize {
        self.pool.outstanding_count()
    }

    pub fn pending_returns(&self) -> usize {
        self.returns.pending_count()
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn backend(&self) -> &B {
        self.pool.factory().backend()
    }

    //--- Internal Helpers -------------------------------------------------

    fn start(&mut self, clip: &AudioClip, position: Option<[f32; 3]>, volume_scale: f32) -> Result<PoolHandle, PoolError> {
        let handle = self.pool.acquire().map_err(|e| {
            warn!(target: "feedback::audio", "Cannot play {}: {}", clip, e);
            e
        })?;

        let emitter = self.pool.get_mut(handle)?;
        if let Some(position) = position {
            emitter.place(position);
        }
        let params = emitter.begin(clip, volume_scale);
        let voice = emitter.voice();

        self.pool.factory_mut().backend_mut().start(voice, clip, params);
        self.returns
            .schedule_when(handle, clip.length() + RETURN_GRACE, |emitter: &AudioEmitter| !emitter.is_playing());

        debug!(target: "feedback::audio", "Playing {} on {} at volume {:.2}", clip, handle, params.volume);
        Ok(handle)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
