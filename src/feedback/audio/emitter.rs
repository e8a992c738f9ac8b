//=========================================================================
// Audio Emitter
//=========================================================================
//
// Pooled sound-effect emitter and the factory that manages its lifecycle.
//
// Lifecycle:
//   create      → backend voice allocated, emitter inactive
//   on_acquire  → activated, 2D, no clip, volume = master × sfx
//   on_release  → playback halted, deactivated
//   on_evict    → backend voice destroyed
//
// The emitter tracks its own playback clock; the backend is only told
// when to start and stop.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{AudioBackend, AudioClip, AudioSettings, VoiceId, VoiceParams};
use crate::core::pool::{CreationError, ResourceFactory};

//=== Constants ===========================================================

const ORIGIN: [f32; 3] = [0.0; 3];

//=== AudioEmitter ========================================================

/// One reusable playback source bound to a backend voice.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEmitter {
    voice: VoiceId,
    active: bool,
    clip: Option<AudioClip>,
    volume: f32,
    spatial_blend: f32,
    position: [f32; 3],
    // Some(elapsed) while playing.
    playhead: Option<Duration>,
}

impl AudioEmitter {
    fn new(voice: VoiceId) -> Self {
        Self {
            voice,
            active: false,
            clip: None,
            volume: 1.0,
            spatial_blend: 0.0,
            position: ORIGIN,
            playhead: None,
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn voice(&self) -> VoiceId {
        self.voice
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Clip assigned by the last `play` since acquisition.
    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn spatial_blend(&self) -> f32 {
        self.spatial_blend
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playhead.is_some()
    }

    /// Time since playback started, `None` when stopped.
    pub fn playback_position(&self) -> Option<Duration> {
        self.playhead
    }

    //--- Playback ---------------------------------------------------------

    /// Places the emitter in the world and makes it fully positional.
    pub(crate) fn place(&mut self, position: [f32; 3]) {
        self.position = position;
        self.spatial_blend = 1.0;
    }

    /// Assigns `clip`, scales the volume and starts the playhead.
    pub(crate) fn begin(&mut self, clip: &AudioClip, volume_scale: f32) -> VoiceParams {
        self.clip = Some(clip.clone());
        self.volume = (self.volume * volume_scale.max(0.0)).min(1.0);
        self.playhead = Some(Duration::ZERO);

        VoiceParams {
            volume: self.volume,
            spatial_blend: self.spatial_blend,
            position: self.position,
        }
    }

    /// Advances the playhead. Playback ends once the clip length is reached.
    pub(crate) fn advance(&mut self, dt: Duration) {
        let Some(elapsed) = self.playhead else {
            return;
        };
        let elapsed = elapsed + dt;
        let length = self.clip.as_ref().map_or(Duration::ZERO, AudioClip::length);

        self.playhead = if elapsed >= length { None } else { Some(elapsed) };
    }

    fn halt(&mut self) {
        self.playhead = None;
    }
}

//=== AudioEmitterFactory =================================================

/// Creates emitters on a backend and resets them between uses.
#[derive(Debug)]
pub struct AudioEmitterFactory<B> {
    backend: B,
    settings: AudioSettings,
}

impl<B: AudioBackend> AudioEmitterFactory<B> {
    pub fn new(backend: B, settings: AudioSettings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Replaces the settings. Takes effect on the next acquisition.
    pub fn set_settings(&mut self, settings: AudioSettings) {
        self.settings = settings;
    }
}

impl<B: AudioBackend> ResourceFactory<AudioEmitter> for AudioEmitterFactory<B> {
    fn create(&mut self) -> Result<AudioEmitter, CreationError> {
        let voice = self
            .backend
            .create_voice()
            .map_err(|e| CreationError::with_source("failed to allocate audio voice", e))?;
        trace!(target: "feedback::audio", "Created emitter on voice {}", voice.raw());
        Ok(AudioEmitter::new(voice))
    }

    fn on_acquire(&mut self, emitter: &mut AudioEmitter) {
        emitter.active = true;
        emitter.spatial_blend = 0.0;
        emitter.position = ORIGIN;
        emitter.clip = None;
        emitter.playhead = None;
        emitter.volume = self.settings.sfx_gain();
        self.backend.set_active(emitter.voice, true);
    }

    fn on_release(&mut self, emitter: &mut AudioEmitter) {
        if emitter.is_playing() {
            self.backend.stop(emitter.voice);
            emitter.halt();
        }
        emitter.active = false;
        self.backend.set_active(emitter.voice, false);
    }

    fn on_evict(&mut self, emitter: AudioEmitter) {
        debug!(target: "feedback::audio", "Destroying emitter on voice {}", emitter.voice.raw());
        self.backend.destroy_voice(emitter.voice);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
