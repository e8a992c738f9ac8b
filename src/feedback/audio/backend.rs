//=========================================================================
// Audio Backend
//=========================================================================
//
// Contract between pooled emitters and whatever actually mixes sound.
//
// The pool only ever talks to voices through this trait, so mixers can
// be swapped (or run headless) without touching pooling code.
//
//   create_voice()  ← ResourceFactory::create
//   set_active()    ← on_acquire / on_release
//   start()/stop()  ← AudioPool::play / on_release
//   destroy_voice() ← on_evict
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::AudioClip;
use crate::core::pool::CreationError;

//=== Voice Types =========================================================

/// Backend-side identifier of a playback voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(u32);

impl VoiceId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Per-playback parameters handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    /// Linear gain in [0, 1].
    pub volume: f32,

    /// 0.0 = 2D, 1.0 = fully positional.
    pub spatial_blend: f32,

    /// World position, used when `spatial_blend > 0`.
    pub position: [f32; 3],
}

//=== AudioBackend ========================================================

/// Voice allocation and playback, implemented by the host's mixer.
pub trait AudioBackend {
    /// Allocates a voice. Fails when the mixer is out of voices.
    fn create_voice(&mut self) -> Result<VoiceId, CreationError>;

    /// Enables or disables a voice without freeing it.
    fn set_active(&mut self, voice: VoiceId, active: bool);

    /// Starts playing `clip` on `voice`.
    fn start(&mut self, voice: VoiceId, clip: &AudioClip, params: VoiceParams);

    /// Halts playback on `voice`.
    fn stop(&mut self, voice: VoiceId);

    /// Frees the voice for good.
    fn destroy_voice(&mut self, voice: VoiceId);
}

//=== HeadlessAudioBackend ================================================

/// State the headless backend keeps per live voice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessVoice {
    pub active: bool,
    pub clip: Option<AudioClip>,
    pub params: Option<VoiceParams>,
}

/// Backend that records voice state without producing sound.
///
/// Used on dedicated servers and in tests. Optionally enforces a voice
/// limit so allocation failures can be exercised.
#[derive(Debug, Default)]
pub struct HeadlessAudioBackend {
    max_voices: Option<usize>,
    next_voice: u32,
    voices: HashMap<VoiceId, HeadlessVoice>,
    started: usize,
    destroyed: usize,
}

impl HeadlessAudioBackend {
    /// Creates a backend with no voice limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that refuses to allocate more than `max_voices`.
    pub fn with_voice_limit(max_voices: usize) -> Self {
        Self {
            max_voices: Some(max_voices),
            ..Self::default()
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn voice(&self, voice: VoiceId) -> Option<&HeadlessVoice> {
        self.voices.get(&voice)
    }

    /// Number of allocated, not yet destroyed voices.
    pub fn live_voices(&self) -> usize {
        self.voices.len()
    }

    /// Total number of `start` calls.
    pub fn started_count(&self) -> usize {
        self.started
    }

    /// Total number of destroyed voices.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl AudioBackend for HeadlessAudioBackend {
    fn create_voice(&mut self) -> Result<VoiceId, CreationError> {
        if let Some(limit) = self.max_voices {
            if self.voices.len() >= limit {
                return Err(CreationError::new(format!("voice limit of {} reached", limit)));
            }
        }

        let voice = VoiceId(self.next_voice);
        self.next_voice += 1;
        self.voices.insert(voice, HeadlessVoice::default());
        trace!(target: "feedback::audio", "Headless voice {} allocated", voice.0);
        Ok(voice)
    }

    fn set_active(&mut self, voice: VoiceId, active: bool) {
        if let Some(state) = self.voices.get_mut(&voice) {
            state.active = active;
        }
    }

    fn start(&mut self, voice: VoiceId, clip: &AudioClip, params: VoiceParams) {
        if let Some(state) = self.voices.get_mut(&voice) {
            state.clip = Some(clip.clone());
            state.params = Some(params);
            self.started += 1;
        }
    }

    fn stop(&mut self, voice: VoiceId) {
        if let Some(state) = self.voices.get_mut(&voice) {
            state.clip = None;
        }
    }

    fn destroy_voice(&mut self, voice: VoiceId) {
        if self.voices.remove(&voice).is_some() {
            self.destroyed += 1;
            debug!(target: "feedback::audio", "Headless voice {} destroyed", voice.0);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
