//=========================================================================
// Audio Settings
//=========================================================================
//
// Volume configuration applied to pooled emitters on acquire.
//
// Every value lives in [0, 1]; out-of-range input is clamped and NaN
// is treated as silence.
//
//=========================================================================

//=== AudioSettings =======================================================

/// Mixer volumes and crossfade time.
///
/// Sound-effect pools only read [`sfx_gain`](Self::sfx_gain). Music and UI
/// volumes and the crossfade duration are carried for the host's music
/// and UI mixers, reachable through [`AudioPool::settings`].
///
/// [`AudioPool::settings`]: super::AudioPool::settings
///
/// # Default Values
///
/// All volumes and the crossfade duration default to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    ui_volume: f32,
    crossfade_duration: f32,
}

impl AudioSettings {
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 1.0,
            sfx_volume: 1.0,
            ui_volume: 1.0,
            crossfade_duration: 1.0,
        }
    }

    pub fn with_master_volume(mut self, volume: f32) -> Self {
        self.master_volume = clamp_unit(volume);
        self
    }

    pub fn with_music_volume(mut self, volume: f32) -> Self {
        self.music_volume = clamp_unit(volume);
        self
    }

    pub fn with_sfx_volume(mut self, volume: f32) -> Self {
        self.sfx_volume = clamp_unit(volume);
        self
    }

    pub fn with_ui_volume(mut self, volume: f32) -> Self {
        self.ui_volume = clamp_unit(volume);
        self
    }

    /// Crossfade duration in seconds.
    pub fn with_crossfade_duration(mut self, seconds: f32) -> Self {
        self.crossfade_duration = clamp_unit(seconds);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn ui_volume(&self) -> f32 {
        self.ui_volume
    }

    pub fn crossfade_duration(&self) -> f32 {
        self.crossfade_duration
    }

    /// Effective gain for sound effects: master × sfx.
    pub fn sfx_gain(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
