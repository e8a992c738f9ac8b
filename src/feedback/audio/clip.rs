//=========================================================================
// Audio Clip
//=========================================================================
//
// Immutable description of a loaded sound, shared between the caller,
// the emitters playing it and the backend.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

//=== AudioClip ===========================================================

/// A loaded sound: a name and its playback length.
///
/// Cheap to clone; the name is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioClip {
    name: Arc<str>,
    length: Duration,
}

impl AudioClip {
    pub fn new(name: impl Into<Arc<str>>, length: Duration) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> Duration {
        self.length
    }
}

impl fmt::Display for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({:.2}s)", self.name, self.length.as_secs_f32())
    }
}
