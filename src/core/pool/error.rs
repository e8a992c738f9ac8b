//=========================================================================
// Pool Errors
//=========================================================================
//
// Error taxonomy for the pooling core.
//
// All variants are programmer-contract violations or factory failures.
// The pool never retries or swallows them; calling subsystems decide
// whether to log, retry, or degrade (e.g. skip a sound effect).
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::handle::PoolHandle;

//=== CreationError =======================================================

/// A factory could not construct a new resource instance.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CreationError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CreationError {
    /// Creates an error with a message and no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping the underlying cause.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

//=== PoolError ===========================================================

/// Errors surfaced by [`ResourcePool`](super::ResourcePool) operations.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The factory failed to create an instance. Pool state is unchanged.
    #[error("resource creation failed: {0}")]
    Creation(#[from] CreationError),

    /// The handle is not currently outstanding in this pool
    /// (double release, stale handle, or handle from another pool).
    #[error("handle {handle} is not outstanding in this pool")]
    NotOwned { handle: PoolHandle },

    /// The pool has been disposed; no further operations are accepted.
    #[error("pool has been disposed")]
    Disposed,

    /// The configured outstanding limit has been reached.
    #[error("pool exhausted: {limit} instances already outstanding")]
    Exhausted { limit: usize },
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("voice limit reached")]
    struct VoiceLimit;

    #[test]
    fn creation_error_displays_message() {
        let err = CreationError::new("no prefab bound");
        assert_eq!(err.to_string(), "no prefab bound");
        assert_eq!(err.message(), "no prefab bound");
        assert!(err.source().is_none());
    }

    #[test]
    fn creation_error_keeps_source() {
        let err = CreationError::with_source("voice allocation failed", VoiceLimit);
        let source = err.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "voice limit reached");
    }

    #[test]
    fn pool_error_wraps_creation_error() {
        let err: PoolError = CreationError::new("out of memory").into();
        assert!(matches!(err, PoolError::Creation(_)));
        assert_eq!(err.to_string(), "resource creation failed: out of memory");
    }

    #[test]
    fn exhausted_reports_limit() {
        let err = PoolError::Exhausted { limit: 4 };
        assert_eq!(err.to_string(), "pool exhausted: 4 instances already outstanding");
    }
}
