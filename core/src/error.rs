use thiserror::Error;

/// Errors raised while running a simulation session.
///
/// Cursor wraparound is not represented here: it is clamped silently by the
/// signal decoder. Restart requests are control flow, not errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// The render sink handed back a locked region whose row pitch differs
    /// from the configured video geometry. The geometry constant is wrong.
    #[error("texture pitch is {actual} bytes, expected {expected} (width * 4)")]
    PitchMismatch { expected: usize, actual: usize },

    /// The locked region is too small to hold a complete frame.
    #[error("texture region holds {actual} bytes, frame needs {expected}")]
    RegionTooSmall { expected: usize, actual: usize },

    /// A [`crate::config::SimConfig`] value the session cannot run with.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Backend failure inside the render sink (texture lock, copy, present).
    #[error("render sink: {0}")]
    Sink(String),

    /// Writing a frame capture failed.
    #[error("frame capture: {0}")]
    Capture(String),
}
