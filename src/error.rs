//! Error types for the pitch pipe
//!
//! Lookup misses are reported as `OutOfRange`, but the state transitions treat
//! them as a boundary clamp and never surface them to the user. Audio errors
//! are reported at play time.

use thiserror::Error;

use crate::models::clef::Clef;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PitchPipeError {
    /// The staff position has no entry in the clef's pitch table
    #[error("Staff position {position} is out of range for the {clef} clef")]
    OutOfRange { clef: Clef, position: i32 },

    /// The host has no audio synthesis facility (no Web Audio)
    #[error("Web Audio API is not supported in this environment")]
    AudioUnavailable,

    /// A Web Audio call failed after the capability check passed
    #[error("Audio playback failed: {0}")]
    Audio(String),

    /// A control value from the page did not name a known option
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The notation surface failed to draw or returned unusable geometry
    #[error("Staff rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, PitchPipeError>;
