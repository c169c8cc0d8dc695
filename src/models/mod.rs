//! Models module for the Visual Pitch Pipe
//!
//! This module contains the lookup tables and the state value that the
//! pitch calculation is derived from.

pub mod accidental;
pub mod clef;
pub mod key_signature;
pub mod pitch_pipe_state;

// Re-export commonly used types
pub use accidental::{AccidentalOverride, EffectiveAccidental};
pub use clef::{Clef, Letter, PitchName, StaffPosition};
pub use key_signature::{KeySignatureCount, KeySignatureFamily, KeySignatureName};
pub use pitch_pipe_state::{PitchPipeState, StepDirection};
