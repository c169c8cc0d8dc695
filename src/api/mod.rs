//! Visual Pitch Pipe WASM API
//!
//! This module provides the JavaScript-facing API.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization and error conversion
//! - `pitch_pipe`: The `PitchPipe` object and the selector option lists

pub mod helpers;
pub mod pitch_pipe;

pub use pitch_pipe::{clefs, key_signature_options_js, PitchPipe};
