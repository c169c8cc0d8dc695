//! Audio synthesis for the pitch pipe
//!
//! - `frequency`: pitch index and frequency conversions
//! - `synth`: tone construction and the `ToneGenerator` seam
//! - `web`: Web Audio implementation used in the browser

pub mod frequency;
pub mod synth;
pub mod web;

pub use synth::{play_note, play_pitch, Tone, ToneGenerator, Waveform};
pub use web::WebAudioToneGenerator;
