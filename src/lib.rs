//! Visual Pitch Pipe WASM Module
//!
//! Pick a clef, key signature, staff position and accidental, see the note on
//! a staff and hear it. This crate holds the state, the pitch tables and
//! calculation, the tone synthesis, and the contract with the page's
//! notation library.

pub mod api;
pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod pitch;
pub mod renderers;

// Re-export commonly used types
pub use config::PitchPipeConfig;
pub use controller::PitchPipeController;
pub use error::{PitchPipeError, Result};
pub use models::*;
pub use pitch::{calculate_note, recompute_derived_state, CalculatedNote, DerivedView};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Visual Pitch Pipe WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already initialized: {}", e)));
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
