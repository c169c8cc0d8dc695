//! JavaScript-facing pitch pipe object
//!
//! One `PitchPipe` backs one page. Each control handler calls the matching
//! method, which applies the transition and returns the new derived view for
//! display. Control values arrive as the strings used by the page's selectors.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize_or_default, parse_control, respond, serialize, to_js_error};
use crate::audio::web::WebAudioToneGenerator;
use crate::config::PitchPipeConfig;
use crate::controller::PitchPipeController;
use crate::models::clef::{Clef, StaffPosition};
use crate::models::key_signature::{key_signature_options, KeySignatureCount};
use crate::renderers::js_surface::JsNotationSurface;

#[wasm_bindgen]
pub struct PitchPipe {
    controller: PitchPipeController,
    audio: WebAudioToneGenerator,
}

#[wasm_bindgen]
impl PitchPipe {
    /// Create a pitch pipe; `config` may be omitted or partial
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PitchPipe, JsValue> {
        let config: PitchPipeConfig = deserialize_or_default(config, "Invalid pitch pipe config")?;
        log::info!("pitch pipe created ({:?} tone, {} Hz reference)", config.tone.waveform, config.tone.reference_hz);
        Ok(PitchPipe {
            controller: PitchPipeController::new(config),
            audio: WebAudioToneGenerator::new(),
        })
    }

    /// Current derived view
    pub fn view(&self) -> Result<JsValue, JsValue> {
        respond(self.controller.view(), "Failed to serialize view")
    }

    /// Current raw state (the five primitives)
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serialize(self.controller.state(), "Failed to serialize state")
    }

    #[wasm_bindgen(js_name = setClef)]
    pub fn set_clef(&mut self, clef: &str) -> Result<JsValue, JsValue> {
        let clef = parse_control(clef)?;
        respond(self.controller.set_clef(clef), "Failed to serialize view")
    }

    #[wasm_bindgen(js_name = setKeySignatureFamily)]
    pub fn set_key_signature_family(&mut self, family: &str) -> Result<JsValue, JsValue> {
        let family = parse_control(family)?;
        respond(self.controller.set_key_signature_family(family), "Failed to serialize view")
    }

    #[wasm_bindgen(js_name = setKeySignatureCount)]
    pub fn set_key_signature_count(&mut self, count: u8) -> Result<JsValue, JsValue> {
        let count = KeySignatureCount::new(count).map_err(to_js_error)?;
        respond(self.controller.set_key_signature_count(count), "Failed to serialize view")
    }

    /// Select a key by name ("Bb", "F♯", ...)
    #[wasm_bindgen(js_name = selectKeySignature)]
    pub fn select_key_signature(&mut self, name: &str) -> Result<JsValue, JsValue> {
        let name = parse_control(name)?;
        respond(self.controller.select_key_signature(name), "Failed to serialize view")
    }

    /// Slider input; positions outside the clef's range are ignored
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, position: i32) -> Result<JsValue, JsValue> {
        respond(self.controller.set_position(StaffPosition(position)), "Failed to serialize view")
    }

    /// Note and octave buttons: "noteUp", "noteDown", "octaveUp", "octaveDown"
    pub fn step(&mut self, direction: &str) -> Result<JsValue, JsValue> {
        let direction = parse_control(direction)?;
        respond(self.controller.step(direction), "Failed to serialize view")
    }

    /// Accidental selector: "none", "sharp", "flat", "natural"
    #[wasm_bindgen(js_name = setAccidental)]
    pub fn set_accidental(&mut self, accidental: &str) -> Result<JsValue, JsValue> {
        let accidental = parse_control(accidental)?;
        respond(self.controller.set_accidental(accidental), "Failed to serialize view")
    }

    /// Request for the page's notation library
    #[wasm_bindgen(js_name = renderRequest)]
    pub fn render_request(&self) -> Result<JsValue, JsValue> {
        respond(self.controller.render_request(), "Failed to serialize render request")
    }

    /// Draw through a JS notation surface and return the staff layout
    pub fn render(&self, surface: JsValue, container_width: f64) -> Result<JsValue, JsValue> {
        let mut surface = JsNotationSurface::new(surface).map_err(to_js_error)?;
        respond(self.controller.render(&mut surface, container_width), "Failed to serialize staff layout")
    }

    /// Play the current note; fails if the browser has no Web Audio
    pub fn play(&mut self) -> Result<JsValue, JsValue> {
        respond(self.controller.play(&mut self.audio), "Failed to serialize tone")
    }
}

/// Entries for the key-name selector
#[wasm_bindgen(js_name = keySignatureOptions)]
pub fn key_signature_options_js() -> Result<JsValue, JsValue> {
    serialize(&key_signature_options(), "Failed to serialize key signature options")
}

/// One entry of the clef selector
#[derive(serde::Serialize, Clone, Debug)]
pub struct ClefOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Clef selector entries
#[wasm_bindgen]
pub fn clefs() -> Result<JsValue, JsValue> {
    let entries: Vec<ClefOption> = Clef::ALL
        .iter()
        .map(|clef| ClefOption { value: clef.as_str(), label: clef.display_name() })
        .collect();
    serialize(&entries, "Failed to serialize clefs")
}
