//! Web Audio tone generator
//!
//! Every tone gets its own `AudioContext` with an oscillator -> gain ->
//! destination graph. The oscillator is scheduled to stop after the tone's
//! duration and its `ended` handler closes the context. If building or
//! scheduling the graph fails, the context is closed before the error is
//! returned. Overlapping tones each own a context and play together.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AudioContext, OscillatorType};

use super::synth::{Tone, ToneGenerator, Waveform};
use crate::error::{PitchPipeError, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct WebAudioToneGenerator;

impl WebAudioToneGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Whether the host exposes the Web Audio API
    pub fn is_available() -> bool {
        web_sys::window()
            .map(|window| js_sys::Reflect::has(&window, &JsValue::from_str("AudioContext")).unwrap_or(false))
            .unwrap_or(false)
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

fn audio_error(context: &str, err: JsValue) -> PitchPipeError {
    PitchPipeError::Audio(format!("{}: {:?}", context, err))
}

/// Run `schedule` against a freshly opened resource and release it on failure
///
/// On success the resource stays open; whatever `schedule` registered is then
/// responsible for releasing it.
fn schedule_or_release<C: ?Sized>(
    resource: &C,
    schedule: impl FnOnce(&C) -> Result<()>,
    release: impl FnOnce(&C),
) -> Result<()> {
    let result = schedule(resource);
    if result.is_err() {
        release(resource);
    }
    result
}

fn close_context(context: &AudioContext) {
    if let Err(e) = context.close() {
        log::warn!("failed to close AudioContext: {:?}", e);
    }
}

/// Build oscillator -> gain -> destination and schedule the tone
fn schedule_tone(context: &AudioContext, tone: &Tone) -> Result<()> {
    let oscillator = context
        .create_oscillator()
        .map_err(|e| audio_error("creating oscillator", e))?;
    oscillator.set_type(oscillator_type(tone.waveform));
    oscillator.frequency().set_value(tone.frequency as f32);

    let gain = context.create_gain().map_err(|e| audio_error("creating gain node", e))?;
    gain.gain().set_value(tone.gain);

    oscillator
        .connect_with_audio_node(&gain)
        .and_then(|node| node.connect_with_audio_node(&context.destination()))
        .map_err(|e| audio_error("connecting audio graph", e))?;

    oscillator.start().map_err(|e| audio_error("starting oscillator", e))?;
    oscillator
        .stop_with_when(context.current_time() + tone.duration_secs)
        .map_err(|e| audio_error("scheduling oscillator stop", e))?;

    // Registered last: `ended` cannot fire before this returns, and a failed
    // schedule is released by the caller instead
    let context_for_close = context.clone();
    let on_ended = Closure::once_into_js(move || close_context(&context_for_close));
    oscillator.set_onended(Some(on_ended.unchecked_ref()));
    Ok(())
}

impl ToneGenerator for WebAudioToneGenerator {
    fn play_tone(&mut self, tone: &Tone) -> Result<()> {
        if !Self::is_available() {
            return Err(PitchPipeError::AudioUnavailable);
        }

        let context = AudioContext::new().map_err(|e| audio_error("creating AudioContext", e))?;
        schedule_or_release(&context, |context| schedule_tone(context, tone), close_context)?;

        log::debug!("web audio tone started at {:.2} Hz", tone.frequency);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_schedule_releases_resource() {
        let released = Cell::new(0);
        let result = schedule_or_release(
            &(),
            |_| Err(PitchPipeError::Audio("connecting audio graph: boom".to_string())),
            |_| released.set(released.get() + 1),
        );
        assert_eq!(result, Err(PitchPipeError::Audio("connecting audio graph: boom".to_string())));
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_successful_schedule_keeps_resource_open() {
        let released = Cell::new(0);
        let result = schedule_or_release(&(), |_| Ok(()), |_| released.set(released.get() + 1));
        assert!(result.is_ok());
        assert_eq!(released.get(), 0);
    }
}
