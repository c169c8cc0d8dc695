//! Pitch pipe controller
//!
//! Owns the current state and configuration, applies one transition per
//! control event and hands back the recomputed view. The wasm API wraps this
//! type; it has no browser dependencies of its own.

use crate::audio::synth::{play_note, Tone, ToneGenerator};
use crate::config::PitchPipeConfig;
use crate::error::Result;
use crate::models::accidental::AccidentalOverride;
use crate::models::clef::{Clef, StaffPosition};
use crate::models::key_signature::{KeySignatureCount, KeySignatureFamily, KeySignatureName};
use crate::models::pitch_pipe_state::{PitchPipeState, StepDirection};
use crate::pitch::{recompute_derived_state, DerivedView};
use crate::renderers::staff::{render_staff, NotationSurface, StaffLayout, StaffRenderRequest};

#[derive(Debug, Clone, Default)]
pub struct PitchPipeController {
    state: PitchPipeState,
    config: PitchPipeConfig,
}

impl PitchPipeController {
    pub fn new(config: PitchPipeConfig) -> Self {
        Self {
            state: PitchPipeState::default(),
            config,
        }
    }

    pub fn state(&self) -> &PitchPipeState {
        &self.state
    }

    pub fn config(&self) -> &PitchPipeConfig {
        &self.config
    }

    pub fn view(&self) -> Result<DerivedView> {
        recompute_derived_state(&self.state)
    }

    fn apply(&mut self, transition: impl FnOnce(PitchPipeState) -> PitchPipeState) -> Result<DerivedView> {
        let next = transition(self.state);
        // Compute the view before committing so a bad state is never stored
        let view = recompute_derived_state(&next)?;
        self.state = next;
        Ok(view)
    }

    pub fn set_clef(&mut self, clef: Clef) -> Result<DerivedView> {
        self.apply(|state| state.with_clef(clef))
    }

    pub fn set_key_signature_family(&mut self, family: KeySignatureFamily) -> Result<DerivedView> {
        self.apply(|state| state.with_key_signature_family(family))
    }

    pub fn set_key_signature_count(&mut self, count: KeySignatureCount) -> Result<DerivedView> {
        self.apply(|state| state.with_key_signature_count(count))
    }

    pub fn select_key_signature(&mut self, name: KeySignatureName) -> Result<DerivedView> {
        self.apply(|state| state.with_key_signature(name))
    }

    pub fn set_position(&mut self, position: StaffPosition) -> Result<DerivedView> {
        self.apply(|state| state.with_position(position))
    }

    pub fn step(&mut self, direction: StepDirection) -> Result<DerivedView> {
        self.apply(|state| state.step(direction))
    }

    pub fn set_accidental(&mut self, accidental: AccidentalOverride) -> Result<DerivedView> {
        self.apply(|state| state.with_accidental(accidental))
    }

    pub fn render_request(&self) -> Result<StaffRenderRequest> {
        StaffRenderRequest::from_state(&self.state, &self.config.staff)
    }

    /// Redraw the staff from the current state
    pub fn render<S: NotationSurface + ?Sized>(&self, surface: &mut S, container_width: f64) -> Result<StaffLayout> {
        let request = self.render_request()?;
        render_staff(surface, &request, container_width, &self.config.staff)
    }

    /// Play the current note
    pub fn play<G: ToneGenerator + ?Sized>(&self, generator: &mut G) -> Result<Tone> {
        let view = self.view()?;
        play_note(generator, &view.note, &self.config.tone)
    }
}
