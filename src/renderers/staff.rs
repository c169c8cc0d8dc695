//! Staff rendering contract
//!
//! Glyph layout is done by the page's notation library. This module builds
//! the request it draws from, runs the measure-then-resize pass over a
//! `NotationSurface`, and computes where the position sliders go.

use serde::{Deserialize, Serialize};

use crate::config::StaffConfig;
use crate::error::{PitchPipeError, Result};
use crate::models::pitch_pipe_state::PitchPipeState;

/// Duration code for the single displayed note (quarter)
pub const NOTE_DURATION: &str = "q";

/// Everything the notation library needs to draw the staff
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffRenderRequest {
    pub clef: String,
    pub key_signature: String,
    /// Note keys in "Letter/Octave" form; always one entry
    pub keys: Vec<String>,
    pub duration: String,
    /// Accidental modifier to attach to the note ("#", "b" or "n")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accidental: Option<String>,
    pub stave_y: f64,
    pub height: f64,
}

impl StaffRenderRequest {
    /// Build the request for a state
    ///
    /// The note carries an accidental only when the user picked one; letters
    /// altered by the key signature are shown by the signature itself.
    pub fn from_state(state: &PitchPipeState, config: &StaffConfig) -> Result<Self> {
        let pitch = state.pitch_name()?;

        Ok(Self {
            clef: state.clef.as_str().to_string(),
            key_signature: state.key_signature().as_str().to_string(),
            keys: vec![pitch.to_string()],
            duration: NOTE_DURATION.to_string(),
            accidental: state.accidental.glyph_code().map(str::to_string),
            stave_y: config.stave_y,
            height: config.height,
        })
    }
}

/// Geometry of the drawn note as measured by the notation library
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteGeometry {
    /// Absolute x of the note within the surface
    pub absolute_x: f64,
    /// x of the note relative to its tick context
    pub x: f64,
    pub width: f64,
}

impl NoteGeometry {
    /// Right edge of the note's glyph
    pub fn right_edge(&self) -> f64 {
        self.absolute_x - self.x + self.width
    }

    fn validate(self) -> Result<Self> {
        if [self.absolute_x, self.x, self.width].iter().all(|v| v.is_finite()) && self.width >= 0.0 {
            Ok(self)
        } else {
            Err(PitchPipeError::Render(format!("unusable note geometry: {:?}", self)))
        }
    }
}

/// Final staff size and slider placement
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffLayout {
    pub note_right_edge: f64,
    pub stave_width: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Left offset of the invisible slider laid over the note
    pub overlay_slider_left: f64,
    /// Left offset of the visible slider to the right of the staff
    pub visible_slider_left: f64,
}

impl StaffLayout {
    /// Size the stave to fit the note and place the sliders
    ///
    /// The stave ends `note_padding` past the note, the canvas is one pixel
    /// wider than that to avoid clipping, and the staff is centered in a
    /// container `container_width` wide.
    pub fn compute(geometry: &NoteGeometry, container_width: f64, config: &StaffConfig) -> Self {
        let note_right_edge = geometry.right_edge();
        let stave_width = note_right_edge + config.note_padding;
        let center = container_width / 2.0;

        Self {
            note_right_edge,
            stave_width,
            canvas_width: stave_width + 1.0,
            canvas_height: config.height,
            overlay_slider_left: center - stave_width / 2.0 + note_right_edge - config.overlay_nudge,
            visible_slider_left: center + stave_width / 2.0 + config.slider_gap,
        }
    }
}

/// Drawing surface backed by a notation library
pub trait NotationSurface {
    /// Remove everything drawn so far
    fn clear(&mut self) -> Result<()>;

    /// Draw the staff at `stave_width` (0 lets the library size it) and
    /// return the measured note geometry
    fn draw(&mut self, request: &StaffRenderRequest, stave_width: f64) -> Result<NoteGeometry>;

    /// Resize the underlying canvas
    fn resize(&mut self, width: f64, height: f64) -> Result<()>;
}

/// Draw the staff sized to fit its note
///
/// The first pass draws at zero stave width to measure the note; the second
/// redraws at the fitted width on a cleared surface.
pub fn render_staff<S: NotationSurface + ?Sized>(
    surface: &mut S,
    request: &StaffRenderRequest,
    container_width: f64,
    config: &StaffConfig,
) -> Result<StaffLayout> {
    surface.clear()?;
    surface.resize(1.0, config.height)?;

    let geometry = surface.draw(request, 0.0)?.validate()?;
    let layout = StaffLayout::compute(&geometry, container_width, config);

    surface.clear()?;
    surface.draw(request, layout.stave_width)?;
    surface.resize(layout.canvas_width, layout.canvas_height)?;

    log::debug!(
        "rendered {} {} in {} clef, stave width {:.1}",
        request.keys.join(","),
        request.key_signature,
        request.clef,
        layout.stave_width
    );
    Ok(layout)
}
