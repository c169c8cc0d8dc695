//! Notation surface implemented on the JavaScript side
//!
//! The page passes an object with `clear()`, `draw(request, staveWidth)` and
//! `resize(width, height)` methods, typically wrapping a VexFlow renderer.
//! `draw` must return `{ absoluteX, x, width }` for the drawn note.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::staff::{NotationSurface, NoteGeometry, StaffRenderRequest};
use crate::error::{PitchPipeError, Result};

pub struct JsNotationSurface {
    target: Object,
}

fn render_error(context: &str, err: impl std::fmt::Debug) -> PitchPipeError {
    PitchPipeError::Render(format!("{}: {:?}", context, err))
}

impl JsNotationSurface {
    pub fn new(target: JsValue) -> Result<Self> {
        let target = target
            .dyn_into::<Object>()
            .map_err(|v| render_error("notation surface must be an object", v))?;
        Ok(Self { target })
    }

    fn method(&self, name: &str) -> Result<Function> {
        Reflect::get(&self.target, &JsValue::from_str(name))
            .map_err(|e| render_error(name, e))?
            .dyn_into::<Function>()
            .map_err(|_| PitchPipeError::Render(format!("notation surface has no '{}' method", name)))
    }
}

impl NotationSurface for JsNotationSurface {
    fn clear(&mut self) -> Result<()> {
        self.method("clear")?
            .call0(&self.target)
            .map_err(|e| render_error("clear", e))?;
        Ok(())
    }

    fn draw(&mut self, request: &StaffRenderRequest, stave_width: f64) -> Result<NoteGeometry> {
        let request_js = serde_wasm_bindgen::to_value(request).map_err(|e| render_error("serializing request", e))?;
        let geometry = self
            .method("draw")?
            .call2(&self.target, &request_js, &JsValue::from_f64(stave_width))
            .map_err(|e| render_error("draw", e))?;
        serde_wasm_bindgen::from_value(geometry).map_err(|e| render_error("reading note geometry", e))
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.method("resize")?
            .call2(&self.target, &JsValue::from_f64(width), &JsValue::from_f64(height))
            .map_err(|e| render_error("resize", e))?;
        Ok(())
    }
}
