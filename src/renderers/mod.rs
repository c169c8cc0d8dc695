//! Renderers module for the Visual Pitch Pipe
//!
//! Glyph layout belongs to the page's notation library. This module holds the
//! contract with it: the render request, the measured geometry, and the
//! staff/slider layout derived from that geometry.

pub mod staff;
pub mod js_surface;

// Re-export commonly used types
pub use staff::{render_staff, NotationSurface, NoteGeometry, StaffLayout, StaffRenderRequest};
pub use js_surface::JsNotationSurface;
