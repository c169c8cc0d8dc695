//! Note calculation from the pitch pipe state

pub mod calculator;

pub use calculator::{calculate_note, effective_accidental, recompute_derived_state, CalculatedNote, DerivedView};
