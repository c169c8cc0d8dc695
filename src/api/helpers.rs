//! Shared helpers for WASM API operations
//!
//! Serialization to and from JavaScript values and conversion of crate errors
//! into `JsValue`s. Every failure that crosses the boundary is logged first.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;

use crate::error::PitchPipeError;

// ============================================================================
// Error Conversion
// ============================================================================

/// Log a crate error and convert it for JavaScript
pub fn to_js_error(err: PitchPipeError) -> JsValue {
    log::error!("{}", err);
    JsValue::from_str(&err.to_string())
}

/// Parse an enumerated control value sent by the page
pub fn parse_control<T>(value: &str) -> Result<T, JsValue>
where
    T: FromStr<Err = PitchPipeError>,
{
    value.parse::<T>().map_err(|e| {
        log::warn!("rejected control value '{}'", value);
        to_js_error(e)
    })
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript, treating `undefined`/`null` as default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, error_context)
}

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize the result of a crate operation, converting either side
pub fn respond<T: Serialize>(result: crate::error::Result<T>, error_context: &str) -> Result<JsValue, JsValue> {
    let value = result.map_err(to_js_error)?;
    serialize(&value, error_context)
}
