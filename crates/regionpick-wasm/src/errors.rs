// crates/regionpick-wasm/src/errors.rs
use regionpick_core::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

pub(crate) fn cache_error(context: &str, value: JsValue) -> Error {
    Error::Cache(format!("{context}: {}", describe(&value)))
}

/// Converts a core error into a JS `Error` at the binding boundary.
pub(crate) fn to_js(err: Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
