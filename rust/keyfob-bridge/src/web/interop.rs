//! Small helpers over `js_sys::Reflect`.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;

/// Shorthand for `Reflect::get` with a string key.
pub(crate) fn js_get(target: &JsValue, key: &str) -> Result<JsValue, String> {
    Reflect::get(target, &JsValue::from_str(key))
        .map_err(|e| format!("failed to get '{key}': {e:?}"))
}

/// Look up `target[name]` and make sure it can be called.
pub(crate) fn js_method(target: &JsValue, name: &str) -> Result<Function, String> {
    js_get(target, name)?
        .dyn_into::<Function>()
        .map_err(|_| format!("'{name}' is not a function"))
}

/// Call `target[name](...arguments)` with `target` as `this`.
pub(crate) fn js_call(target: &JsValue, name: &str, arguments: &Array) -> Result<JsValue, String> {
    js_method(target, name)?
        .apply(target, arguments)
        .map_err(|e| format!("'{name}' threw: {e:?}"))
}

/// Whether a JS value is `null` or `undefined`.
pub(crate) fn is_missing(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}
