use wasm_bindgen::prelude::*;

/// Install the panic hook and console logging, then build the shared
/// generator once at load.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    crate::init_logging();
    if let Err(e) = crate::shared_generator() {
        tracing::error!(error = %e, "Could not build the shared SLO generator");
    }
}

/// Generate SLO rules from a specification and an optional plugin.
///
/// Registered on the host as `generateSLOFromRaw`. Always returns a string.
#[wasm_bindgen(js_name = generateSLOFromRaw)]
pub fn generate_slo_from_raw(slo_spec: JsValue, slo_plugin: JsValue) -> String {
    let spec = js_text(&slo_spec);
    let plugin = js_text(&slo_plugin);
    crate::generate(spec.as_deref(), plugin.as_deref())
}

/// Host text for an argument; `undefined` and `null` count as absent.
fn js_text(value: &JsValue) -> Option<String> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match value.as_string() {
        Some(text) => Some(text),
        None => Some(String::from(js_sys::Object::from(value.clone()).to_string())),
    }
}
