use wasm_bindgen::{ JsCast, JsValue };
use element_toolkit::error::Error;

/* Best effort at something readable from whatever javascript threw. */
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}",value))
}

pub(crate) fn confused_browser<R>(result: Result<R,JsValue>, context: &str) -> Result<R,Error> {
    result.map_err(|e| Error::host(&format!("{}: {}",context,js_message(&e))))
}

pub(crate) fn confused_browser_option<R>(result: Option<R>, msg: &str) -> Result<R,Error> {
    result.ok_or_else(|| Error::host(msg))
}
