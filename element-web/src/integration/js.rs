use js_sys::{ Array, Function };
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/define.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub(crate) fn define(name: &str, observed: &Array, create: &Function) -> Result<(),JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub(crate) type WeakRef;

    #[wasm_bindgen(constructor)]
    pub(crate) fn new(target: &JsValue) -> WeakRef;

    #[wasm_bindgen(method, js_name = deref)]
    pub(crate) fn target(this: &WeakRef) -> JsValue;
}
