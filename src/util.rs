use wasm_bindgen::JsValue;

pub fn cerror(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}
