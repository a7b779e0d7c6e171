//! Shared DOM lookups and JS error conversion.

#[cfg(target_arch = "wasm32")]
mod imp {
    use wasm_bindgen::{JsCast, JsValue};

    pub fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    pub fn window() -> Option<web_sys::Window> {
        web_sys::window()
    }

    pub fn document() -> Option<web_sys::Document> {
        window()?.document()
    }

    pub fn html_element(selector: &str) -> Option<web_sys::HtmlElement> {
        document()?
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    }

    pub fn window_extent(value: Result<JsValue, JsValue>) -> Option<i32> {
        value.ok()?.as_f64().map(|extent| extent as i32)
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use imp::*;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn unsupported() -> String {
    "browser host services are only available on wasm32".to_string()
}
