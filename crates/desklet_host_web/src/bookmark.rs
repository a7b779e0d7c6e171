//! `fetch`-backed bookmark metadata source.

use desklet_host::{BookmarkFuture, BookmarkSource};

/// Reads bookmark files through an HTTP endpoint taking the file path as its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebBookmarkSource {
    /// Endpoint prefix; the URI-encoded path is appended verbatim.
    pub base_url: String,
}

impl Default for WebBookmarkSource {
    fn default() -> Self {
        Self {
            base_url: "/system.library/file/read?path=".to_string(),
        }
    }
}

impl WebBookmarkSource {
    /// Full request URL for a bookmark path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, encode_path(path))
    }
}

#[cfg(target_arch = "wasm32")]
fn encode_path(path: &str) -> String {
    String::from(js_sys::encode_uri_component(path))
}

#[cfg(not(target_arch = "wasm32"))]
fn encode_path(path: &str) -> String {
    path.bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*'
            | b'\'' | b'(' | b')' => char::from(byte).to_string(),
            other => format!("%{other:02X}"),
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: String) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use crate::interop::{js_error_to_string, window};

    let window = window().ok_or_else(|| "window unavailable".to_string())?;
    let response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(js_error_to_string)?
        .dyn_into::<web_sys::Response>()
        .map_err(js_error_to_string)?;
    if !response.ok() {
        return Err(format!("bookmark request failed with status {}", response.status()));
    }
    let text = JsFuture::from(response.text().map_err(js_error_to_string)?)
        .await
        .map_err(js_error_to_string)?;
    text.as_string()
        .ok_or_else(|| "bookmark response was not text".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text(_url: String) -> Result<String, String> {
    Err(crate::interop::unsupported())
}

impl BookmarkSource for WebBookmarkSource {
    fn load_bookmark<'a>(&'a self, path: &'a str) -> BookmarkFuture<'a, Result<String, String>> {
        Box::pin(fetch_text(self.url_for(path)))
    }
}
