//! External URL adapter opening links in a new browser tab.

use desklet_host::{ExternalUrlFuture, ExternalUrlService};

#[derive(Debug, Clone, Copy, Default)]
/// Opens URLs with `window.open(url, "_blank")`.
pub struct WebExternalUrlService;

impl ExternalUrlService for WebExternalUrlService {
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), String>> {
        Box::pin(async move { open_in_new_tab(url) })
    }
}

#[cfg(target_arch = "wasm32")]
fn open_in_new_tab(url: &str) -> Result<(), String> {
    let window = crate::interop::window().ok_or_else(|| "window unavailable".to_string())?;
    window
        .open_with_url_and_target(url, "_blank")
        .map(|_| ())
        .map_err(crate::interop::js_error_to_string)
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_new_tab(_url: &str) -> Result<(), String> {
    Err(crate::interop::unsupported())
}
