//! Shell surface adapter that edits sibling DOM regions directly.

use desklet_host::{EdgeInsets, ShellSurface};

use crate::geometry::DOCK_WINDOW_LIST_ID;

/// Window event asking the desktop to redraw its icon grid.
pub const REDRAW_ICONS_EVENT: &str = "desklet:redraw-icons";
/// Window event asking every dock to reload from persisted configuration.
pub const RELOAD_DOCKS_EVENT: &str = "desklet:reload-docks";
/// Window event carrying a launcher command in `detail`.
pub const RUN_COMMAND_EVENT: &str = "desklet:run-command";

/// Body class present while a mobile desklet is open.
pub const APPS_SHOWING_CLASS: &str = "AppsShowing";

/// Browser shell surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserShellSurface {
    /// Scrollable desktop region padded clear of the desklet.
    pub scroller: String,
    /// Companion window list scrolled by pointer scrubbing.
    pub window_list: String,
    /// Sibling drive panel closed when a mobile desklet opens.
    pub side_panel: String,
}

impl Default for BrowserShellSurface {
    fn default() -> Self {
        Self {
            scroller: "#DoorsScreen .ScreenContent .Scroller".to_string(),
            window_list: format!("#{DOCK_WINDOW_LIST_ID}"),
            side_panel: "#DrivePanel".to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn dispatch_window_event(name: &str, detail: Option<&str>) {
    use wasm_bindgen::JsValue;

    let Some(window) = crate::interop::window() else {
        return;
    };
    let init = web_sys::CustomEventInit::new();
    if let Some(detail) = detail {
        init.set_detail(&JsValue::from_str(detail));
    }
    match web_sys::CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(err) => {
            web_sys::console::warn_1(&JsValue::from_str(&crate::interop::js_error_to_string(err)))
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ShellSurface for BrowserShellSurface {
    fn pad_scroller(&self, insets: EdgeInsets) {
        let Some(scroller) = crate::interop::html_element(&self.scroller) else {
            return;
        };
        let style = scroller.style();
        let _ = style.set_property("padding-top", &format!("{}px", insets.top));
        let _ = style.set_property("padding-left", &format!("{}px", insets.left));
        let _ = style.set_property("padding-right", &format!("{}px", insets.right));
        let _ = style.set_property("padding-bottom", &format!("{}px", insets.bottom));
    }

    fn scroll_window_list(&self, scroll_left: f64, scroll_top: f64) {
        let Some(list) = crate::interop::html_element(&self.window_list) else {
            return;
        };
        list.set_scroll_left(scroll_left as i32);
        list.set_scroll_top(scroll_top as i32);
    }

    fn hide_keyboard(&self) {
        use wasm_bindgen::JsCast;

        let active = crate::interop::document()
            .and_then(|document| document.active_element())
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(element) = active {
            let _ = element.blur();
        }
    }

    fn close_side_panel(&self) {
        if let Some(panel) = crate::interop::html_element(&self.side_panel) {
            let _ = panel.class_list().remove_1("Open");
        }
    }

    fn set_apps_showing(&self, showing: bool) {
        let Some(body) = crate::interop::document().and_then(|document| document.body()) else {
            return;
        };
        let classes = body.class_list();
        let _ = if showing {
            classes.add_1(APPS_SHOWING_CLASS)
        } else {
            classes.remove_1(APPS_SHOWING_CLASS)
        };
    }

    fn redraw_icon_grid(&self) {
        dispatch_window_event(REDRAW_ICONS_EVENT, None);
    }

    fn reload_docks(&self) {
        dispatch_window_event(RELOAD_DOCKS_EVENT, None);
    }

    fn run_command(&self, command: &str) {
        dispatch_window_event(RUN_COMMAND_EVENT, Some(command));
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ShellSurface for BrowserShellSurface {
    fn pad_scroller(&self, _insets: EdgeInsets) {}

    fn scroll_window_list(&self, _scroll_left: f64, _scroll_top: f64) {}

    fn hide_keyboard(&self) {}

    fn close_side_panel(&self) {}

    fn set_apps_showing(&self, _showing: bool) {}

    fn redraw_icon_grid(&self) {}

    fn reload_docks(&self) {}

    fn run_command(&self, _command: &str) {}
}
