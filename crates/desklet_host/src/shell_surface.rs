//! Surrounding shell surface the desklet pokes after layout and open/close transitions.

use crate::geometry::EdgeInsets;

/// Sibling UI the desklet adjusts but does not own.
pub trait ShellSurface {
    /// Pads the desktop's scrollable icon region so it never renders under the desklet.
    fn pad_scroller(&self, insets: EdgeInsets);

    /// Applies a scroll offset to the companion window list.
    fn scroll_window_list(&self, scroll_left: f64, scroll_top: f64);

    /// Dismisses the on-screen keyboard.
    fn hide_keyboard(&self);

    /// Closes the sibling drive panel.
    fn close_side_panel(&self);

    /// Toggles the document-level "apps showing" marker.
    fn set_apps_showing(&self, showing: bool);

    /// Redraws the desktop icon grid.
    fn redraw_icon_grid(&self);

    /// Reloads every dock from persisted configuration.
    fn reload_docks(&self);

    /// Runs a launcher's opaque shell command.
    fn run_command(&self, command: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Shell surface that ignores every request.
pub struct NoopShellSurface;

impl ShellSurface for NoopShellSurface {
    fn pad_scroller(&self, _insets: EdgeInsets) {}

    fn scroll_window_list(&self, _scroll_left: f64, _scroll_top: f64) {}

    fn hide_keyboard(&self) {}

    fn close_side_panel(&self) {}

    fn set_apps_showing(&self, _showing: bool) {}

    fn redraw_icon_grid(&self) {}

    fn reload_docks(&self) {}

    fn run_command(&self, _command: &str) {}
}
