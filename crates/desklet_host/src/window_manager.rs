//! Window-manager contract used by launcher activation.

/// Opaque handle for a running application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

/// Host window manager. Focus, z-order, and window movement stay on the host side.
pub trait WindowManager {
    /// Toggles visibility of the windows owned by `executable` on the current screen.
    ///
    /// Returns `true` when at least one visible window was found and toggled, in which case the
    /// caller must not launch.
    fn toggle_visibility(&self, executable: &str) -> bool;

    /// Raises and focuses a window.
    fn raise_and_focus(&self, window: WindowHandle);

    /// Switches the active workspace.
    fn switch_workspace(&self, workspace: u32);
}

#[derive(Debug, Clone, Copy, Default)]
/// Window manager with no windows.
pub struct NoopWindowManager;

impl WindowManager for NoopWindowManager {
    fn toggle_visibility(&self, _executable: &str) -> bool {
        false
    }

    fn raise_and_focus(&self, _window: WindowHandle) {}

    fn switch_workspace(&self, _workspace: u32) {}
}
