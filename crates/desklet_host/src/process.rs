//! Application process contract.

use crate::window_manager::WindowHandle;

/// Host service that starts applications and answers single-instance policy questions.
pub trait ProcessLauncher {
    /// Requests execution of `executable` with a space-separated argument string.
    fn execute(&self, executable: &str, args: &str);

    /// Returns whether `executable` is registered as a single-instance application.
    fn is_single_instance(&self, executable: &str) -> bool;

    /// Returns a window of the running instance of `executable`, if one exists.
    fn find_running_instance(&self, executable: &str) -> Option<WindowHandle>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Process launcher that runs nothing and never reports running instances.
pub struct NoopProcessLauncher;

impl ProcessLauncher for NoopProcessLauncher {
    fn execute(&self, _executable: &str, _args: &str) {}

    fn is_single_instance(&self, _executable: &str) -> bool {
        false
    }

    fn find_running_instance(&self, _executable: &str) -> Option<WindowHandle> {
        None
    }
}
