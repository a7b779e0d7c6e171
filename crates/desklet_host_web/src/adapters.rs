//! Assembles a [`HostServices`] bundle from browser adapters plus shell-owned collaborators.

use std::rc::Rc;

use desklet_host::{
    DockItemStore, HostServices, MimeResolver, MimeTable, NoopDockItemStore, NoopProcessLauncher,
    NoopWindowManager, ProcessLauncher, WindowManager,
};

use crate::{
    BrowserGeometry, BrowserShellSurface, DomSelectors, WebBookmarkSource, WebExternalUrlService,
};

/// Collaborators owned by the surrounding desktop shell rather than the DOM.
#[derive(Clone)]
pub struct ShellCollaborators {
    /// Window visibility, focus and workspaces.
    pub windows: Rc<dyn WindowManager>,
    /// Application execution.
    pub processes: Rc<dyn ProcessLauncher>,
    /// Extension handlers.
    pub mime: Rc<dyn MimeResolver>,
    /// Dock persistence.
    pub dock_store: Rc<dyn DockItemStore>,
}

impl Default for ShellCollaborators {
    fn default() -> Self {
        Self {
            windows: Rc::new(NoopWindowManager),
            processes: Rc::new(NoopProcessLauncher),
            mime: Rc::new(MimeTable::default()),
            dock_store: Rc::new(NoopDockItemStore),
        }
    }
}

/// Browser host bundle: DOM geometry, shell surface, bookmarks and external URLs come from this
/// crate, the rest from `collaborators`.
pub fn build_host_services(
    selectors: DomSelectors,
    shell: BrowserShellSurface,
    collaborators: ShellCollaborators,
) -> HostServices {
    HostServices {
        geometry: Rc::new(BrowserGeometry::new(selectors)),
        windows: collaborators.windows,
        processes: collaborators.processes,
        mime: collaborators.mime,
        dock_store: collaborators.dock_store,
        bookmarks: Rc::new(WebBookmarkSource::default()),
        external_urls: Rc::new(WebExternalUrlService),
        shell: Rc::new(shell),
    }
}

#[cfg(test)]
mod tests {
    use desklet_host::{Axis, GeometryProvider};
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn default_bundle_measures_with_fallback_geometry() {
        let host = build_host_services(
            DomSelectors::default(),
            BrowserShellSurface::default(),
            ShellCollaborators::default(),
        );
        assert_eq!(host.geometry.viewport_extent(Axis::Vertical), 768);
        assert_eq!(host.mime.resolve_handler_for_extension(".txt"), None);
    }
}
