//! Host service bundle injected into the desklet runtime.

use std::rc::Rc;

use crate::{
    BookmarkSource, DockItemStore, ExternalUrlService, GeometryProvider, MimeResolver, MimeTable,
    NoopBookmarkSource, NoopDockItemStore, NoopExternalUrlService, NoopProcessLauncher,
    NoopShellSurface, NoopWindowManager, ProcessLauncher, ShellSurface, StaticGeometry,
    WindowManager,
};

/// Runtime-selected collaborator bundle.
///
/// All environment-specific adapter selection happens before this bundle crosses into
/// `desklet_runtime`, which keeps the layout core decoupled from browser details.
#[derive(Clone)]
pub struct HostServices {
    /// Viewport, parent region, and theme metrics.
    pub geometry: Rc<dyn GeometryProvider>,
    /// Window visibility, focus, and workspace switching.
    pub windows: Rc<dyn WindowManager>,
    /// Application execution and single-instance policy.
    pub processes: Rc<dyn ProcessLauncher>,
    /// Extension to handler lookup.
    pub mime: Rc<dyn MimeResolver>,
    /// Dock item persistence.
    pub dock_store: Rc<dyn DockItemStore>,
    /// Bookmark file reader.
    pub bookmarks: Rc<dyn BookmarkSource>,
    /// External URL opener.
    pub external_urls: Rc<dyn ExternalUrlService>,
    /// Sibling shell UI.
    pub shell: Rc<dyn ShellSurface>,
}

impl HostServices {
    /// Bundle of inert adapters over a default static geometry.
    pub fn noop() -> Self {
        Self {
            geometry: Rc::new(StaticGeometry::default()),
            windows: Rc::new(NoopWindowManager),
            processes: Rc::new(NoopProcessLauncher),
            mime: Rc::new(MimeTable::default()),
            dock_store: Rc::new(NoopDockItemStore),
            bookmarks: Rc::new(NoopBookmarkSource),
            external_urls: Rc::new(NoopExternalUrlService),
            shell: Rc::new(NoopShellSurface),
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::noop()
    }
}
