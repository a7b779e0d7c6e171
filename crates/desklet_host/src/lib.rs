//! Typed collaborator contracts consumed by the desklet runtime.
//!
//! Window management, process execution, MIME lookup, persistence and the surrounding shell
//! surface all live outside the desklet core. This crate names the narrow interfaces the runtime
//! calls through and ships no-op and in-memory adapters for tests and unsupported targets.
//! Browser adapters live in `desklet_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bookmark;
pub mod dock_store;
pub mod external_url;
pub mod geometry;
pub mod host;
pub mod mime;
pub mod process;
pub mod shell_surface;
pub mod window_manager;

pub use bookmark::{BookmarkFuture, BookmarkSource, MemoryBookmarkSource, NoopBookmarkSource};
pub use dock_store::{
    DockItemRecord, DockItemType, DockStoreFuture, DockItemStore, MemoryDockItemStore,
    NoopDockItemStore,
};
pub use external_url::{ExternalUrlFuture, ExternalUrlService, NoopExternalUrlService};
pub use geometry::{
    Axis, DockExtent, EdgeInsets, GeometryProvider, StaticGeometry, ThemeMetric,
    DEFAULT_TITLE_BAR_HEIGHT,
};
pub use host::HostServices;
pub use mime::{MimeResolver, MimeTable, MimeTypeEntry};
pub use process::{NoopProcessLauncher, ProcessLauncher};
pub use shell_surface::{NoopShellSurface, ShellSurface};
pub use window_manager::{NoopWindowManager, WindowHandle, WindowManager};
