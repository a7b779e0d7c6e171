//! Browser (`wasm32`) implementations of the [`desklet_host`] contracts that touch the DOM.
//!
//! Window management, process execution, MIME lookup and dock persistence belong to the
//! surrounding shell and are passed in by the caller of [`build_host_services`]. Non-wasm builds
//! compile every adapter to an inert fallback.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod bookmark;
pub mod external_url;
pub mod geometry;
mod interop;
pub mod shell_surface;

pub use adapters::{build_host_services, ShellCollaborators};
pub use bookmark::WebBookmarkSource;
pub use external_url::WebExternalUrlService;
pub use geometry::{BrowserGeometry, DomSelectors, DOCK_WINDOW_LIST_ID, MAIN_DOCK_ID};
pub use shell_surface::{
    BrowserShellSurface, APPS_SHOWING_CLASS, REDRAW_ICONS_EVENT, RELOAD_DOCKS_EVENT,
    RUN_COMMAND_EVENT,
};
