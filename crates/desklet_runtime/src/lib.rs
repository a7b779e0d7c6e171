//! Desklet runtime: icon-tray layout, placement, pointer scrubbing, and launcher handling.
//!
//! State changes go through [`reducer::reduce_desklet`], which emits [`DeskletEffect`] values.
//! [`DeskletController`] owns one desklet, [`DeskletManager`] owns the session's desklets, and
//! [`DeskletRuntime`] executes queued effects against the injected
//! [`desklet_host::HostServices`]. [`DeskletProvider`] publishes that state to Leptos views.

pub mod components;
pub mod controller;
pub mod effect_executor;
pub mod events;
pub mod launcher;
pub mod layout;
pub mod manager;
pub mod model;
pub mod placement;
pub mod presentation;
pub mod reducer;
pub mod runtime_context;
pub mod scroll;

pub use components::DeskletView;
pub use controller::{DeskletController, EventOutcome, ShellMode};
pub use effect_executor::{DeskletRuntime, StateObserver};
pub use events::{DeskletEvent, DeskletEventKind, EventRegistry, SubscriptionId};
pub use launcher::{
    activate, ActivationContext, ActivationOutcome, BookmarkSpec, DroppedFile, DroppedFileKind,
    LauncherDescriptor, LauncherSpec,
};
pub use layout::{block_count, compute_layout, content_length, LayoutParams};
pub use manager::DeskletManager;
pub use model::*;
pub use placement::{reserved_margins, resolve_anchor, resolve_placement, Placement};
pub use presentation::{project, DeskletProjection, ItemView};
pub use reducer::{reduce_desklet, DeskletAction, DeskletEffect, DeskletError};
pub use runtime_context::{use_desklet_runtime, DeskletProvider, DeskletRuntimeContext};
pub use scroll::{map_pointer_to_scroll, ListBounds, ListMeasurement, WINDOW_LIST_DOM_ID};
