//! Leptos provider exposing the desklet runtime and its published state to components.

use std::collections::BTreeMap;

use desklet_host::HostServices;
use leptos::*;

use crate::{
    controller::ShellMode,
    effect_executor::DeskletRuntime,
    events::DeskletEvent,
    model::{DeskletConfig, DeskletId, DeskletState, ItemId},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desklet state and routing input into the runtime.
pub struct DeskletRuntimeContext {
    /// Shared runtime; cloning it is cheap.
    pub runtime: StoredValue<DeskletRuntime>,
    /// Every desklet's state as of the last flush.
    pub states: RwSignal<BTreeMap<DeskletId, DeskletState>>,
}

impl DeskletRuntimeContext {
    /// Wraps `runtime` and mirrors its flushes into a signal.
    pub fn new(runtime: DeskletRuntime) -> Self {
        let states = create_rw_signal(runtime.snapshot());
        runtime.observe(move |snapshot| states.set(snapshot));
        Self {
            runtime: store_value(runtime),
            states,
        }
    }

    /// Reactive view of one desklet; `None` once it is gone.
    pub fn state_of(&self, id: DeskletId) -> Signal<Option<DeskletState>> {
        let states = self.states;
        Signal::derive(move || states.with(|states| states.get(&id).cloned()))
    }

    pub fn create_desklet(&self, config: DeskletConfig) -> DeskletId {
        self.runtime
            .get_value()
            .with_manager(|manager| manager.create_desklet(config))
    }

    /// Routes body input. Returns `true` when the input should stop propagating.
    pub fn dispatch_event(&self, id: DeskletId, event: DeskletEvent) -> bool {
        self.runtime
            .get_value()
            .dispatch_event(id, event)
            .stop_propagation
    }

    /// Runs a launcher click.
    pub fn activate(&self, id: DeskletId, item_id: ItemId) {
        match self
            .runtime
            .get_value()
            .with_desklet(id, |desklet| desklet.activate(item_id))
        {
            Ok(Ok(_)) => {}
            Ok(Err(err)) | Err(err) => logging::warn!("launcher activation dropped: {err}"),
        }
    }

    /// Viewport resize: lays out every desklet again.
    pub fn resize_all(&self) {
        self.runtime
            .get_value()
            .with_manager(|manager| manager.resize_all());
    }
}

#[component]
/// Provides [`DeskletRuntimeContext`] to descendant components.
pub fn DeskletProvider(
    /// Injected browser host bundle.
    host_services: HostServices,
    /// Shell presentation flags the desklets start under.
    #[prop(optional)]
    mode: ShellMode,
    children: Children,
) -> impl IntoView {
    let runtime = DeskletRuntimeContext::new(DeskletRuntime::new(host_services, mode));
    provide_context(runtime);
    children().into_view()
}

/// Returns the current [`DeskletRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DeskletProvider`].
pub fn use_desklet_runtime() -> DeskletRuntimeContext {
    use_context::<DeskletRuntimeContext>().expect("DeskletRuntimeContext not provided")
}
