//! Per-desklet controller: owns state, the event registry and the pending effect batch.

use desklet_host::HostServices;
use leptos::logging;

use crate::{
    events::{DeskletEvent, DeskletEventKind, EventRegistry, SubscriptionId},
    launcher::{self, ActivationContext, ActivationOutcome, DroppedFile, LauncherDescriptor},
    model::{
        ConfigError, DeskletConfig, DeskletId, DeskletState, ItemId, ItemKind, LayoutEnvironment,
        OpenState, Orientation, Transition, ViewListMode,
    },
    reducer::{reduce_desklet, DeskletAction, DeskletEffect, DeskletError},
    scroll::map_pointer_to_scroll,
};

/// Global shell presentation flags a desklet lays out under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShellMode {
    pub view_list: ViewListMode,
    pub mobile: bool,
}

/// Whether the host should stop propagating the triggering input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub stop_propagation: bool,
}

pub struct DeskletController {
    state: DeskletState,
    events: EventRegistry,
    scroll_binding: Option<(Orientation, SubscriptionId)>,
    host: HostServices,
    outbox: Vec<DeskletEffect>,
}

impl std::fmt::Debug for DeskletController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskletController")
            .field("state", &self.state)
            .field("events", &self.events)
            .field("scroll_binding", &self.scroll_binding)
            .field("outbox", &self.outbox)
            .finish()
    }
}

impl DeskletController {
    /// Creates an unrendered desklet. The first [`Self::refresh`] moves it out of `Initializing`.
    pub fn new(
        id: DeskletId,
        dom_id: impl Into<String>,
        config: DeskletConfig,
        mode: ShellMode,
        host: HostServices,
    ) -> Self {
        let environment =
            LayoutEnvironment::sample(host.geometry.as_ref(), mode.view_list, mode.mobile);
        Self {
            state: DeskletState::new(id, dom_id, config, environment),
            events: EventRegistry::default(),
            scroll_binding: None,
            host,
            outbox: Vec::new(),
        }
    }

    pub fn id(&self) -> DeskletId {
        self.state.id
    }

    pub fn state(&self) -> &DeskletState {
        &self.state
    }

    pub fn shell_mode(&self) -> ShellMode {
        ShellMode {
            view_list: self.state.environment.view_list,
            mobile: self.state.environment.mobile,
        }
    }

    fn dispatch(&mut self, action: DeskletAction) -> Result<(), DeskletError> {
        let effects = reduce_desklet(&mut self.state, action)?;
        self.outbox.extend(effects);
        self.sync_scroll_binding();
        Ok(())
    }

    fn dispatch_logged(&mut self, action: DeskletAction) {
        if let Err(err) = self.dispatch(action) {
            logging::warn!("desklet {} reducer error: {err}", self.state.dom_id);
        }
    }

    fn sync_scroll_binding(&mut self) {
        // The mobile overlay has no window list to scrub.
        if self.state.environment.mobile {
            if let Some((_, previous)) = self.scroll_binding.take() {
                self.events.unsubscribe(previous);
            }
            return;
        }
        let orientation = self.state.orientation;
        if let Some((bound, _)) = self.scroll_binding {
            if bound == orientation {
                return;
            }
        }
        if let Some((_, previous)) = self.scroll_binding.take() {
            self.events.unsubscribe(previous);
        }
        let subscription = self
            .events
            .subscribe(DeskletEventKind::PointerMove, move |event| match event {
                DeskletEvent::PointerMove {
                    pointer,
                    list: Some(list),
                } => Some(DeskletEffect::ScrollWindowList(map_pointer_to_scroll(
                    *pointer,
                    *list,
                    orientation,
                ))),
                _ => None,
            });
        self.scroll_binding = Some((orientation, subscription));
    }

    /// Re-samples geometry and re-runs layout.
    pub fn refresh(&mut self) {
        let mode = self.shell_mode();
        let environment =
            LayoutEnvironment::sample(self.host.geometry.as_ref(), mode.view_list, mode.mobile);
        self.resize(environment);
    }

    /// Re-runs layout against an explicit environment.
    pub fn resize(&mut self, environment: LayoutEnvironment) {
        self.dispatch_logged(DeskletAction::Resize { environment });
    }

    /// Switches the shell presentation flags and re-runs layout.
    pub fn set_shell_mode(&mut self, mode: ShellMode) {
        let mut environment = self.state.environment;
        environment.view_list = mode.view_list;
        environment.mobile = mode.mobile;
        self.resize(environment);
    }

    /// Replaces the config from a JSON options payload. `None` keeps the current config and
    /// only re-renders.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed options; the current config is kept.
    pub fn read_config(&mut self, options: Option<&str>) -> Result<(), ConfigError> {
        match options {
            Some(raw) => self.set_config(DeskletConfig::from_options_json(raw)?),
            None => self.dispatch_logged(DeskletAction::Refresh),
        }
        Ok(())
    }

    pub fn set_config(&mut self, config: DeskletConfig) {
        self.dispatch_logged(DeskletAction::ReplaceConfig { config });
    }

    /// Removes every item but the window-list region. Layout is left stale until the next refresh.
    pub fn clear(&mut self) {
        self.dispatch_logged(DeskletAction::Clear);
    }

    /// Registers a launcher. Returns `false` for malformed descriptors.
    pub fn add_launcher(&mut self, descriptor: LauncherDescriptor) -> bool {
        let Some(mut record) = launcher::build_record(&descriptor) else {
            return false;
        };
        record.running = record
            .executable()
            .and_then(|executable| self.host.processes.find_running_instance(executable))
            .is_some();
        self.dispatch_logged(DeskletAction::AddLauncher { record });
        true
    }

    fn add_region(&mut self, kind: ItemKind) -> ItemId {
        self.dispatch_logged(DeskletAction::AddRegion { kind });
        self.state
            .items
            .last()
            .map(|item| item.id)
            .unwrap_or(ItemId(0))
    }

    /// Mounts the companion window-list region.
    pub fn add_window_list_region(&mut self) -> ItemId {
        self.add_region(ItemKind::WindowList)
    }

    pub fn add_menu_region(&mut self) -> ItemId {
        self.add_region(ItemKind::Menu)
    }

    /// # Errors
    ///
    /// Returns [`DeskletError::ItemNotFound`] when `item_id` is not in this desklet.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<(), DeskletError> {
        self.dispatch(DeskletAction::RemoveItem { item_id })
    }

    /// Registers each dropped entry and queues persistence for the ones that registered.
    /// Returns how many registered.
    pub fn drop_files(&mut self, files: &[DroppedFile]) -> usize {
        let mut registered = 0;
        for file in files {
            if !self.add_launcher(LauncherDescriptor::FileDrop(file.clone())) {
                continue;
            }
            if let Some(record) = launcher::dock_record_for_drop(file) {
                self.outbox.push(DeskletEffect::PersistDockItem(record));
            }
            registered += 1;
        }
        registered
    }

    /// Runs a launcher's click path.
    ///
    /// # Errors
    ///
    /// Returns [`DeskletError::ItemNotFound`] when `item_id` is not a launcher of this desklet.
    pub fn activate(&mut self, item_id: ItemId) -> Result<ActivationOutcome, DeskletError> {
        let record = self
            .state
            .item(item_id)
            .and_then(|item| item.launcher.as_ref())
            .ok_or(DeskletError::ItemNotFound)?;
        let mode = self.shell_mode();
        let outcome = launcher::activate(
            record,
            ActivationContext {
                view_list: mode.view_list,
                mobile: mode.mobile,
            },
            &self.host,
        );
        match &outcome {
            ActivationOutcome::OpenedLink(url) => {
                self.outbox.push(DeskletEffect::OpenExternalUrl(url.clone()));
            }
            ActivationOutcome::RanCommand(command) => {
                self.outbox.push(DeskletEffect::RunCommand(command.clone()));
            }
            _ => {}
        }
        if outcome.is_launch() && mode.mobile {
            self.close_desklet();
        }
        Ok(outcome)
    }

    /// Starts opening the mobile overlay. Returns `true` when the transition fired and the
    /// triggering input should stop propagating.
    pub fn open_desklet(&mut self) -> bool {
        let fires = self.state.open_state == OpenState::Closed;
        self.dispatch_logged(DeskletAction::OpenDesklet);
        fires
    }

    /// Starts closing the mobile overlay. Same return contract as [`Self::open_desklet`].
    pub fn close_desklet(&mut self) -> bool {
        let fires = self.state.open_state == OpenState::Open;
        self.dispatch_logged(DeskletAction::CloseDesklet);
        fires
    }

    /// Completes a delayed open/close transition.
    pub fn settle(&mut self, transition: Transition) {
        self.dispatch_logged(DeskletAction::SettleTransition { transition });
    }

    pub fn mark_initialized(&mut self) {
        self.dispatch_logged(DeskletAction::MarkInitialized);
    }

    /// Applies fetched bookmark metadata. Items removed meanwhile are skipped.
    pub fn apply_bookmark_metadata(&mut self, item_id: ItemId, raw: String) {
        self.dispatch_logged(DeskletAction::ApplyBookmarkMetadata { item_id, raw });
    }

    /// Routes a UI event through registered handlers, then the mobile click toggle.
    pub fn handle_event(&mut self, event: DeskletEvent) -> EventOutcome {
        let effects = self.events.emit(&event);
        self.outbox.extend(effects);

        let mut outcome = EventOutcome::default();
        if matches!(event, DeskletEvent::Click { .. }) && self.state.environment.mobile {
            outcome.stop_propagation = match self.state.open_state {
                OpenState::Closed => self.open_desklet(),
                OpenState::Open => self.close_desklet(),
                OpenState::Opening | OpenState::Closing => false,
            };
        }
        outcome
    }

    pub fn subscribe(
        &mut self,
        kind: DeskletEventKind,
        handler: impl FnMut(&DeskletEvent) -> Option<DeskletEffect> + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn handler_count(&self, kind: DeskletEventKind) -> usize {
        self.events.handler_count(kind)
    }

    /// Takes the effects queued since the last drain, in emission order.
    pub fn drain_effects(&mut self) -> Vec<DeskletEffect> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use desklet_host::{EdgeInsets, StaticGeometry};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        launcher::{DroppedFileKind, LauncherSpec},
        model::{EdgeAlignment, PointerPosition, RenderPhase, ITEM_MARGIN, MAX_ITEM_SIZE},
        scroll::{ListBounds, ListMeasurement},
    };

    fn controller(config: DeskletConfig, mode: ShellMode) -> DeskletController {
        let mut host = HostServices::noop();
        host.geometry = Rc::new(StaticGeometry {
            viewport_width: 800,
            viewport_height: 600,
            parent_width: 800,
            parent_height: 600,
            ..StaticGeometry::default()
        });
        DeskletController::new(DeskletId(1), "desklet_0", config, mode, host)
    }

    fn spec(executable: &str) -> LauncherDescriptor {
        LauncherDescriptor::Launcher(LauncherSpec {
            icon_source: Some(format!("gfx/{executable}.png")),
            executable: Some(executable.to_string()),
            ..LauncherSpec::default()
        })
    }

    fn move_at(x: i32) -> DeskletEvent {
        DeskletEvent::PointerMove {
            pointer: PointerPosition { x, y: x },
            list: Some(ListMeasurement {
                bounds: ListBounds {
                    left: 0,
                    top: 0,
                    width: 101,
                    height: 101,
                },
                content_extent: Some(301),
            }),
        }
    }

    #[test]
    fn first_refresh_leaves_initializing_and_pads_scroller() {
        let mut desklet = controller(
            DeskletConfig::anchored(EdgeAlignment::LeftCenter),
            ShellMode::default(),
        );
        assert_eq!(desklet.state().phase, RenderPhase::Initializing);

        desklet.refresh();
        assert_eq!(desklet.state().phase, RenderPhase::Rendered);
        assert_eq!(desklet.state().environment.viewport_width, 800);
        assert_eq!(
            desklet.drain_effects(),
            vec![DeskletEffect::PadScroller(EdgeInsets::ZERO)]
        );
        assert!(desklet.drain_effects().is_empty());
    }

    #[test]
    fn malformed_launchers_are_rejected_without_touching_state() {
        let mut desklet = controller(DeskletConfig::default(), ShellMode::default());
        assert!(!desklet.add_launcher(LauncherDescriptor::Launcher(LauncherSpec::default())));
        assert!(desklet.state().items.is_empty());
        assert!(desklet.add_launcher(spec("Author")));
        assert_eq!(desklet.state().launcher_count(), 1);
    }

    #[test]
    fn scroll_handler_rebinds_once_per_orientation_change() {
        let mut desklet = controller(
            DeskletConfig::anchored(EdgeAlignment::BottomCenter),
            ShellMode::default(),
        );
        desklet.refresh();
        desklet.refresh();
        assert_eq!(desklet.handler_count(DeskletEventKind::PointerMove), 1);
        desklet.drain_effects();

        desklet.handle_event(move_at(50));
        assert_eq!(
            desklet.drain_effects(),
            vec![DeskletEffect::ScrollWindowList(crate::model::ScrollState {
                scroll_left: 100.0,
                scroll_top: 0.0,
            })]
        );

        desklet.set_config(DeskletConfig::anchored(EdgeAlignment::RightTop));
        assert_eq!(desklet.handler_count(DeskletEventKind::PointerMove), 1);
        desklet.drain_effects();
        desklet.handle_event(move_at(50));
        assert_eq!(
            desklet.drain_effects(),
            vec![DeskletEffect::ScrollWindowList(crate::model::ScrollState {
                scroll_left: 0.0,
                scroll_top: 100.0,
            })]
        );
    }

    #[test]
    fn mobile_mode_drops_the_scrub_handler() {
        let mobile = ShellMode {
            mobile: true,
            ..ShellMode::default()
        };
        let mut desklet = controller(DeskletConfig::anchored(EdgeAlignment::BottomCenter), mobile);
        desklet.refresh();
        assert_eq!(desklet.handler_count(DeskletEventKind::PointerMove), 0);
        desklet.drain_effects();
        desklet.handle_event(move_at(50));
        assert!(desklet.drain_effects().is_empty());

        desklet.set_shell_mode(ShellMode::default());
        assert_eq!(desklet.handler_count(DeskletEventKind::PointerMove), 1);

        desklet.set_shell_mode(mobile);
        assert_eq!(desklet.handler_count(DeskletEventKind::PointerMove), 0);
    }

    #[test]
    fn mobile_click_toggles_open_state_and_stops_propagation() {
        let mut desklet = controller(
            DeskletConfig::default(),
            ShellMode {
                view_list: ViewListMode::Default,
                mobile: true,
            },
        );
        desklet.refresh();
        let click = DeskletEvent::Click {
            pointer: PointerPosition::default(),
        };

        assert!(desklet.handle_event(click).stop_propagation);
        assert_eq!(desklet.state().open_state, OpenState::Opening);
        assert!(!desklet.handle_event(click).stop_propagation);

        desklet.settle(Transition::Opened);
        assert!(desklet.handle_event(click).stop_propagation);
        assert_eq!(desklet.state().open_state, OpenState::Closing);
    }

    #[test]
    fn desktop_clicks_never_toggle() {
        let mut desklet = controller(DeskletConfig::default(), ShellMode::default());
        let outcome = desklet.handle_event(DeskletEvent::Click {
            pointer: PointerPosition::default(),
        });
        assert_eq!(outcome, EventOutcome::default());
        assert_eq!(desklet.state().open_state, OpenState::Closed);
    }

    #[test]
    fn drop_registers_best_effort_and_queues_persistence() {
        let mut desklet = controller(DeskletConfig::default(), ShellMode::default());
        let files = vec![
            DroppedFile {
                kind: DroppedFileKind::Other,
                title: None,
                filename: "Trash".to_string(),
                path: "Home:Trash/".to_string(),
                icon_file: None,
            },
            DroppedFile {
                kind: DroppedFileKind::File,
                title: None,
                filename: "todo.txt".to_string(),
                path: "Home:todo.txt".to_string(),
                icon_file: None,
            },
        ];
        assert_eq!(desklet.drop_files(&files), 1);
        let persisted: Vec<DeskletEffect> = desklet
            .drain_effects()
            .into_iter()
            .filter(|effect| matches!(effect, DeskletEffect::PersistDockItem(_)))
            .collect();
        assert_eq!(persisted.len(), 1);
    }

    #[test]
    fn read_config_keeps_current_options_on_parse_error() {
        let mut desklet = controller(DeskletConfig::default(), ShellMode::default());
        assert!(desklet.read_config(Some("{not json")).is_err());
        assert_eq!(desklet.state().config, DeskletConfig::default());

        desklet
            .read_config(Some(r#"{"layout":"top_left","size":40}"#))
            .expect("valid options");
        assert_eq!(desklet.state().config.anchor, EdgeAlignment::TopLeft);
        assert_eq!(desklet.state().orientation, Orientation::Horizontal);

        desklet.read_config(None).expect("re-render");
        assert_eq!(desklet.state().config.item_size, Some(40));
    }

    #[test]
    fn huge_size_option_lays_out_with_capped_icons() {
        let mut desklet = controller(
            DeskletConfig::anchored(EdgeAlignment::BottomCenter),
            ShellMode::default(),
        );
        for n in 0..4 {
            desklet.add_launcher(spec(&format!("App{n}")));
        }
        desklet
            .read_config(Some(r#"{"layout":"bottom_center","size":2147483647}"#))
            .expect("valid options");

        let layout = desklet.state().layout.clone().expect("layout");
        let unit = MAX_ITEM_SIZE + ITEM_MARGIN;
        assert_eq!(layout.occupied_blocks, 4);
        assert_eq!(layout.container_height, ITEM_MARGIN + 4 * unit);
        assert_eq!(layout.container_width, unit + ITEM_MARGIN);
    }

    #[test]
    fn activating_unknown_items_is_an_error() {
        let mut desklet = controller(DeskletConfig::default(), ShellMode::default());
        let region = desklet.add_window_list_region();
        assert_eq!(desklet.activate(region), Err(DeskletError::ItemNotFound));
        assert_eq!(desklet.activate(ItemId(77)), Err(DeskletError::ItemNotFound));
    }
}
