//! Drains desklet effects in order and runs them against the host services.
//!
//! Timers and async host calls use `leptos` scheduling in the browser. Native builds settle
//! transitions immediately and drive futures to completion inline, which keeps the executor
//! testable without a browser.

use std::{cell::RefCell, collections::BTreeMap, future::Future, rc::Rc};

use desklet_host::HostServices;
use leptos::logging;

use crate::{
    controller::{DeskletController, EventOutcome, ShellMode},
    events::DeskletEvent,
    manager::DeskletManager,
    model::{DeskletId, DeskletState, ItemId, Transition},
    reducer::{DeskletEffect, DeskletError},
};

fn spawn_detached(task: impl Future<Output = ()> + 'static) {
    #[cfg(target_arch = "wasm32")]
    leptos::spawn_local(task);
    #[cfg(not(target_arch = "wasm32"))]
    futures::executor::block_on(task);
}

/// Receives every desklet's state after each flush.
pub type StateObserver = Rc<dyn Fn(BTreeMap<DeskletId, DeskletState>)>;

/// Shared handle to the session's desklets plus the effect executor.
#[derive(Clone)]
pub struct DeskletRuntime {
    manager: Rc<RefCell<DeskletManager>>,
    host: HostServices,
    observer: Rc<RefCell<Option<StateObserver>>>,
}

impl DeskletRuntime {
    pub fn new(host: HostServices, mode: ShellMode) -> Self {
        Self {
            manager: Rc::new(RefCell::new(DeskletManager::new(host.clone(), mode))),
            host,
            observer: Rc::new(RefCell::new(None)),
        }
    }

    /// Current state of every desklet.
    pub fn snapshot(&self) -> BTreeMap<DeskletId, DeskletState> {
        self.manager.borrow().states()
    }

    /// Installs the observer notified after every flush, replacing any previous one, and
    /// notifies it once with the current state.
    pub fn observe(&self, observer: impl Fn(BTreeMap<DeskletId, DeskletState>) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
        self.publish();
    }

    fn publish(&self) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(self.snapshot());
        }
    }

    /// Runs `f` against the manager, then executes whatever effects it queued.
    pub fn with_manager<R>(&self, f: impl FnOnce(&mut DeskletManager) -> R) -> R {
        let result = f(&mut self.manager.borrow_mut());
        self.flush();
        result
    }

    /// Runs `f` against one desklet, then flushes.
    ///
    /// # Errors
    ///
    /// Returns [`DeskletError::DeskletNotFound`] for unknown ids.
    pub fn with_desklet<R>(
        &self,
        id: DeskletId,
        f: impl FnOnce(&mut DeskletController) -> R,
    ) -> Result<R, DeskletError> {
        self.with_manager(|manager| manager.get_mut(id).map(f))
    }

    /// Routes a UI event to a desklet and runs the resulting effects.
    pub fn dispatch_event(&self, id: DeskletId, event: DeskletEvent) -> EventOutcome {
        match self.with_desklet(id, |desklet| desklet.handle_event(event)) {
            Ok(outcome) => outcome,
            Err(err) => {
                logging::warn!("desklet event dropped: {err}");
                EventOutcome::default()
            }
        }
    }

    /// Executes queued effects until no desklet has any left, then publishes the settled state.
    pub fn flush(&self) {
        loop {
            // The borrow ends before any effect runs so effects may dispatch back in.
            let batch = self.manager.borrow_mut().drain_effects();
            if batch.is_empty() {
                self.publish();
                return;
            }
            for (id, effect) in batch {
                self.run_effect(id, effect);
            }
        }
    }

    fn settle(&self, id: DeskletId, transition: Transition) {
        if let Err(err) = self.with_desklet(id, |desklet| desklet.settle(transition)) {
            logging::warn!("desklet transition dropped: {err}");
        }
    }

    fn apply_bookmark(&self, id: DeskletId, item_id: ItemId, raw: String) {
        if self
            .with_desklet(id, |desklet| desklet.apply_bookmark_metadata(item_id, raw))
            .is_err()
        {
            logging::debug_warn!("bookmark metadata for a missing desklet ignored");
        }
    }

    fn run_effect(&self, id: DeskletId, effect: DeskletEffect) {
        let shell = &self.host.shell;
        match effect {
            DeskletEffect::PadScroller(insets) => shell.pad_scroller(insets),
            DeskletEffect::ScrollWindowList(scroll) => {
                shell.scroll_window_list(scroll.scroll_left, scroll.scroll_top)
            }
            DeskletEffect::HideKeyboard => shell.hide_keyboard(),
            DeskletEffect::CloseSidePanel => shell.close_side_panel(),
            DeskletEffect::SetAppsShowing(showing) => shell.set_apps_showing(showing),
            DeskletEffect::RedrawIconGrid => shell.redraw_icon_grid(),
            DeskletEffect::RunCommand(command) => shell.run_command(&command),
            DeskletEffect::ScheduleTransition {
                transition,
                delay_ms,
            } => self.schedule_transition(id, transition, delay_ms),
            DeskletEffect::FetchBookmarkMetadata { item_id, path } => {
                let runtime = self.clone();
                let bookmarks = self.host.bookmarks.clone();
                spawn_detached(async move {
                    match bookmarks.load_bookmark(&path).await {
                        Ok(raw) => runtime.apply_bookmark(id, item_id, raw),
                        Err(err) => logging::debug_warn!("bookmark {path} unreadable: {err}"),
                    }
                });
            }
            DeskletEffect::PersistDockItem(record) => {
                let store = self.host.dock_store.clone();
                let shell = shell.clone();
                spawn_detached(async move {
                    match store.save_dock_item(&record).await {
                        Ok(()) => shell.reload_docks(),
                        Err(err) => logging::warn!(
                            "persist dock item {} failed: {err}",
                            record.application
                        ),
                    }
                });
            }
            DeskletEffect::OpenExternalUrl(url) => {
                let external_urls = self.host.external_urls.clone();
                spawn_detached(async move {
                    if let Err(err) = external_urls.open_url(&url).await {
                        logging::warn!("open external url failed: {err}");
                    }
                });
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_transition(&self, id: DeskletId, transition: Transition, delay_ms: u32) {
        let runtime = self.clone();
        leptos::set_timeout(
            move || runtime.settle(id, transition),
            std::time::Duration::from_millis(u64::from(delay_ms)),
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_transition(&self, id: DeskletId, transition: Transition, _delay_ms: u32) {
        self.settle(id, transition);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use desklet_host::{DockItemRecord, DockItemType, MemoryDockItemStore, ShellSurface};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{DeskletConfig, OpenState, PointerPosition};

    #[derive(Default)]
    struct RecordingShell {
        calls: RefCell<Vec<String>>,
    }

    impl ShellSurface for RecordingShell {
        fn pad_scroller(&self, insets: desklet_host::EdgeInsets) {
            self.calls.borrow_mut().push(format!("pad {}", insets.right));
        }

        fn scroll_window_list(&self, scroll_left: f64, scroll_top: f64) {
            self.calls
                .borrow_mut()
                .push(format!("scroll {scroll_left} {scroll_top}"));
        }

        fn hide_keyboard(&self) {
            self.calls.borrow_mut().push("hide keyboard".to_string());
        }

        fn close_side_panel(&self) {
            self.calls.borrow_mut().push("close panel".to_string());
        }

        fn set_apps_showing(&self, showing: bool) {
            self.calls.borrow_mut().push(format!("apps showing {showing}"));
        }

        fn redraw_icon_grid(&self) {
            self.calls.borrow_mut().push("redraw".to_string());
        }

        fn reload_docks(&self) {
            self.calls.borrow_mut().push("reload docks".to_string());
        }

        fn run_command(&self, command: &str) {
            self.calls.borrow_mut().push(format!("run {command}"));
        }
    }

    #[test]
    fn mobile_click_round_trip_settles_and_redraws() {
        let shell = Rc::new(RecordingShell::default());
        let mut host = HostServices::noop();
        host.shell = shell.clone();
        let runtime = DeskletRuntime::new(
            host,
            ShellMode {
                mobile: true,
                ..ShellMode::default()
            },
        );
        let id = runtime.with_manager(|manager| manager.create_desklet(DeskletConfig::default()));
        let click = DeskletEvent::Click {
            pointer: PointerPosition::default(),
        };

        assert!(runtime.dispatch_event(id, click).stop_propagation);
        assert_eq!(
            runtime
                .with_desklet(id, |desklet| desklet.state().open_state)
                .expect("desklet"),
            OpenState::Open
        );
        assert!(runtime.dispatch_event(id, click).stop_propagation);
        assert_eq!(
            *shell.calls.borrow(),
            vec![
                "hide keyboard".to_string(),
                "close panel".to_string(),
                "apps showing true".to_string(),
                "apps showing false".to_string(),
                "redraw".to_string(),
            ]
        );
    }

    #[test]
    fn persisted_drops_reload_docks() {
        let shell = Rc::new(RecordingShell::default());
        let store = Rc::new(MemoryDockItemStore::default());
        let mut host = HostServices::noop();
        host.shell = shell.clone();
        host.dock_store = store.clone();
        let runtime = DeskletRuntime::new(host, ShellMode::default());
        let id = runtime.with_manager(|manager| manager.create_desklet(DeskletConfig::default()));
        shell.calls.borrow_mut().clear();

        let record = DockItemRecord {
            item_type: DockItemType::File,
            application: "Home:todo.txt".to_string(),
            icon: "todo.txt".to_string(),
            short_description: String::new(),
        };
        runtime.run_effect(id, DeskletEffect::PersistDockItem(record.clone()));

        assert_eq!(store.saved(), vec![record]);
        assert_eq!(*shell.calls.borrow(), vec!["reload docks".to_string()]);
    }

    #[test]
    fn observer_sees_settled_transitions_and_bookmark_updates() {
        use desklet_host::MemoryBookmarkSource;

        use crate::{
            launcher::{BookmarkSpec, LauncherDescriptor},
            model::LauncherIcon,
        };

        let bookmarks = MemoryBookmarkSource::default();
        bookmarks.insert("Home:docs.url", r#"{"link":"https://docs.example.net/a"}"#);
        let mut host = HostServices::noop();
        host.bookmarks = Rc::new(bookmarks);
        let runtime = DeskletRuntime::new(
            host,
            ShellMode {
                mobile: true,
                ..ShellMode::default()
            },
        );
        let id = runtime.with_manager(|manager| manager.create_desklet(DeskletConfig::default()));

        let published: Rc<RefCell<Vec<BTreeMap<DeskletId, DeskletState>>>> = Rc::default();
        let sink = published.clone();
        runtime.observe(move |states| sink.borrow_mut().push(states));
        assert_eq!(published.borrow().len(), 1);

        runtime.dispatch_event(
            id,
            DeskletEvent::Click {
                pointer: PointerPosition::default(),
            },
        );
        let open_state = published
            .borrow()
            .last()
            .and_then(|states| states.get(&id))
            .map(|state| state.open_state);
        assert_eq!(open_state, Some(OpenState::Open));

        runtime
            .with_desklet(id, |desklet| {
                desklet.add_launcher(LauncherDescriptor::Bookmark(BookmarkSpec {
                    path: "Home:docs.url".to_string(),
                    title: Some("Docs".to_string()),
                }))
            })
            .expect("desklet");
        let icon = published
            .borrow()
            .last()
            .and_then(|states| states.get(&id))
            .and_then(|state| state.items.first())
            .and_then(|item| item.launcher.as_ref())
            .map(|record| record.icon.clone());
        assert_eq!(
            icon,
            Some(LauncherIcon::Bookmark {
                label: "Docs".to_string(),
                favicon: Some("https://docs.example.net/favicon.ico".to_string()),
            })
        );
        assert_eq!(runtime.snapshot(), published.borrow().last().cloned().unwrap_or_default());
    }

    #[test]
    fn events_for_unknown_desklets_are_dropped() {
        let runtime = DeskletRuntime::new(HostServices::noop(), ShellMode::default());
        let outcome = runtime.dispatch_event(
            DeskletId(5),
            DeskletEvent::Click {
                pointer: PointerPosition::default(),
            },
        );
        assert_eq!(outcome, EventOutcome::default());
    }
}
