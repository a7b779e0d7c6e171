//! Reducer actions, side-effect intents, and transition logic for one desklet.

use desklet_host::{DockItemRecord, EdgeInsets};
use thiserror::Error;

use crate::{
    launcher::{favicon_url, parse_bookmark_link},
    layout::{compute_layout, LayoutParams},
    model::{
        DeskletConfig, DeskletItem, DeskletState, ItemId, ItemKind, LauncherIcon,
        LauncherRecord, LayoutEnvironment, OpenState, PixelSize, RenderPhase, ScrollState,
        Transition, ViewListMode, CLOSE_SETTLE_DELAY_MS, OPEN_SETTLE_DELAY_MS,
    },
    placement::resolve_placement,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desklet`] to mutate [`DeskletState`].
pub enum DeskletAction {
    /// Re-run the full layout against the stored environment.
    Refresh,
    /// Replace the measured environment and re-run layout.
    Resize {
        /// Freshly sampled environment.
        environment: LayoutEnvironment,
    },
    /// Replace the desklet options wholesale and re-run layout.
    ReplaceConfig {
        /// New options.
        config: DeskletConfig,
    },
    /// Append a validated launcher and re-run layout.
    AddLauncher {
        /// Launcher to append.
        record: LauncherRecord,
    },
    /// Append a window-list or menu region and re-run layout.
    AddRegion {
        /// Region kind.
        kind: ItemKind,
    },
    /// Remove one item and re-run layout.
    RemoveItem {
        /// Item to remove.
        item_id: ItemId,
    },
    /// Drop every item except the window-list region. Open state and layout are untouched.
    Clear,
    /// Start opening the mobile overlay.
    OpenDesklet,
    /// Start closing the mobile overlay.
    CloseDesklet,
    /// Finish a delayed open/close transition.
    SettleTransition {
        /// Which transition elapsed.
        transition: Transition,
    },
    /// Drop the presentation-only initializing marker.
    MarkInitialized,
    /// Apply fetched bookmark metadata to an item in place, without re-running layout.
    ApplyBookmarkMetadata {
        /// Bookmark item.
        item_id: ItemId,
        /// Raw metadata text.
        raw: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted for the host executor.
pub enum DeskletEffect {
    /// Pad the desktop scroller so it clears the desklet edge.
    PadScroller(EdgeInsets),
    /// Scroll the companion window list.
    ScrollWindowList(ScrollState),
    /// Dismiss the on-screen keyboard.
    HideKeyboard,
    /// Close the sibling drive panel.
    CloseSidePanel,
    /// Toggle the document-level apps-showing marker.
    SetAppsShowing(bool),
    /// Redraw the desktop icon grid.
    RedrawIconGrid,
    /// Dispatch [`DeskletAction::SettleTransition`] after a delay.
    ScheduleTransition {
        /// Transition to settle.
        transition: Transition,
        /// Delay in milliseconds.
        delay_ms: u32,
    },
    /// Fetch bookmark metadata and feed it back through [`DeskletAction::ApplyBookmarkMetadata`].
    FetchBookmarkMetadata {
        /// Bookmark item.
        item_id: ItemId,
        /// Bookmark file path.
        path: String,
    },
    /// Persist a dropped item to the dock configuration.
    PersistDockItem(DockItemRecord),
    /// Open a link outside the desktop.
    OpenExternalUrl(String),
    /// Hand a launcher's custom command back to the shell.
    RunCommand(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors for actions that reference missing state.
pub enum DeskletError {
    /// The item id is not in this desklet.
    #[error("desklet item not found")]
    ItemNotFound,
    /// The desklet id is not registered with the manager.
    #[error("desklet not found")]
    DeskletNotFound,
}

/// Applies a [`DeskletAction`] and collects the resulting side effects.
///
/// # Errors
///
/// Returns [`DeskletError::ItemNotFound`] when removing an item that is not present.
pub fn reduce_desklet(
    state: &mut DeskletState,
    action: DeskletAction,
) -> Result<Vec<DeskletEffect>, DeskletError> {
    let mut effects = Vec::new();
    match action {
        DeskletAction::Refresh => render(state, &mut effects),
        DeskletAction::Resize { environment } => {
            state.environment = environment;
            render(state, &mut effects);
        }
        DeskletAction::ReplaceConfig { config } => {
            state.config = config;
            render(state, &mut effects);
        }
        DeskletAction::AddLauncher { record } => {
            let item_id = next_item_id(state);
            if record.is_bookmark() {
                if let Some(path) = record.executable() {
                    effects.push(DeskletEffect::FetchBookmarkMetadata {
                        item_id,
                        path: path.to_string(),
                    });
                }
            }
            state.items.push(DeskletItem::launcher(item_id, record));
            render(state, &mut effects);
        }
        DeskletAction::AddRegion { kind } => {
            let item_id = next_item_id(state);
            state.items.push(DeskletItem::region(item_id, kind));
            render(state, &mut effects);
        }
        DeskletAction::RemoveItem { item_id } => {
            let before_len = state.items.len();
            state.items.retain(|item| item.id != item_id);
            if state.items.len() == before_len {
                return Err(DeskletError::ItemNotFound);
            }
            render(state, &mut effects);
        }
        DeskletAction::Clear => {
            state
                .items
                .retain(|item| matches!(item.kind, ItemKind::WindowList));
        }
        DeskletAction::OpenDesklet => {
            if state.open_state == OpenState::Closed {
                state.open_state = OpenState::Opening;
                effects.push(DeskletEffect::HideKeyboard);
                effects.push(DeskletEffect::CloseSidePanel);
                effects.push(DeskletEffect::SetAppsShowing(true));
                effects.push(DeskletEffect::ScheduleTransition {
                    transition: Transition::Opened,
                    delay_ms: OPEN_SETTLE_DELAY_MS,
                });
            }
        }
        DeskletAction::CloseDesklet => {
            if state.open_state == OpenState::Open {
                state.open_state = OpenState::Closing;
                effects.push(DeskletEffect::SetAppsShowing(false));
                effects.push(DeskletEffect::ScheduleTransition {
                    transition: Transition::Closed,
                    delay_ms: CLOSE_SETTLE_DELAY_MS,
                });
            }
        }
        DeskletAction::SettleTransition { transition } => match transition {
            Transition::Opened if state.open_state == OpenState::Opening => {
                state.open_state = OpenState::Open;
            }
            Transition::Closed if state.open_state == OpenState::Closing => {
                state.open_state = OpenState::Closed;
                effects.push(DeskletEffect::RedrawIconGrid);
            }
            _ => {}
        },
        DeskletAction::MarkInitialized => {
            state.initializing_class = false;
        }
        DeskletAction::ApplyBookmarkMetadata { item_id, raw } => {
            // Stale responses for removed items land nowhere.
            let Some(record) = state
                .items
                .iter_mut()
                .find(|item| item.id == item_id)
                .and_then(|item| item.launcher.as_mut())
            else {
                return Ok(effects);
            };
            let Some(link) = parse_bookmark_link(&raw) else {
                return Ok(effects);
            };
            if let LauncherIcon::Bookmark { favicon, .. } = &mut record.icon {
                *favicon = favicon_url(&link);
            }
            record.link = Some(link);
        }
    }
    Ok(effects)
}

fn next_item_id(state: &mut DeskletState) -> ItemId {
    let id = ItemId(state.next_item_id);
    state.next_item_id = state.next_item_id.saturating_add(1);
    id
}

fn render(state: &mut DeskletState, effects: &mut Vec<DeskletEffect>) {
    let environment = state.environment;
    // A fixed desklet keeps whatever orientation it last had.
    if !state.config.is_fixed() {
        state.orientation = state.config.anchor.orientation();
    }
    let orientation = state.orientation;
    state.phase = RenderPhase::Rendered;

    if environment.mobile {
        let resolved = resolve_placement(&state.config, &environment, PixelSize::default());
        state.placement = resolved.placement;
        state.reserved_margins = EdgeInsets::ZERO;
        state.layout = None;
        return;
    }

    let docked_extent = matches!(environment.view_list, ViewListMode::DockedList)
        .then(|| environment.screen_extent(orientation));
    let layout = compute_layout(
        &state.items,
        &LayoutParams {
            available_space: environment.available_space(orientation),
            orientation,
            item_size: state.config.item_size(),
            docked_extent,
        },
    );

    let resolved = resolve_placement(&state.config, &environment, layout.container_size());
    state.placement = resolved.placement;
    state.reserved_margins = resolved.reserved_margins.unwrap_or(EdgeInsets::ZERO);
    if let Some(margins) = resolved.reserved_margins {
        effects.push(DeskletEffect::PadScroller(margins));
    }
    state.layout = Some(layout);
}
