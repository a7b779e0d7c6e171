//! Typed pointer/click observer registry for a desklet body.

use std::collections::BTreeMap;

use crate::{
    model::PointerPosition,
    reducer::DeskletEffect,
    scroll::ListMeasurement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeskletEventKind {
    PointerDown,
    PointerUp,
    PointerMove,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeskletEvent {
    PointerDown {
        pointer: PointerPosition,
    },
    PointerUp {
        pointer: PointerPosition,
    },
    /// `list` carries the companion list measurement when the list is mounted.
    PointerMove {
        pointer: PointerPosition,
        list: Option<ListMeasurement>,
    },
    Click {
        pointer: PointerPosition,
    },
}

impl DeskletEvent {
    pub fn kind(&self) -> DeskletEventKind {
        match self {
            Self::PointerDown { .. } => DeskletEventKind::PointerDown,
            Self::PointerUp { .. } => DeskletEventKind::PointerUp,
            Self::PointerMove { .. } => DeskletEventKind::PointerMove,
            Self::Click { .. } => DeskletEventKind::Click,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// Handler invoked for every event of its kind. It may hand back one effect for the host.
pub type EventHandler = Box<dyn FnMut(&DeskletEvent) -> Option<DeskletEffect>>;

/// Ordered handler lists per event kind.
#[derive(Default)]
pub struct EventRegistry {
    next_id: u64,
    handlers: BTreeMap<DeskletEventKind, Vec<(SubscriptionId, EventHandler)>>,
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: BTreeMap<DeskletEventKind, usize> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("handlers", &counts)
            .finish()
    }
}

impl EventRegistry {
    /// Appends a handler for `kind`; handlers run in subscription order.
    pub fn subscribe(
        &mut self,
        kind: DeskletEventKind,
        handler: impl FnMut(&DeskletEvent) -> Option<DeskletEffect> + 'static,
    ) -> SubscriptionId {
        self.next_id = self.next_id.saturating_add(1);
        let id = SubscriptionId(self.next_id);
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(sub, _)| *sub == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Runs every handler registered for the event's kind and collects their effects.
    pub fn emit(&mut self, event: &DeskletEvent) -> Vec<DeskletEffect> {
        let Some(handlers) = self.handlers.get_mut(&event.kind()) else {
            return Vec::new();
        };
        handlers
            .iter_mut()
            .filter_map(|(_, handler)| handler(event))
            .collect()
    }

    pub fn handler_count(&self, kind: DeskletEventKind) -> usize {
        self.handlers.get(&kind).map(Vec::len).unwrap_or(0)
    }
}
