//! Dock item persistence contracts and adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`DockItemStore`].
pub type DockStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Kind of item persisted to the dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockItemType {
    /// An application launcher.
    Executable,
    /// A plain file opened by its MIME handler.
    File,
}

/// Dock item payload as written by the persistence module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockItemRecord {
    /// Item kind.
    #[serde(rename = "type")]
    pub item_type: DockItemType,
    /// Executable name or file path.
    pub application: String,
    /// Icon source token.
    pub icon: String,
    /// Free-form description, empty for dropped items.
    #[serde(rename = "shortdescription")]
    pub short_description: String,
}

/// Host service persisting dock items. Callers treat saves as fire-and-forget.
pub trait DockItemStore {
    /// Saves one dock item.
    fn save_dock_item<'a>(
        &'a self,
        record: &'a DockItemRecord,
    ) -> DockStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Dock store that accepts and discards every item.
pub struct NoopDockItemStore;

impl DockItemStore for NoopDockItemStore {
    fn save_dock_item<'a>(
        &'a self,
        _record: &'a DockItemRecord,
    ) -> DockStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory dock store keeping saved items in order.
pub struct MemoryDockItemStore {
    inner: Rc<RefCell<Vec<DockItemRecord>>>,
}

impl MemoryDockItemStore {
    /// Returns a copy of every saved record.
    pub fn saved(&self) -> Vec<DockItemRecord> {
        self.inner.borrow().clone()
    }
}

impl DockItemStore for MemoryDockItemStore {
    fn save_dock_item<'a>(
        &'a self,
        record: &'a DockItemRecord,
    ) -> DockStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().push(record.clone());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record() -> DockItemRecord {
        DockItemRecord {
            item_type: DockItemType::File,
            application: "Home:Documents/plan.txt".to_string(),
            icon: ".txt".to_string(),
            short_description: String::new(),
        }
    }

    #[test]
    fn memory_dock_store_keeps_saved_items() {
        let store = MemoryDockItemStore::default();
        let store_obj: &dyn DockItemStore = &store;
        block_on(store_obj.save_dock_item(&record())).expect("save");
        assert_eq!(store.saved(), vec![record()]);
    }

    #[test]
    fn dock_record_uses_module_field_names() {
        let value = serde_json::to_value(record()).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "type": "file",
                "application": "Home:Documents/plan.txt",
                "icon": ".txt",
                "shortdescription": ""
            })
        );
    }
}
