//! Bookmark metadata source contracts.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`BookmarkSource`].
pub type BookmarkFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service reading the raw contents of a bookmark file.
pub trait BookmarkSource {
    /// Loads the raw (JSON) text stored at `path`.
    fn load_bookmark<'a>(&'a self, path: &'a str) -> BookmarkFuture<'a, Result<String, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Bookmark source for targets without file access.
pub struct NoopBookmarkSource;

impl BookmarkSource for NoopBookmarkSource {
    fn load_bookmark<'a>(&'a self, path: &'a str) -> BookmarkFuture<'a, Result<String, String>> {
        Box::pin(async move { Err(format!("bookmark source unavailable for `{path}`")) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory bookmark files keyed by path.
pub struct MemoryBookmarkSource {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBookmarkSource {
    /// Stores raw bookmark contents at `path`.
    pub fn insert(&self, path: impl Into<String>, raw: impl Into<String>) {
        self.inner.borrow_mut().insert(path.into(), raw.into());
    }
}

impl BookmarkSource for MemoryBookmarkSource {
    fn load_bookmark<'a>(&'a self, path: &'a str) -> BookmarkFuture<'a, Result<String, String>> {
        Box::pin(async move {
            self.inner
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| format!("bookmark not found: {path}"))
        })
    }
}
