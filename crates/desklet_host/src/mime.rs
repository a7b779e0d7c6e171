//! MIME handler lookup by file extension.

use serde::{Deserialize, Serialize};

/// Host service resolving the executable that opens files with a given extension.
pub trait MimeResolver {
    /// Resolves the handler for `ext` (leading dot included, e.g. `.txt`).
    fn resolve_handler_for_extension(&self, ext: &str) -> Option<String>;
}

/// One registered handler and the extensions it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeTypeEntry {
    /// Executable that opens the listed types.
    pub executable: String,
    /// Extensions with leading dot.
    pub types: Vec<String>,
}

/// In-memory MIME table. First registered handler wins; extension matching is ASCII
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeTable {
    /// Registered handlers in lookup order.
    pub entries: Vec<MimeTypeEntry>,
}

impl MimeTable {
    /// Builds a table from entries.
    pub fn new(entries: Vec<MimeTypeEntry>) -> Self {
        Self { entries }
    }
}

impl MimeResolver for MimeTable {
    fn resolve_handler_for_extension(&self, ext: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| entry.types.iter().any(|t| t.eq_ignore_ascii_case(ext)))
            .map(|entry| entry.executable.clone())
    }
}
