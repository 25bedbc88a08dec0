//! Classification hierarchy table
//!
//! Maps a classification key to its parent key. Keys are kept sorted so that
//! prefix (fuzzy) matching always picks the same entry for the same input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Child key → parent key hierarchy used by schema aggregation.
///
/// Deserializes from a plain JSON object:
///
/// ```rust
/// use supergraph_core::models::SchemaTable;
///
/// let table: SchemaTable = serde_json::from_str(
///     r#"{ "DOG": "MAMMAL", "MAMMAL": "ANIMAL" }"#,
/// ).unwrap();
/// assert_eq!(table.parent_of("DOG"), Some("MAMMAL"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaTable {
    entries: BTreeMap<String, String>,
}

impl SchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(child, parent)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(child, parent)| (child.into(), parent.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, child: impl Into<String>, parent: impl Into<String>) {
        self.entries.insert(child.into(), parent.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn parent_of(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the first table key (in sorted order) whose space-stripped prefix
    /// of `prefix_len` characters starts `raw`.
    ///
    /// Keys that are empty after stripping spaces never match.
    pub fn fuzzy_match(&self, raw: &str, prefix_len: usize) -> Option<&str> {
        self.entries.keys().map(String::as_str).find(|key| {
            let prefix: String = key.chars().filter(|c| *c != ' ').take(prefix_len).collect();
            !prefix.is_empty() && raw.starts_with(&prefix)
        })
    }
}
