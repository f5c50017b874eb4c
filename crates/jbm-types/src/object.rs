use std::sync::Arc;

use crate::document::Document;
use crate::key::{compare_keys, is_canonical};

/// An immutable object: unique string keys mapped to documents.
///
/// Entries are always held in canonical key order (see [`compare_keys`]).
/// The entry list is reference counted, so cloning an `Object` shares the
/// underlying storage instead of copying the subtree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Object {
    entries: Arc<Vec<(String, Document)>>,
}

impl Object {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an object from entries in any order.
    ///
    /// Entries are stably sorted into canonical order. When the same key
    /// appears more than once, the last occurrence wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Document)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();
        canonicalize_entries(&mut entries);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Build an object from entries that are already canonical.
    ///
    /// The caller guarantees strictly increasing canonical key order. This is
    /// only checked in debug builds.
    pub fn from_canonical_unchecked(entries: Vec<(String, Document)>) -> Self {
        debug_assert!(
            is_canonical(entries.iter().map(|(k, _)| k.as_str())),
            "object entries are not in canonical key order"
        );
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a key by binary search over the canonical order.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.entries
            .binary_search_by(|(k, _)| compare_keys(k, key))
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// Returns `true` if the object holds `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The entries in canonical order.
    pub fn entries(&self) -> &[(String, Document)] {
        &self.entries
    }

    /// Iterate over `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in canonical order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns `true` if both objects share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl FromIterator<(String, Document)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Document)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

/// Bring `entries` into canonical order in place.
///
/// Already-canonical input is left untouched and `false` is returned.
/// Otherwise entries are stably sorted, duplicate keys collapse to their last
/// occurrence, and `true` is returned.
pub fn canonicalize_entries(entries: &mut Vec<(String, Document)>) -> bool {
    if is_canonical(entries.iter().map(|(k, _)| k.as_str())) {
        return false;
    }

    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));

    let mut deduped: Vec<(String, Document)> = Vec::with_capacity(entries.len());
    for entry in entries.drain(..) {
        match deduped.last_mut() {
            Some(last) if last.0 == entry.0 => *last = entry,
            _ => deduped.push(entry),
        }
    }
    *entries = deduped;
    true
}
