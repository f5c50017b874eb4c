use std::sync::Arc;

use crate::document::Document;

/// An immutable, ordered sequence of documents.
///
/// Like [`Object`](crate::Object), the element list is reference counted and
/// clones share storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Array {
    elems: Arc<Vec<Document>>,
}

impl Array {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.elems.get(index)
    }

    /// The elements in stored order.
    pub fn as_slice(&self) -> &[Document] {
        &self.elems
    }

    /// Iterate over elements in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.elems.iter()
    }

    /// Returns `true` if both arrays share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.elems, &other.elems)
    }
}

impl From<Vec<Document>> for Array {
    fn from(elems: Vec<Document>) -> Self {
        Self {
            elems: Arc::new(elems),
        }
    }
}

impl FromIterator<Document> for Array {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
