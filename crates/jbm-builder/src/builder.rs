//! Bottom-up construction of a new document from a stream of events.
//!
//! # Contract
//!
//! Events must nest correctly: every `begin_*` is closed by the matching
//! `end_*`, object values are preceded by exactly one `key`, and array
//! elements never are. Breaking the contract is a bug in the caller, so every
//! violation panics at the offending call instead of returning an error.

use jbm_cursor::Token;
use jbm_types::{canonicalize_entries, Array, Document, Kind, Object};
use tracing::trace;

enum Frame {
    Object {
        entries: Vec<(String, Document)>,
        pending_key: Option<String>,
    },
    Array {
        elems: Vec<Document>,
    },
}

impl Frame {
    fn kind(&self) -> Kind {
        match self {
            Self::Object { .. } => Kind::Object,
            Self::Array { .. } => Kind::Array,
        }
    }
}

/// A stack of in-progress containers.
///
/// When the outermost container closes, the matching `end_*` call returns the
/// finished document and the builder is empty again, ready for reuse.
#[derive(Default)]
pub struct Builder {
    stack: Vec<Frame>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open containers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` if no container is open.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn begin_object(&mut self) {
        self.stack.push(Frame::Object {
            entries: Vec::new(),
            pending_key: None,
        });
    }

    pub fn begin_array(&mut self) {
        self.stack.push(Frame::Array { elems: Vec::new() });
    }

    /// Set the key for the next value of the open object.
    ///
    /// # Panics
    ///
    /// If the top of the stack is not an object, or already holds a key
    /// waiting for its value.
    #[track_caller]
    pub fn key(&mut self, name: impl Into<String>) {
        match self.stack.last_mut() {
            Some(Frame::Object { pending_key, .. }) => {
                if let Some(prev) = pending_key {
                    panic!("builder: key {prev:?} has no value yet");
                }
                *pending_key = Some(name.into());
            }
            Some(Frame::Array { .. }) => panic!("builder: key inside an array"),
            None => panic!("builder: key with no open container"),
        }
    }

    /// Append a value: the next array element, or the value for the pending
    /// object key. Containers are attached as-is, sharing their storage.
    ///
    /// # Panics
    ///
    /// If no container is open, or the open object has no pending key.
    #[track_caller]
    pub fn value(&mut self, value: Document) {
        match self.stack.last_mut() {
            Some(Frame::Array { elems }) => elems.push(value),
            Some(Frame::Object {
                entries,
                pending_key,
            }) => match pending_key.take() {
                Some(key) => entries.push((key, value)),
                None => panic!("builder: object value without a key"),
            },
            None => panic!("builder: value with no open container"),
        }
    }

    /// Close the open object.
    ///
    /// Returns the finished document if it was the outermost container,
    /// otherwise attaches it to the enclosing one and returns `None`.
    ///
    /// Entries appended in canonical order are kept as they are. Out-of-order
    /// or repeated keys are sorted, with the last duplicate winning.
    ///
    /// # Panics
    ///
    /// If the open container is not an object, or a key is still pending.
    #[track_caller]
    pub fn end_object(&mut self) -> Option<Document> {
        let (mut entries, pending_key) = match self.stack.pop() {
            Some(Frame::Object {
                entries,
                pending_key,
            }) => (entries, pending_key),
            Some(frame) => panic!("builder: end_object closes an open {}", frame.kind()),
            None => panic!("builder: end_object with no open container"),
        };
        if let Some(key) = pending_key {
            panic!("builder: end_object with key {key:?} missing its value");
        }

        if canonicalize_entries(&mut entries) {
            trace!(entries = entries.len(), "reordered object entries");
        }
        self.attach(Document::Object(Object::from_canonical_unchecked(entries)))
    }

    /// Close the open array. Same return convention as [`end_object`].
    ///
    /// # Panics
    ///
    /// If the open container is not an array.
    ///
    /// [`end_object`]: Builder::end_object
    #[track_caller]
    pub fn end_array(&mut self) -> Option<Document> {
        let elems = match self.stack.pop() {
            Some(Frame::Array { elems }) => elems,
            Some(frame) => panic!("builder: end_array closes an open {}", frame.kind()),
            None => panic!("builder: end_array with no open container"),
        };
        self.attach(Document::Array(Array::from(elems)))
    }

    /// Feed one cursor token into the builder.
    ///
    /// Returns the finished document when the token closes the outermost
    /// container.
    ///
    /// # Panics
    ///
    /// On `Token::Done`, and on any token the current state does not accept.
    #[track_caller]
    pub fn push(&mut self, token: Token<'_>) -> Option<Document> {
        match token {
            Token::BeginObject => self.begin_object(),
            Token::BeginArray => self.begin_array(),
            Token::Key(k) => self.key(k),
            Token::Scalar(v) => self.value(v.clone()),
            Token::ContainerRef(r) => self.value(r.document().clone()),
            Token::EndObject => return self.end_object(),
            Token::EndArray => return self.end_array(),
            Token::Done => panic!("builder: Done is not a document event"),
        }
        None
    }

    #[track_caller]
    fn attach(&mut self, doc: Document) -> Option<Document> {
        if self.stack.is_empty() {
            return Some(doc);
        }
        self.value(doc);
        None
    }
}
