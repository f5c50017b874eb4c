use std::fmt;

use jbm_types::{Container, Document, Kind};

/// One step of a cursor walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    BeginObject,
    BeginArray,
    /// An object key. The next token is its value.
    Key(&'a str),
    /// A scalar value: an array element or the value of the preceding key.
    Scalar(&'a Document),
    /// A nested container yielded whole instead of being unrolled.
    ContainerRef(ContainerRef<'a>),
    EndObject,
    EndArray,
    /// The walk is over. Repeats on every further call.
    Done,
}

impl Token<'_> {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns `true` for `Scalar` and `ContainerRef`.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::ContainerRef(_))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeginObject => write!(f, "BEGIN_OBJECT"),
            Self::BeginArray => write!(f, "BEGIN_ARRAY"),
            Self::Key(k) => write!(f, "KEY {k:?}"),
            Self::Scalar(v) => write!(f, "SCALAR {v}"),
            Self::ContainerRef(r) => write!(f, "REF {}[{}]", r.kind(), r.container().len()),
            Self::EndObject => write!(f, "END_OBJECT"),
            Self::EndArray => write!(f, "END_ARRAY"),
            Self::Done => write!(f, "DONE"),
        }
    }
}

/// An opaque handle to a nested container, as yielded with `skip_nested`.
///
/// Always refers to an object or an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerRef<'a> {
    doc: &'a Document,
    container: Container<'a>,
}

impl<'a> ContainerRef<'a> {
    /// Wrap `doc` if it is a container.
    pub fn new(doc: &'a Document) -> Option<Self> {
        doc.as_container().map(|container| Self { doc, container })
    }

    pub(crate) fn from_parts(doc: &'a Document, container: Container<'a>) -> Self {
        Self { doc, container }
    }

    /// `Kind::Object` or `Kind::Array`.
    pub fn kind(&self) -> Kind {
        self.container.kind()
    }

    /// The referenced document.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// The referenced container, ready to be opened by another cursor.
    pub fn container(&self) -> Container<'a> {
        self.container
    }
}
