use std::fmt;

use serde_json::Number;

use crate::array::Array;
use crate::error::TypeError;
use crate::object::Object;

/// A document value.
///
/// Documents are trees: scalars at the leaves, arrays and objects as inner
/// nodes. They are immutable once built; containers share their storage
/// when cloned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Document {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
}

/// The variant tag of a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Returns `true` for `Array` and `Object`.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// A borrowed view of a container document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container<'a> {
    Object(&'a Object),
    Array(&'a Array),
}

impl<'a> Container<'a> {
    /// `Kind::Object` or `Kind::Array`.
    pub fn kind(self) -> Kind {
        match self {
            Self::Object(_) => Kind::Object,
            Self::Array(_) => Kind::Array,
        }
    }

    /// Number of entries or elements.
    pub fn len(self) -> usize {
        match self {
            Self::Object(o) => o.len(),
            Self::Array(a) => a.len(),
        }
    }

    /// Returns `true` if the container holds nothing.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Copy the container into an owned document. Storage is shared.
    pub fn to_document(self) -> Document {
        match self {
            Self::Object(o) => Document::Object(o.clone()),
            Self::Array(a) => Document::Array(a.clone()),
        }
    }
}

impl Document {
    /// The variant tag.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    /// Build a number document from a float. Fails on NaN or infinity.
    pub fn try_from_f64(value: f64) -> Result<Self, TypeError> {
        Number::from_f64(value)
            .map(Self::Number)
            .ok_or(TypeError::NonFiniteNumber(value))
    }

    /// Borrow as a container, or `None` for scalars.
    pub fn as_container(&self) -> Option<Container<'_>> {
        match self {
            Self::Object(o) => Some(Container::Object(o)),
            Self::Array(a) => Some(Container::Array(a)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Index into an object by key. Returns `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Greatest nesting depth. Scalars have depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(o) => 1 + o.iter().map(|(_, v)| v.depth()).max().unwrap_or(0),
            Self::Array(a) => 1 + a.iter().map(Document::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<bool> for Document {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Document {
    fn from(v: i64) -> Self {
        Self::Number(v.into())
    }
}

impl From<u64> for Document {
    fn from(v: u64) -> Self {
        Self::Number(v.into())
    }
}

impl From<i32> for Document {
    fn from(v: i32) -> Self {
        Self::Number(v.into())
    }
}

impl From<&str> for Document {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Document {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Object> for Document {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl From<Array> for Document {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Vec<Document>> for Document {
    fn from(v: Vec<Document>) -> Self {
        Self::Array(Array::from(v))
    }
}

impl TryFrom<Document> for Object {
    type Error = TypeError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        match doc {
            Document::Object(o) => Ok(o),
            other => Err(TypeError::UnexpectedKind {
                expected: Kind::Object,
                actual: other.kind(),
            }),
        }
    }
}

impl TryFrom<Document> for Array {
    type Error = TypeError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        match doc {
            Document::Array(a) => Ok(a),
            other => Err(TypeError::UnexpectedKind {
                expected: Kind::Array,
                actual: other.kind(),
            }),
        }
    }
}
