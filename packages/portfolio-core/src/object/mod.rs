//! In-memory document object graph.
//!
//! Scalars (`Null`, `Bool`, `Integer`, `Real`, `Name`, `String`) are plain
//! values. Containers (`Array`, `Dict`, `Stream`) are shared handles: cloning
//! one yields another reference to the same container, and every mutation is
//! visible through all of them. Containers may reference each other in
//! cycles; walkers must guard with [`ObjectId`] sets.

mod array;
mod dict;
mod stream;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

pub use array::Array;
pub use dict::Dict;
pub use stream::Stream;

/// Identity of a container, stable for as long as the container is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub(crate) fn of<T>(ptr: *const T) -> Self {
        Self(ptr as *const () as usize)
    }
}

/// Name object (`/Subtype`, `/Filespec`, schema field keys).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Name> for Name {
    fn from(name: &Name) -> Self {
        name.clone()
    }
}

/// Byte string object.
///
/// Text strings are stored as plain bytes when they are ASCII and as
/// UTF-16BE with a byte order mark otherwise.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdfString(Vec<u8>);

impl PdfString {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Encodes a text string.
    pub fn from_text(text: &str) -> Self {
        if text.is_ascii() {
            return Self(text.as_bytes().to_vec());
        }
        let mut bytes = Vec::with_capacity(2 + text.len() * 2);
        bytes.extend_from_slice(&[0xFE, 0xFF]);
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decodes the string as text, honoring UTF-16BE and UTF-8 byte order marks.
    pub fn to_text(&self) -> String {
        match self.0.as_slice() {
            [0xFE, 0xFF, rest @ ..] => {
                let units: Vec<u16> = rest
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
            bytes => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

impl fmt::Debug for PdfString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?})", self.to_text())
    }
}

/// A node of the document object graph.
#[derive(Debug, Clone)]
pub enum Object {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Name(Name),
    String(PdfString),
    Array(Array),
    Dict(Dict),
    Stream(Stream),
}

impl Object {
    /// Creates a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(Name::new(name))
    }

    /// Creates a text string object.
    pub fn text(text: &str) -> Self {
        Object::String(PdfString::from_text(text))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Object::String(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            Object::Real(r) => Some(*r as i64),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&PdfString> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Object::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the dictionary of a dict object, or the stream dictionary of a stream.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dict(d) => Some(d),
            Object::Stream(s) => Some(s.dict()),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Object::Stream(s) => Some(s),
            _ => None,
        }
    }

    /// Decodes a string object as text.
    pub fn to_text(&self) -> Option<String> {
        self.as_string().map(PdfString::to_text)
    }

    /// Container identity; `None` for scalars.
    pub fn id(&self) -> Option<ObjectId> {
        match self {
            Object::Array(a) => Some(a.id()),
            Object::Dict(d) => Some(d.id()),
            Object::Stream(s) => Some(s.id()),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Object::Null => 0,
            Object::Bool(_) => 1,
            Object::Integer(_) | Object::Real(_) => 2,
            Object::Name(_) => 3,
            Object::String(_) => 4,
            Object::Array(_) => 5,
            Object::Dict(_) => 6,
            Object::Stream(_) => 7,
        }
    }

    /// Total order over objects, used for name-tree keys.
    ///
    /// Strings compare bytewise, names and numbers by value; containers
    /// compare by identity. Objects of different kinds order by kind.
    pub fn compare(&self, other: &Object) -> Ordering {
        match (self, other) {
            (Object::String(a), Object::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Object::Name(a), Object::Name(b)) => a.cmp(b),
            (Object::Integer(a), Object::Integer(b)) => a.cmp(b),
            (Object::Real(a), Object::Real(b)) => a.total_cmp(b),
            (Object::Integer(a), Object::Real(b)) => (*a as f64).total_cmp(b),
            (Object::Real(a), Object::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Object::Bool(a), Object::Bool(b)) => a.cmp(b),
            _ => self
                .rank()
                .cmp(&other.rank())
                .then_with(|| self.id().cmp(&other.id())),
        }
    }

    /// Renders the object graph reachable from `self` as JSON for diagnostics.
    ///
    /// Names render as `"/Name"`, strings as decoded text. A container that is
    /// already being rendered higher up renders as `"<cycle>"`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut visiting = HashSet::new();
        self.to_json_inner(&mut visiting)
    }

    fn to_json_inner(&self, visiting: &mut HashSet<ObjectId>) -> serde_json::Value {
        use serde_json::Value;

        if let Some(id) = self.id() {
            if !visiting.insert(id) {
                return Value::String("<cycle>".to_string());
            }
        }
        let value = match self {
            Object::Null => Value::Null,
            Object::Bool(b) => Value::Bool(*b),
            Object::Integer(i) => Value::from(*i),
            Object::Real(r) => Value::from(*r),
            Object::Name(n) => Value::String(n.to_string()),
            Object::String(s) => Value::String(s.to_text()),
            Object::Array(a) => Value::Array(
                a.to_vec()
                    .iter()
                    .map(|item| item.to_json_inner(visiting))
                    .collect(),
            ),
            Object::Dict(d) => dict_to_json(d, visiting),
            Object::Stream(s) => serde_json::json!({
                "dict": dict_to_json(s.dict(), visiting),
                "length": s.len(),
            }),
        };
        if let Some(id) = self.id() {
            visiting.remove(&id);
        }
        value
    }
}

fn dict_to_json(dict: &Dict, visiting: &mut HashSet<ObjectId>) -> serde_json::Value {
    let map = dict
        .entries()
        .into_iter()
        .map(|(key, value)| (key.as_str().to_string(), value.to_json_inner(visiting)))
        .collect();
    serde_json::Value::Object(map)
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Bool(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Real(value)
    }
}

impl From<Name> for Object {
    fn from(value: Name) -> Self {
        Object::Name(value)
    }
}

impl From<PdfString> for Object {
    fn from(value: PdfString) -> Self {
        Object::String(value)
    }
}

impl From<Array> for Object {
    fn from(value: Array) -> Self {
        Object::Array(value)
    }
}

impl From<Dict> for Object {
    fn from(value: Dict) -> Self {
        Object::Dict(value)
    }
}

impl From<Stream> for Object {
    fn from(value: Stream) -> Self {
        Object::Stream(value)
    }
}
