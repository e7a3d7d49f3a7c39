//! Schema field definitions.

use std::fmt;

use crate::config::PortfolioConfig;
use crate::object::{Dict, Name, Object};

/// Kind of a schema field, from the descriptor's `Subtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Date,
    Number,
    Filename,
    Description,
    ModificationDate,
    CreationDate,
    Size,
    Unknown,
}

impl FieldKind {
    /// Classifies a `Subtype` name. Absent or unrecognized subtypes are `Unknown`.
    pub fn from_subtype(subtype: Option<&str>) -> Self {
        match subtype {
            Some("S") => FieldKind::Text,
            Some("D") => FieldKind::Date,
            Some("N") => FieldKind::Number,
            Some("F") => FieldKind::Filename,
            Some("Desc") => FieldKind::Description,
            Some("ModDate") => FieldKind::ModificationDate,
            Some("CreationDate") => FieldKind::CreationDate,
            Some("Size") => FieldKind::Size,
            _ => FieldKind::Unknown,
        }
    }

    /// The `Subtype` name for this kind; `None` for `Unknown`.
    pub fn subtype(&self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("S"),
            FieldKind::Date => Some("D"),
            FieldKind::Number => Some("N"),
            FieldKind::Filename => Some("F"),
            FieldKind::Description => Some("Desc"),
            FieldKind::ModificationDate => Some("ModDate"),
            FieldKind::CreationDate => Some("CreationDate"),
            FieldKind::Size => Some("Size"),
            FieldKind::Unknown => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subtype() {
            Some(subtype) => write!(f, "{}", subtype),
            None => write!(f, "unknown"),
        }
    }
}

/// Parameters for adding a new schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Display name (`N`)
    pub name: String,
    /// Whether viewers may edit values of this field (`E`)
    pub editable: bool,
    /// Whether viewers show this field (`V`)
    pub visible: bool,
}

impl FieldDescriptor {
    /// Creates a visible, non-editable descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            editable: false,
            visible: true,
        }
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A column of the portfolio schema.
///
/// `value` is the descriptor dictionary inside the document's schema
/// container; edits made through the registry are written to it directly.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub(crate) key: Name,
    pub(crate) value: Dict,
    pub(crate) order: i64,
    pub(crate) kind: FieldKind,
    pub(crate) editable: bool,
    pub(crate) visible: bool,
    pub(crate) display_name: Option<Object>,
}

impl SchemaField {
    /// Reads a field from its persisted descriptor.
    pub(crate) fn from_descriptor(key: Name, value: Dict, config: &PortfolioConfig) -> Self {
        let order = value.get_int("O").unwrap_or(0);
        let editable = value
            .get("E")
            .map_or(config.default_editable, |e| e.as_bool().unwrap_or(false));
        let visible = value
            .get("V")
            .map_or(config.default_visible, |v| v.as_bool().unwrap_or(false));
        let subtype = value.get_name("Subtype");
        let kind = FieldKind::from_subtype(subtype.as_ref().map(Name::as_str));
        let display_name = value.get("N");

        Self {
            key,
            value,
            order,
            kind,
            editable,
            visible,
            display_name,
        }
    }

    /// Key of this field in the schema container and in every entry's `CI`.
    pub fn key(&self) -> &Name {
        &self.key
    }

    /// The persisted descriptor dictionary.
    pub fn value(&self) -> &Dict {
        &self.value
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn display_name(&self) -> Option<&Object> {
        self.display_name.as_ref()
    }

    /// Display name decoded as text, if it is a string.
    pub fn display_name_text(&self) -> Option<String> {
        self.display_name.as_ref().and_then(Object::to_text)
    }
}
