//! Portfolio schema: field kinds, field descriptors, and the ordered registry.

mod field;
mod registry;

pub use field::{FieldDescriptor, FieldKind, SchemaField};
pub use registry::SchemaRegistry;
