//! Portfolio (collection) support for structured documents.
//!
//! Provides the in-memory object graph, the name-tree index of embedded
//! files, the ordered portfolio schema, and the entry manager that ties
//! them together.

pub mod config;
pub mod document;
pub mod error;
pub mod object;
pub mod portfolio;
pub mod schema;
pub mod tree;

pub use config::PortfolioConfig;
pub use document::{Document, Version};
pub use error::PortfolioError;
pub use object::{Array, Dict, Name, Object, ObjectId, PdfString, Stream};
pub use portfolio::{Portfolio, PortfolioEntry};
pub use schema::{FieldDescriptor, FieldKind, SchemaField, SchemaRegistry};
