//! Shared fixtures for integration tests.

use portfolio_core::{Dict, Document, Object, PdfString};

/// Builds a document whose schema holds one descriptor per `(key, subtype, name)`,
/// in the given order.
pub fn document_with_schema(fields: &[(&str, &str, &str)]) -> Document {
    let doc = Document::new();
    let schema = Dict::new();
    for (order, (key, subtype, name)) in fields.iter().enumerate() {
        schema.put(
            *key,
            Dict::from_entries([
                ("Subtype", Object::name(*subtype)),
                ("N", Object::String(PdfString::from_text(name))),
                ("O", Object::Integer(order as i64)),
            ]),
        );
    }
    doc.trailer().put_path(&["Root", "Collection", "Schema"], schema);
    doc
}

/// The standard file-browser columns plus one user text column.
pub fn standard_document() -> Document {
    document_with_schema(&[
        ("file", "F", "Name"),
        ("desc", "Desc", "Description"),
        ("size", "Size", "Size"),
        ("mod", "ModDate", "Modified"),
        ("made", "CreationDate", "Created"),
        ("note", "S", "Note"),
    ])
}

pub const FILENAME: usize = 0;
pub const DESCRIPTION: usize = 1;
pub const SIZE: usize = 2;
pub const MODIFIED: usize = 3;
pub const CREATED: usize = 4;
pub const NOTE: usize = 5;

/// Entry names in rank order.
pub fn entry_names(doc: &mut Document) -> Vec<String> {
    let mut portfolio = doc.portfolio();
    let count = portfolio.entry_count().unwrap();
    (0..count)
        .map(|i| portfolio.entry(i).unwrap().name_text().unwrap())
        .collect()
}
