//! Schema management through the document API.

use portfolio_core::{Document, FieldDescriptor, FieldKind, Object, PortfolioError};

use super::helpers::{document_with_schema, standard_document, NOTE};

fn field_names(doc: &mut Document) -> Vec<String> {
    doc.portfolio()
        .schema_fields()
        .iter()
        .map(|f| f.display_name_text().unwrap_or_default())
        .collect()
}

fn orders_match_positions(doc: &mut Document) -> bool {
    doc.portfolio()
        .schema_fields()
        .iter()
        .enumerate()
        .all(|(i, f)| f.order() == i as i64 && f.value().get_int("O") == Some(i as i64))
}

#[test]
fn test_reorder_two_fields() {
    let mut doc = document_with_schema(&[("x", "S", "X"), ("y", "S", "Y")]);

    doc.portfolio().reorder_schema(1, 0).unwrap();

    assert_eq!(field_names(&mut doc), vec!["Y", "X"]);
    let schema = doc
        .trailer()
        .get_path(&["Root", "Collection", "Schema"])
        .unwrap();
    let schema = schema.as_dict().unwrap();
    assert_eq!(schema.get_path(&["y", "O"]), Some(Object::Integer(0)));
    assert_eq!(schema.get_path(&["x", "O"]), Some(Object::Integer(1)));
}

#[test]
fn test_schema_field_info() {
    let mut doc = standard_document();
    let mut portfolio = doc.portfolio();

    assert_eq!(portfolio.schema_count(), 6);
    let note = portfolio.schema_field(NOTE).unwrap();
    assert_eq!(note.key().as_str(), "note");
    assert_eq!(note.kind(), FieldKind::Text);
    assert!(note.visible());
    assert!(!note.editable());
    assert!(matches!(
        portfolio.schema_field(6),
        Err(PortfolioError::IndexOutOfRange { index: 6, len: 6, .. })
    ));
}

#[test]
fn test_rename_field() {
    let mut doc = standard_document();
    doc.portfolio().rename_schema(NOTE, "Remarks").unwrap();

    assert_eq!(field_names(&mut doc)[NOTE], "Remarks");
    let persisted = doc
        .trailer()
        .get_path(&["Root", "Collection", "Schema", "note", "N"])
        .unwrap();
    assert_eq!(persisted.to_text().as_deref(), Some("Remarks"));
}

#[test]
fn test_add_field_creates_schema_container() {
    let mut doc = Document::new();
    let key = doc
        .portfolio()
        .add_schema(0, &FieldDescriptor::new("Owner").visible(false));

    assert_eq!(key.as_str(), "1");
    let descriptor = doc
        .trailer()
        .get_path(&["Root", "Collection", "Schema", "1"])
        .unwrap();
    let descriptor = descriptor.as_dict().unwrap();
    assert_eq!(descriptor.get("V"), Some(Object::Bool(false)));
    assert_eq!(descriptor.get("E"), Some(Object::Bool(false)));
    assert_eq!(descriptor.get_int("O"), Some(0));
    assert_eq!(doc.portfolio().schema_count(), 1);
}

#[test]
fn test_add_field_in_the_middle() {
    let mut doc = document_with_schema(&[("1", "S", "A"), ("2", "S", "C")]);
    let key = doc.portfolio().add_schema(1, &FieldDescriptor::new("B"));

    assert_eq!(key.as_str(), "3");
    assert_eq!(field_names(&mut doc), vec!["A", "B", "C"]);
    assert!(orders_match_positions(&mut doc));
}

#[test]
fn test_delete_field_scrubs_every_entry() {
    let mut doc = document_with_schema(&[("tag", "S", "Tag"), ("owner", "S", "Owner")]);
    let mut portfolio = doc.portfolio();
    for name in ["d", "b", "a", "c"] {
        portfolio.add_entry(name, "", name, b"").unwrap();
    }
    for i in 0..4 {
        portfolio
            .set_entry_field_value(i, 0, Object::text("t"))
            .unwrap();
        portfolio
            .set_entry_field_value(i, 1, Object::text("o"))
            .unwrap();
    }

    portfolio.delete_schema(0).unwrap();

    assert_eq!(portfolio.schema_count(), 1);
    for i in 0..4 {
        let ci = portfolio.entry(i).unwrap().collection_item().unwrap();
        assert!(!ci.contains_key("tag"));
        assert_eq!(ci.get("owner"), Some(Object::text("o")));
    }
    assert_eq!(
        portfolio.entry_field_value(0, 0).unwrap(),
        Some(Object::text("o"))
    );
    assert!(doc
        .trailer()
        .get_path(&["Root", "Collection", "Schema", "tag"])
        .is_none());
    assert!(orders_match_positions(&mut doc));
}

#[test]
fn test_delete_without_entries() {
    let mut doc = standard_document();
    doc.portfolio().delete_schema(0).unwrap();

    assert_eq!(doc.portfolio().schema_count(), 5);
    assert!(orders_match_positions(&mut doc));
    assert!(doc.portfolio().delete_schema(5).is_err());
}

#[test]
fn test_schema_cache_and_invalidation() {
    let mut doc = document_with_schema(&[("x", "S", "X")]);
    assert_eq!(doc.portfolio().schema_count(), 1);

    // Out-of-band edit is not seen until the cache is dropped.
    doc.trailer().put_path(
        &["Root", "Collection", "Schema", "y"],
        portfolio_core::Dict::from_entries([
            ("Subtype", Object::name("N")),
            ("O", Object::Integer(5)),
        ]),
    );
    assert_eq!(doc.portfolio().schema_count(), 1);

    doc.invalidate_portfolio_schema();
    let mut portfolio = doc.portfolio();
    assert_eq!(portfolio.schema_count(), 2);
    assert_eq!(portfolio.schema_field(1).unwrap().kind(), FieldKind::Number);
}
