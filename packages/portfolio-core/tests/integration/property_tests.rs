//! Randomized operation sequences checking schema and index invariants.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use portfolio_core::{Document, FieldDescriptor, Object};

fn keys(doc: &mut Document) -> Vec<String> {
    doc.portfolio()
        .schema_fields()
        .iter()
        .map(|f| f.key().as_str().to_string())
        .collect()
}

fn assert_orders_match_positions(doc: &mut Document) {
    for (i, field) in doc.portfolio().schema_fields().iter().enumerate() {
        assert_eq!(field.order(), i as i64);
        assert_eq!(field.value().get_int("O"), Some(i as i64));
    }
}

#[test]
fn test_random_schema_operations_keep_orders_dense() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut doc = Document::new();
    doc.portfolio().add_entry("only", "", "only", b"").unwrap();

    for step in 0..300 {
        let len = doc.portfolio().schema_count();
        match rng.gen_range(0..3) {
            0 => {
                let position = rng.gen_range(0..=len + 1);
                let key = doc
                    .portfolio()
                    .add_schema(position, &FieldDescriptor::new(format!("f{step}")));
                let index = doc_position(&mut doc, key.as_str());
                doc.portfolio()
                    .set_entry_field_value(0, index, Object::Integer(step))
                    .unwrap();
            }
            1 if len > 0 => {
                let index = rng.gen_range(0..len);
                let key = keys(&mut doc)[index].clone();
                doc.portfolio().delete_schema(index).unwrap();
                let ci = doc.portfolio().entry(0).unwrap().collection_item().unwrap();
                assert!(!ci.contains_key(&key));
            }
            2 if len > 0 => {
                let index = rng.gen_range(0..len);
                let new_pos = rng.gen_range(0..len);
                let mut before = keys(&mut doc);
                doc.portfolio().reorder_schema(index, new_pos).unwrap();
                let mut after = keys(&mut doc);
                assert_eq!(after[new_pos], before[index]);
                before.sort();
                after.sort();
                assert_eq!(before, after);
            }
            _ => {}
        }
        assert_orders_match_positions(&mut doc);
    }
}

fn doc_position(doc: &mut Document, key: &str) -> usize {
    keys(doc)
        .iter()
        .position(|k| k == key)
        .expect("added key is registered")
}

#[test]
fn test_random_insertions_stay_sorted_and_addressable() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut names: Vec<String> = (0..60).map(|i| format!("file-{i:03}")).collect();
    names.shuffle(&mut rng);

    let mut doc = Document::new();
    for name in &names {
        let rank = doc
            .portfolio()
            .add_entry(name, "", name, name.as_bytes())
            .unwrap();
        let entry = doc.portfolio().entry(rank).unwrap();
        assert_eq!(entry.name_text().as_deref(), Some(name.as_str()));
    }

    let mut portfolio = doc.portfolio();
    assert_eq!(portfolio.entry_count().unwrap(), names.len());
    names.sort();
    for (rank, name) in names.iter().enumerate() {
        assert_eq!(portfolio.entry_name(rank).unwrap(), Object::text(name));
        assert_eq!(portfolio.entry_content(rank).unwrap(), name.as_bytes());
    }
}
