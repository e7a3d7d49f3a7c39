//! Ordered registry of portfolio schema fields.

use super::field::{FieldDescriptor, FieldKind, SchemaField};
use crate::config::PortfolioConfig;
use crate::error::PortfolioError;
use crate::object::{Dict, Name, Object, PdfString};
use crate::tree::{self, Visit};

/// Schema fields in display order.
///
/// Every mutating call renumbers the fields so that the persisted `O` of the
/// field at position `i` is `i`.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    fields: Vec<SchemaField>,
}

impl SchemaRegistry {
    /// Builds the registry from a schema container.
    ///
    /// Fields are sorted by their `O` value; fields with equal `O` keep the
    /// container's order. Entries whose value is not a dictionary are skipped.
    ///
    /// # Arguments
    /// * `container` - The `Collection/Schema` dictionary, if the document has one
    /// * `config` - Supplies defaults for missing `E`/`V` flags
    pub fn load(container: Option<&Dict>, config: &PortfolioConfig) -> Self {
        let mut fields = Vec::new();
        if let Some(container) = container {
            for (key, value) in container.entries() {
                match value.as_dict() {
                    Some(dict) => {
                        fields.push(SchemaField::from_descriptor(key, dict.clone(), config))
                    }
                    None => tracing::warn!("Skipping schema field {}: not a dictionary", key),
                }
            }
        }
        fields.sort_by_key(|f| f.order);

        tracing::debug!("Loaded portfolio schema with {} fields", fields.len());
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at `index`.
    pub fn get(&self, index: usize) -> Result<&SchemaField, PortfolioError> {
        self.fields.get(index).ok_or(PortfolioError::IndexOutOfRange {
            what: "schema field",
            index,
            len: self.fields.len(),
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter()
    }

    /// Position of the field with the given key.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key.as_str() == key)
    }

    /// Moves field `index` so that it sits before the field found at
    /// `new_pos` once `index` has been taken out. Positions past the end append.
    pub fn reorder(&mut self, index: usize, new_pos: usize) -> Result<(), PortfolioError> {
        self.get(index)?;
        let field = self.fields.remove(index);
        let at = new_pos.min(self.fields.len());
        self.fields.insert(at, field);
        self.renumber();

        tracing::debug!("Moved schema field from {} to {}", index, at);
        Ok(())
    }

    /// Replaces the display name of field `index` and persists it as `N`.
    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), PortfolioError> {
        self.get(index)?;
        let field = &mut self.fields[index];
        let display_name = Object::String(PdfString::from_text(name));
        field.value.put("N", display_name.clone());
        field.display_name = Some(display_name);
        Ok(())
    }

    /// Removes field `index` from the registry and the schema container, then
    /// strips its key from the `CI` of every entry in the index.
    ///
    /// # Arguments
    /// * `index` - Position of the field to delete
    /// * `container` - The schema container
    /// * `entries` - Root of the embedded-files name tree
    ///
    /// # Returns
    /// The detached field. If the sweep fails the field is already gone from
    /// the registry and the container.
    pub fn delete(
        &mut self,
        index: usize,
        container: Option<&Dict>,
        entries: Option<&Object>,
    ) -> Result<SchemaField, PortfolioError> {
        self.get(index)?;
        let field = self.fields.remove(index);
        if let Some(container) = container {
            container.remove(field.key.as_str());
        }
        self.renumber();

        if let Some(root) = entries {
            let key = field.key.as_str();
            let mut scrubbed = 0usize;
            tree::traverse(root, |pair| {
                let collection = pair.value.as_dict().and_then(|entry| entry.get_dict("CI"));
                if collection.is_some_and(|ci| ci.remove(key).is_some()) {
                    scrubbed += 1;
                }
                Visit::Keep
            })?;
            tracing::debug!(
                "Deleted schema field {}; removed its value from {} entries",
                field.key,
                scrubbed
            );
        }
        Ok(field)
    }

    /// Adds a text field before position `position` (past the end appends).
    ///
    /// The key is the smallest positive integer, as a name, not already used
    /// by a field or present in `container`.
    ///
    /// # Returns
    /// The new field's key.
    pub fn add(&mut self, position: usize, descriptor: &FieldDescriptor, container: &Dict) -> Name {
        let key = self.unused_key(container);
        let display_name = Object::String(PdfString::from_text(&descriptor.name));

        let value = Dict::new();
        value.put("E", descriptor.editable);
        value.put("V", descriptor.visible);
        value.put("N", display_name.clone());
        value.put("Subtype", Object::name("S"));

        let field = SchemaField {
            key: key.clone(),
            value: value.clone(),
            order: 0,
            kind: FieldKind::Text,
            editable: descriptor.editable,
            visible: descriptor.visible,
            display_name: Some(display_name),
        };
        let at = position.min(self.fields.len());
        self.fields.insert(at, field);
        container.put(key.clone(), value);
        self.renumber();

        tracing::debug!("Added schema field {} at position {}", key, at);
        key
    }

    fn unused_key(&self, container: &Dict) -> Name {
        let mut n: u64 = 1;
        loop {
            let candidate = n.to_string();
            if self.position_of(&candidate).is_none() && !container.contains_key(&candidate) {
                return Name::new(candidate);
            }
            n += 1;
        }
    }

    fn renumber(&mut self) {
        for (position, field) in self.fields.iter_mut().enumerate() {
            field.order = position as i64;
            field.value.put("O", position as i64);
        }
    }
}
