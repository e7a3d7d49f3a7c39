//! Portfolio operations: schema management and embedded-file entries.
//!
//! Entries live in the `Root/Names/EmbeddedFiles` name tree, keyed by their
//! name; the schema lives in `Root/Collection/Schema`. Entry positions are
//! ascending key ranks and change whenever the tree changes.

mod entry;

pub use entry::PortfolioEntry;

use crate::document::Document;
use crate::error::PortfolioError;
use crate::object::{Dict, Name, Object, PdfString, Stream};
use crate::schema::{FieldDescriptor, FieldKind, SchemaField};
use crate::tree;

const COLLECTION_ITEMS: &str = "CI";
const EMBEDDED_FILE_PATH: [&str; 2] = ["EF", "F"];

/// Portfolio view over a document, obtained from [`Document::portfolio`].
#[derive(Debug)]
pub struct Portfolio<'a> {
    doc: &'a mut Document,
}

impl<'a> Portfolio<'a> {
    pub(crate) fn new(doc: &'a mut Document) -> Self {
        Self { doc }
    }

    /// Number of schema fields.
    pub fn schema_count(&mut self) -> usize {
        self.doc.schema_registry().len()
    }

    /// Returns schema field `index`.
    pub fn schema_field(&mut self, index: usize) -> Result<SchemaField, PortfolioError> {
        self.doc.schema_registry().get(index).cloned()
    }

    /// All schema fields in display order.
    pub fn schema_fields(&mut self) -> Vec<SchemaField> {
        self.doc.schema_registry().fields().cloned().collect()
    }

    /// Moves schema field `index` before the field at `new_pos` (measured
    /// after removal) and renumbers every field.
    pub fn reorder_schema(&mut self, index: usize, new_pos: usize) -> Result<(), PortfolioError> {
        self.doc.schema_registry().reorder(index, new_pos)
    }

    /// Changes the display name of schema field `index`.
    pub fn rename_schema(&mut self, index: usize, name: &str) -> Result<(), PortfolioError> {
        self.doc.schema_registry().rename(index, name)
    }

    /// Deletes schema field `index` and its value from every entry.
    pub fn delete_schema(&mut self, index: usize) -> Result<(), PortfolioError> {
        let container = self.doc.schema_container();
        let entries = self.doc.embedded_files();
        self.doc
            .schema_registry()
            .delete(index, container.as_ref(), entries.as_ref())?;
        Ok(())
    }

    /// Adds a text field before position `position`, creating the schema
    /// container if the document has none.
    ///
    /// # Returns
    /// The generated field key.
    pub fn add_schema(&mut self, position: usize, descriptor: &FieldDescriptor) -> Name {
        let container = self.doc.ensure_schema_container();
        self.doc.schema_registry().add(position, descriptor, &container)
    }

    /// Number of entries in the embedded-files index.
    ///
    /// Like every index read, this prunes empty branches from the tree.
    pub fn entry_count(&mut self) -> Result<usize, PortfolioError> {
        match self.doc.embedded_files() {
            Some(root) => tree::count(&root),
            None => Ok(0),
        }
    }

    /// Returns the entry at ascending rank `index`.
    pub fn entry(&mut self, index: usize) -> Result<PortfolioEntry, PortfolioError> {
        match self.lookup(index)? {
            Some(entry) => Ok(entry),
            None => Err(PortfolioError::IndexOutOfRange {
                what: "portfolio entry",
                index,
                len: self.entry_count()?,
            }),
        }
    }

    /// Returns the name (index key) of entry `index`.
    pub fn entry_name(&mut self, index: usize) -> Result<Object, PortfolioError> {
        Ok(self.entry(index)?.name)
    }

    /// Returns the bytes of the file embedded in entry `index`.
    pub fn entry_content(&mut self, index: usize) -> Result<Vec<u8>, PortfolioError> {
        let entry = self.entry(index)?;
        let stream = entry.embedded_file().ok_or_else(|| {
            PortfolioError::MalformedInput(format!("portfolio entry {} has no EF/F stream", index))
        })?;
        Ok(stream.content())
    }

    /// Reads the value of schema field `field` for entry `index`.
    ///
    /// # Returns
    /// `Ok(None)` if there is no entry at `index` or the entry has no value
    /// for the field.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `field` is not a schema position.
    pub fn entry_field_value(
        &mut self,
        index: usize,
        field: usize,
    ) -> Result<Option<Object>, PortfolioError> {
        let Some(entry) = self.lookup(index)? else {
            return Ok(None);
        };
        let field = self.schema_field(field)?;
        let Some(filespec) = entry.filespec() else {
            return Ok(None);
        };

        let value = match field.kind() {
            FieldKind::Text | FieldKind::Date | FieldKind::Number | FieldKind::Unknown => {
                filespec.get_path(&[COLLECTION_ITEMS, field.key().as_str()])
            }
            FieldKind::Filename => filespec.get("UF").or_else(|| filespec.get("F")),
            FieldKind::Description => filespec.get("Desc"),
            FieldKind::ModificationDate => param_path(filespec, "ModDate"),
            FieldKind::CreationDate => param_path(filespec, "CreationDate"),
            FieldKind::Size => param_path(filespec, "Size"),
        };
        Ok(value)
    }

    /// Writes the value of schema field `field` for entry `index`.
    ///
    /// Filename writes both `UF` and `F`. Missing `CI` and `Params`
    /// dictionaries are created. Fields of unknown kind are read from `CI`
    /// but can not be written.
    ///
    /// # Errors
    /// * `IndexOutOfRange` if there is no such entry or field
    /// * `ReadOnlyField` for `Size` fields
    /// * `UnsupportedOperation` for fields of unknown kind
    /// * `MalformedInput` if the entry is not a dictionary, or a stream
    ///   parameter is written to an entry without an embedded file
    pub fn set_entry_field_value(
        &mut self,
        index: usize,
        field: usize,
        value: Object,
    ) -> Result<(), PortfolioError> {
        let entry = self.entry(index)?;
        let field = self.schema_field(field)?;
        let filespec = entry.filespec().cloned().ok_or_else(|| {
            PortfolioError::MalformedInput(format!("portfolio entry {} is not a dictionary", index))
        })?;

        match field.kind() {
            FieldKind::Text | FieldKind::Date | FieldKind::Number => {
                filespec.put_path(&[COLLECTION_ITEMS, field.key().as_str()], value);
            }
            FieldKind::Filename => {
                filespec.put("UF", value.clone());
                filespec.put("F", value);
            }
            FieldKind::Description => filespec.put("Desc", value),
            FieldKind::ModificationDate => params(&filespec, index)?.put("ModDate", value),
            FieldKind::CreationDate => params(&filespec, index)?.put("CreationDate", value),
            FieldKind::Size => return Err(PortfolioError::ReadOnlyField(FieldKind::Size)),
            FieldKind::Unknown => {
                return Err(PortfolioError::UnsupportedOperation(format!(
                    "cannot write schema field {} of unknown kind",
                    field.key()
                )))
            }
        }
        Ok(())
    }

    /// Embeds `content` as a new entry named `name`.
    ///
    /// Creates the collection and the embedded-files index if needed and
    /// raises the document version to the configured minimum.
    ///
    /// # Returns
    /// The entry's rank at the time of insertion.
    pub fn add_entry(
        &mut self,
        name: &str,
        description: &str,
        filename: &str,
        content: &[u8],
    ) -> Result<usize, PortfolioError> {
        let floor = self.doc.config().min_version;
        self.doc.ensure_version(floor);

        let size = content.len() as i64;
        let stream = Stream::new(content.to_vec());
        stream.dict().put("DL", size);
        stream.dict().put("Length", size);
        stream
            .dict()
            .put("Params", Dict::from_entries([("Size", size)]));

        let filespec = Dict::new();
        filespec.put(COLLECTION_ITEMS, Dict::new());
        filespec.put("EF", Dict::from_entries([("F", stream)]));
        filespec.put("F", PdfString::from_bytes(filename.as_bytes()));
        filespec.put("UF", PdfString::from_text(filename));
        filespec.put("Desc", PdfString::from_text(description));
        filespec.put("Type", Object::name("Filespec"));

        self.doc.ensure_collection();
        let root = self.doc.ensure_embedded_files();
        let rank = tree::insert(&root, Object::text(name), Object::Dict(filespec))?;

        tracing::debug!("Added portfolio entry {:?} ({} bytes) at rank {}", name, size, rank);
        Ok(rank)
    }

    fn lookup(&mut self, index: usize) -> Result<Option<PortfolioEntry>, PortfolioError> {
        let Some(root) = self.doc.embedded_files() else {
            return Ok(None);
        };
        Ok(tree::nth(&root, index)?.map(|(name, value)| PortfolioEntry { name, value }))
    }
}

fn param_path(filespec: &Dict, key: &str) -> Option<Object> {
    filespec.get_path(&["EF", "F", "Params", key])
}

fn params(filespec: &Dict, index: usize) -> Result<Dict, PortfolioError> {
    let stream = filespec
        .get_path(&EMBEDDED_FILE_PATH)
        .and_then(|f| f.as_dict().cloned())
        .ok_or_else(|| {
            PortfolioError::MalformedInput(format!("portfolio entry {} has no EF/F stream", index))
        })?;
    Ok(stream.ensure_dict_path(&["Params"]))
}
