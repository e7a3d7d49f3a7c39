//! Portfolio entry records.

use crate::object::{Dict, Object, Stream};

/// One pair of the embedded-files index.
///
/// `value` is normally a file specification dictionary; it is shared with
/// the document, so writes through it are writes to the document.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEntry {
    /// Index key
    pub name: Object,
    /// File specification
    pub value: Object,
}

impl PortfolioEntry {
    /// The entry name decoded as text.
    pub fn name_text(&self) -> Option<String> {
        self.name.to_text()
    }

    /// The file specification dictionary, if `value` is one.
    pub fn filespec(&self) -> Option<&Dict> {
        self.value.as_dict()
    }

    /// The embedded file stream at `EF/F`.
    pub fn embedded_file(&self) -> Option<Stream> {
        self.filespec()?
            .get_path(&["EF", "F"])
            .and_then(|f| f.as_stream().cloned())
    }

    /// The collection item dictionary (`CI`) holding user-defined field values.
    pub fn collection_item(&self) -> Option<Dict> {
        self.filespec()?.get_dict("CI")
    }
}
