//! Document handle owning the trailer, format version, and portfolio schema cache.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PortfolioConfig;
use crate::object::{Dict, Object};
use crate::portfolio::Portfolio;
use crate::schema::SchemaRegistry;

const SCHEMA_PATH: [&str; 3] = ["Root", "Collection", "Schema"];
const COLLECTION_PATH: [&str; 2] = ["Root", "Collection"];
const EMBEDDED_FILES_PATH: [&str; 3] = ["Root", "Names", "EmbeddedFiles"];

/// Declared document format version (`major.minor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// An open document.
///
/// All portfolio state lives in the object graph reachable from the trailer.
/// The schema registry is an auxiliary index over that graph, built on first
/// use and kept until the document is dropped or [`invalidate_portfolio_schema`]
/// is called.
///
/// Mutating calls take `&mut self`; share a document across threads only
/// behind a lock.
///
/// Containers are reference-counted handles, so an object graph with a
/// cycle is not freed when the document is dropped. Unlink the back
/// reference (for example with [`Array::remove`]) before dropping.
///
/// [`invalidate_portfolio_schema`]: Document::invalidate_portfolio_schema
/// [`Array::remove`]: crate::object::Array::remove
#[derive(Debug)]
pub struct Document {
    trailer: Dict,
    version: Version,
    config: PortfolioConfig,
    schema: Option<SchemaRegistry>,
}

impl Document {
    /// Creates an empty document with a catalog and the default configuration.
    pub fn new() -> Self {
        Self::with_config(PortfolioConfig::default())
    }

    /// Creates an empty document with a catalog.
    pub fn with_config(config: PortfolioConfig) -> Self {
        let trailer = Dict::new();
        trailer.put("Root", Dict::from_entries([("Type", Object::name("Catalog"))]));
        let version = config.initial_version;
        Self::from_trailer(trailer, version, config)
    }

    /// Wraps an existing object graph.
    ///
    /// # Arguments
    /// * `trailer` - Trailer dictionary; the catalog is expected under `Root`
    /// * `version` - Declared format version
    /// * `config` - Portfolio configuration
    pub fn from_trailer(trailer: Dict, version: Version, config: PortfolioConfig) -> Self {
        Self {
            trailer,
            version,
            config,
            schema: None,
        }
    }

    pub fn trailer(&self) -> &Dict {
        &self.trailer
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// Raises the declared version to at least `floor`. Never lowers it.
    ///
    /// # Returns
    /// `true` if the version was raised.
    pub fn ensure_version(&mut self, floor: Version) -> bool {
        if self.version >= floor {
            return false;
        }
        tracing::debug!("Raising document version from {} to {}", self.version, floor);
        self.version = floor;
        true
    }

    /// Portfolio operations on this document.
    pub fn portfolio(&mut self) -> Portfolio<'_> {
        Portfolio::new(self)
    }

    /// Drops the cached schema registry so the next portfolio call rebuilds it
    /// from the schema container. Call after editing the container directly.
    pub fn invalidate_portfolio_schema(&mut self) {
        if self.schema.take().is_some() {
            tracing::debug!("Portfolio schema cache invalidated");
        }
    }

    /// Returns the cached schema registry, building it on first access.
    pub(crate) fn schema_registry(&mut self) -> &mut SchemaRegistry {
        if self.schema.is_none() {
            let container = self.schema_container();
            self.schema = Some(SchemaRegistry::load(container.as_ref(), &self.config));
        }
        self.schema.get_or_insert_with(SchemaRegistry::default)
    }

    pub(crate) fn schema_container(&self) -> Option<Dict> {
        self.trailer
            .get_path(&SCHEMA_PATH)
            .and_then(|o| o.as_dict().cloned())
    }

    pub(crate) fn ensure_schema_container(&self) -> Dict {
        self.trailer.ensure_dict_path(&SCHEMA_PATH)
    }

    pub(crate) fn ensure_collection(&self) -> Dict {
        self.trailer.ensure_dict_path(&COLLECTION_PATH)
    }

    /// Root of the embedded-files name tree, if present.
    pub(crate) fn embedded_files(&self) -> Option<Object> {
        self.trailer.get_path(&EMBEDDED_FILES_PATH)
    }

    pub(crate) fn ensure_embedded_files(&self) -> Dict {
        self.trailer.ensure_dict_path(&EMBEDDED_FILES_PATH)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
