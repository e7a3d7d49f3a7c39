//! Stream objects: a dictionary plus byte content.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Dict, ObjectId};

/// Stream object. Content is stored uncompressed.
#[derive(Clone, Default)]
pub struct Stream {
    dict: Dict,
    content: Arc<RwLock<Vec<u8>>>,
}

impl Stream {
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            dict: Dict::new(),
            content: Arc::new(RwLock::new(content)),
        }
    }

    /// The stream's own dictionary. Its identity is the stream's identity.
    pub fn dict(&self) -> &Dict {
        &self.dict
    }

    pub fn id(&self) -> ObjectId {
        self.dict.id()
    }

    pub fn ptr_eq(&self, other: &Stream) -> bool {
        self.dict.ptr_eq(&other.dict)
    }

    pub fn content(&self) -> Vec<u8> {
        self.content.read().clone()
    }

    pub fn set_content(&self, content: Vec<u8>) {
        *self.content.write() = content;
    }

    pub fn len(&self) -> usize {
        self.content.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.read().is_empty()
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("dict", &self.dict)
            .field("len", &self.len())
            .finish()
    }
}
