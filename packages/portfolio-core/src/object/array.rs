//! Shared array container.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Object, ObjectId};
use crate::error::PortfolioError;

/// Ordered sequence of objects. Cloning an `Array` shares the underlying storage.
#[derive(Clone, Default)]
pub struct Array {
    items: Arc<RwLock<Vec<Object>>>,
}

impl Array {
    /// Creates a new empty array.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Object>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub fn id(&self) -> ObjectId {
        ObjectId::of(Arc::as_ptr(&self.items))
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Object> {
        self.items.read().get(index).cloned()
    }

    pub fn push(&self, value: impl Into<Object>) {
        self.items.write().push(value.into());
    }

    /// Inserts `value` before position `index`; `index == len` appends.
    pub fn insert(&self, index: usize, value: impl Into<Object>) -> Result<(), PortfolioError> {
        let mut items = self.items.write();
        if index > items.len() {
            return Err(PortfolioError::IndexOutOfRange {
                what: "array insert",
                index,
                len: items.len(),
            });
        }
        items.insert(index, value.into());
        Ok(())
    }

    /// Replaces the value at `index`; `index == len` appends.
    pub fn put(&self, index: usize, value: impl Into<Object>) -> Result<(), PortfolioError> {
        let mut items = self.items.write();
        let len = items.len();
        match index.cmp(&len) {
            std::cmp::Ordering::Less => items[index] = value.into(),
            std::cmp::Ordering::Equal => items.push(value.into()),
            std::cmp::Ordering::Greater => {
                return Err(PortfolioError::IndexOutOfRange {
                    what: "array put",
                    index,
                    len,
                })
            }
        }
        Ok(())
    }

    pub fn remove(&self, index: usize) -> Result<Object, PortfolioError> {
        let mut items = self.items.write();
        if index >= items.len() {
            return Err(PortfolioError::IndexOutOfRange {
                what: "array remove",
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    /// Snapshot of the current items.
    pub fn to_vec(&self) -> Vec<Object> {
        self.items.read().clone()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("id", &self.id())
            .field("len", &self.len())
            .finish()
    }
}
