//! Shared dictionary container.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Array, Name, Object, ObjectId};

/// Insertion-ordered map from names to objects.
///
/// Cloning a `Dict` shares the underlying storage. Lookups are linear;
/// dictionaries in this graph are small.
#[derive(Clone, Default)]
pub struct Dict {
    entries: Arc<RwLock<Vec<(Name, Object)>>>,
}

impl Dict {
    /// Creates a new empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dictionary from key/value pairs; later duplicates replace earlier ones.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Name>,
        V: Into<Object>,
    {
        let dict = Self::new();
        for (key, value) in entries {
            dict.put(key, value);
        }
        dict
    }

    pub fn id(&self) -> ObjectId {
        ObjectId::of(Arc::as_ptr(&self.entries))
    }

    /// Returns true if both handles refer to the same dictionary.
    pub fn ptr_eq(&self, other: &Dict) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().iter().any(|(k, _)| k.as_str() == key)
    }

    pub fn get(&self, key: &str) -> Option<Object> {
        self.entries
            .read()
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.clone())
    }

    /// Inserts or replaces a value. A replaced key keeps its position.
    pub fn put(&self, key: impl Into<Name>, value: impl Into<Object>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn remove(&self, key: &str) -> Option<Object> {
        let mut entries = self.entries.write();
        let position = entries.iter().position(|(k, _)| k.as_str() == key)?;
        Some(entries.remove(position).1)
    }

    pub fn keys(&self) -> Vec<Name> {
        self.entries.read().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Snapshot of all entries in insertion order.
    pub fn entries(&self) -> Vec<(Name, Object)> {
        self.entries.read().clone()
    }

    /// Returns the value at `key` if it is a dictionary (or a stream's dictionary).
    pub fn get_dict(&self, key: &str) -> Option<Dict> {
        self.get(key).and_then(|v| v.as_dict().cloned())
    }

    pub fn get_array(&self, key: &str) -> Option<Array> {
        match self.get(key) {
            Some(Object::Array(a)) => Some(a),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    pub fn get_name(&self, key: &str) -> Option<Name> {
        match self.get(key) {
            Some(Object::Name(n)) => Some(n),
            _ => None,
        }
    }

    /// Follows a chain of keys through nested dictionaries and streams.
    pub fn get_path(&self, path: &[&str]) -> Option<Object> {
        let (last, parents) = path.split_last()?;
        let mut current = self.clone();
        for key in parents {
            current = current.get_dict(key)?;
        }
        current.get(last)
    }

    /// Follows a chain of keys, creating an empty dictionary wherever a
    /// link is missing or is not a dictionary. Returns the final dictionary.
    pub fn ensure_dict_path(&self, path: &[&str]) -> Dict {
        let mut current = self.clone();
        for key in path {
            current = match current.get_dict(key) {
                Some(next) => next,
                None => {
                    let next = Dict::new();
                    current.put(*key, next.clone());
                    next
                }
            };
        }
        current
    }

    /// Stores `value` at the end of `path`, creating intermediate dictionaries.
    pub fn put_path(&self, path: &[&str], value: impl Into<Object>) {
        if let Some((last, parents)) = path.split_last() {
            self.ensure_dict_path(parents).put(*last, value);
        }
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are omitted: the graph may be cyclic.
        f.debug_struct("Dict")
            .field("id", &self.id())
            .field("keys", &self.keys())
            .finish()
    }
}
