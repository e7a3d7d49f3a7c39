//! Ordered insertion into an existing name tree.

use std::cmp::Ordering;

use super::traverse::{traverse, Visit};
use super::{LIMITS, NAMES};
use crate::error::PortfolioError;
use crate::object::{Array, Dict, Object};

/// Inserts `key`/`value` in key order and returns the pair's ascending rank.
///
/// The pair goes immediately before the first existing pair whose key is
/// greater, in that pair's leaf. If no key is greater it is appended to the
/// last leaf; if the tree holds no pairs at all the root becomes the leaf.
/// Internal nodes are never split. The target leaf's `Limits` are widened to
/// cover the new key; ancestors' bounds are left as they are.
///
/// The rank is only valid until the tree is next mutated.
///
/// # Errors
/// Propagates `RecursiveStructure` and `MalformedInput` from the traversal.
pub fn insert(root: &Dict, key: Object, value: Object) -> Result<usize, PortfolioError> {
    let mut rank = 0;
    let mut target: Option<(Dict, usize)> = None;
    let mut last_leaf: Option<Dict> = None;

    traverse(&Object::Dict(root.clone()), |pair| {
        if target.is_none() {
            if pair.key.compare(&key) == Ordering::Greater {
                target = Some((pair.leaf.clone(), pair.index));
            } else {
                rank += 1;
                last_leaf = Some(pair.leaf.clone());
            }
        }
        Visit::Keep
    })?;

    let (leaf, index) = match (target, last_leaf) {
        (Some(found), _) => found,
        (None, Some(leaf)) => {
            let end = leaf.get_array(NAMES).map_or(0, |names| names.len() / 2);
            (leaf, end)
        }
        (None, None) => {
            root.put(NAMES, Array::new());
            root.put(LIMITS, Array::from_vec(vec![Object::Null, Object::Null]));
            (root.clone(), 0)
        }
    };

    let names = leaf.get_array(NAMES).unwrap_or_else(|| {
        let names = Array::new();
        leaf.put(NAMES, names.clone());
        names
    });
    names.insert(2 * index, key.clone())?;
    names.insert(2 * index + 1, value)?;
    let appended = 2 * (index + 1) == names.len();

    update_limits(&leaf, &key, index == 0, appended)?;

    tracing::debug!(
        "Inserted name tree pair at rank {} (leaf {:?}, index {})",
        rank,
        leaf.id(),
        index
    );
    Ok(rank)
}

fn update_limits(
    leaf: &Dict,
    key: &Object,
    at_start: bool,
    at_end: bool,
) -> Result<(), PortfolioError> {
    let limits = match leaf.get_array(LIMITS) {
        Some(limits) => limits,
        None => {
            let limits = Array::new();
            leaf.put(LIMITS, limits.clone());
            limits
        }
    };
    while limits.len() < 2 {
        limits.push(Object::Null);
    }

    let has_min = limits.get(0).is_some_and(|o| o.is_string());
    let has_max = limits.get(1).is_some_and(|o| o.is_string());
    if !has_min || at_start {
        limits.put(0, key.clone())?;
    }
    if !has_max || at_end {
        limits.put(1, key.clone())?;
    }
    Ok(())
}
