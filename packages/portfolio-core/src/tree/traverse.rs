//! Depth-first name-tree traversal with pair removal and pruning.
//!
//! A traversal runs in three passes:
//! 1. Collect: read-only walk recording the node shape and every pair in
//!    ascending order. Cycles and odd `Names` arrays are rejected here, before
//!    any pair is visited.
//! 2. Visit: the callback sees each pair once, in ascending order.
//! 3. Apply: removals are grouped per `Names` array and applied once, from
//!    the highest index down, then children left empty are unlinked from
//!    their parent's `Kids`.
//!
//! A subtree referenced from several parents is collected and visited once
//! per reference, but its arrays are only edited once. A pair removed
//! through any reference is removed.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::{KIDS, NAMES};
use crate::error::PortfolioError;
use crate::object::{Array, Dict, Object, ObjectId};

/// Visitor verdict for a leaf pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Remove,
}

/// A key/value pair as seen by a visitor.
#[derive(Debug)]
pub struct Pair<'a> {
    /// Leaf node holding the pair
    pub leaf: &'a Dict,
    /// Pair index within the leaf's `Names` array (slot `2 * index`)
    pub index: usize,
    pub key: &'a Object,
    pub value: &'a Object,
}

struct Collected {
    leaf: Dict,
    names: Array,
    index: usize,
    key: Object,
    value: Object,
    remove: bool,
}

/// Shape of one node as observed by the collect pass.
struct Node {
    /// `None` for entries that are not dictionaries; they count as empty.
    dict: Option<Dict>,
    kids: Option<Array>,
    children: Vec<Node>,
    names: Option<Array>,
}

impl Node {
    fn non_dict() -> Self {
        Self {
            dict: None,
            kids: None,
            children: Vec::new(),
            names: None,
        }
    }
}

/// Walks every leaf pair under `root` in ascending order.
///
/// Pairs for which `visit` returns [`Visit::Remove`] are deleted from their
/// leaf. Nodes left with no children and no pairs are unlinked from their
/// parent; the root itself is never unlinked. The visitor may mutate pair
/// values but must not restructure `Kids` or `Names` arrays.
///
/// # Errors
/// * `RecursiveStructure` if a node is reachable from itself
/// * `MalformedInput` if a `Names` array has odd length
///
/// Both are detected before `visit` is called for any pair.
pub fn traverse<F>(root: &Object, mut visit: F) -> Result<(), PortfolioError>
where
    F: FnMut(&Pair<'_>) -> Visit,
{
    let mut marks = HashSet::new();
    let mut pairs = Vec::new();
    let shape = collect(root, &mut marks, &mut pairs)?;

    for pair in pairs.iter_mut() {
        let verdict = visit(&Pair {
            leaf: &pair.leaf,
            index: pair.index,
            key: &pair.key,
            value: &pair.value,
        });
        pair.remove = verdict == Visit::Remove;
    }

    remove_pairs(&pairs)?;
    prune(&shape, &mut HashSet::new())?;
    Ok(())
}

fn collect(
    node: &Object,
    marks: &mut HashSet<ObjectId>,
    pairs: &mut Vec<Collected>,
) -> Result<Node, PortfolioError> {
    let Some(dict) = node.as_dict() else {
        return Ok(Node::non_dict());
    };

    let id = dict.id();
    if !marks.insert(id) {
        tracing::warn!("Rejecting name tree: node {:?} is its own ancestor", id);
        return Err(PortfolioError::RecursiveStructure);
    }
    let result = collect_dict(dict, marks, pairs);
    marks.remove(&id);
    result
}

fn collect_dict(
    dict: &Dict,
    marks: &mut HashSet<ObjectId>,
    pairs: &mut Vec<Collected>,
) -> Result<Node, PortfolioError> {
    let kids = dict.get_array(KIDS);
    let mut children = Vec::new();
    if let Some(kids) = &kids {
        for child in kids.to_vec() {
            children.push(collect(&child, marks, pairs)?);
        }
    }

    let names = dict.get_array(NAMES);
    if let Some(names) = &names {
        let slots = names.to_vec();
        if slots.len() % 2 != 0 {
            tracing::warn!(
                "Rejecting name tree: leaf {:?} has {} Names slots",
                dict.id(),
                slots.len()
            );
            return Err(PortfolioError::MalformedInput(format!(
                "Names array of length {} is not a sequence of pairs",
                slots.len()
            )));
        }
        for (index, slot) in slots.chunks_exact(2).enumerate() {
            pairs.push(Collected {
                leaf: dict.clone(),
                names: names.clone(),
                index,
                key: slot[0].clone(),
                value: slot[1].clone(),
                remove: false,
            });
        }
    }

    Ok(Node {
        dict: Some(dict.clone()),
        kids,
        children,
        names,
    })
}

/// Deletes every pair marked for removal, once per `Names` array.
fn remove_pairs(pairs: &[Collected]) -> Result<(), PortfolioError> {
    let mut doomed: HashMap<ObjectId, (Array, BTreeSet<usize>)> = HashMap::new();
    for pair in pairs.iter().filter(|p| p.remove) {
        doomed
            .entry(pair.names.id())
            .or_insert_with(|| (pair.names.clone(), BTreeSet::new()))
            .1
            .insert(pair.index);
    }

    for (names, indices) in doomed.values() {
        for index in indices.iter().rev() {
            names.remove(2 * index + 1)?;
            names.remove(2 * index)?;
        }
    }
    Ok(())
}

/// Unlinks emptied children below `node`; returns true if the node is now empty.
///
/// `pruned` holds the `Kids` arrays already edited, so a shared array is
/// only edited through its first reference.
fn prune(node: &Node, pruned: &mut HashSet<ObjectId>) -> Result<bool, PortfolioError> {
    if node.dict.is_none() {
        return Ok(true);
    }

    if let Some(kids) = &node.kids {
        let first = pruned.insert(kids.id());
        for (i, child) in node.children.iter().enumerate().rev() {
            if prune(child, pruned)? && first {
                kids.remove(i)?;
            }
        }
    }

    let kid_count = node.kids.as_ref().map_or(0, Array::len);
    let slot_count = node.names.as_ref().map_or(0, Array::len);
    Ok(kid_count == 0 && slot_count == 0)
}

/// Counts the leaf pairs under `root`.
pub fn count(root: &Object) -> Result<usize, PortfolioError> {
    let mut n = 0;
    traverse(root, |_| {
        n += 1;
        Visit::Keep
    })?;
    Ok(n)
}

/// Returns the pair at ascending `rank`, or `None` if the tree holds fewer pairs.
pub fn nth(root: &Object, rank: usize) -> Result<Option<(Object, Object)>, PortfolioError> {
    let mut seen = 0;
    let mut found = None;
    traverse(root, |pair| {
        if seen == rank {
            found = Some((pair.key.clone(), pair.value.clone()));
        }
        seen += 1;
        Visit::Keep
    })?;
    Ok(found)
}
