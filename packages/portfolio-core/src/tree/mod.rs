//! Name-tree index: cycle-safe traversal, ordered insertion, and positional lookup.
//!
//! A name tree node is a dictionary with optional `Kids` (child nodes),
//! `Names` (flat `[key, value, key, value, ...]` pairs) and `Limits`
//! (`[min, max]` bounds of the keys below it). Across a depth-first walk the
//! keys of all leaves are in ascending order.

mod insert;
mod traverse;

pub use insert::insert;
pub use traverse::{count, nth, traverse, Pair, Visit};

pub(crate) const KIDS: &str = "Kids";
pub(crate) const NAMES: &str = "Names";
pub(crate) const LIMITS: &str = "Limits";
