//! Portfolio error types.

use thiserror::Error;

use crate::schema::FieldKind;

/// Portfolio operation errors.
///
/// A failed mutating call may leave the document graph partially mutated;
/// nothing is rolled back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Positional argument outside valid bounds
    #[error("{what} index {index} out of range (len: {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Persisted structure does not have the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Cyclic container detected while walking a name tree
    #[error("Recursive name tree")]
    RecursiveStructure,

    /// Attempted write to a derived field
    #[error("Field of kind {0} is read-only")]
    ReadOnlyField(FieldKind),

    /// Write path does not know how to store a value
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}
