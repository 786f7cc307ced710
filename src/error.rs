//! Errors reported by trees and record indexes.

use thiserror::Error;

/// Everything that can go wrong when operating on an [`OrderedTree`][crate::OrderedTree] or a
/// [`RecordIndex`][crate::RecordIndex]. All of these are contract violations by the caller and
/// are reported before any structural change is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A required value was absent. Raised by orderings that refuse absent values.
    #[error("Required value is absent")]
    NullArgument,

    /// The value cannot be ordered against the values stored in the tree.
    #[error("Value cannot be compared with the elements currently in the tree")]
    InvalidComparison,

    /// The lower endpoint of a range orders after the upper endpoint.
    #[error("The lower endpoint cannot be greater than the upper endpoint")]
    InvalidRange,

    /// A numeric argument is outside of its allowed domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `first`/`last` were asked of a tree with no elements.
    #[error("The tree is empty")]
    EmptyTree,
}

/// Result type alias for tree and index operations.
pub type Result<T> = std::result::Result<T, TreeError>;
