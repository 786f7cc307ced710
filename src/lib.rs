//! This crate exposes an unbalanced Binary Search Tree that can be ordered by any strategy, and a
//! meteorite catalogue that indexes the same records by identity, mass, and year using three of
//! those trees.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree keeps its values in `Node`s, each holding one value and up to two child
//! `Node`s. Which values count as "less" and "greater" is up to the ordering strategy the tree is
//! built with (see [`order`]), and everything the tree does rests on two invariants stated in
//! terms of that ordering:
//!
//! 1. Every value in a `Node`'s left subtree orders before the `Node`'s own value.
//! 2. Every value in a `Node`'s right subtree orders after it.
//!
//! No two stored values may order equal, so adding a value the ordering can't tell apart from
//! one already stored leaves the tree as it is. An ordering may also refuse a value outright, in
//! which case the operation fails before touching the tree.
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). [`OrderedTree`] does nothing to keep its height
//! down, so the order values arrive in decides its shape. It also supports sorted iteration by
//! visiting the left subtree, then the subtree root, then the right subtree, and range queries
//! that only visit the subtrees overlapping the range.
//!
//! Sorted input degrades the tree into a list. Every walk over the tree is a loop or uses an
//! explicit stack, so such a tree is slow but never exhausts the call stack.
//!
//! ## Meteorite catalogue
//!
//! [`RecordIndex`] keeps [`Meteorite`]s in three trees at once so that "everything weighing
//! about this much" and "everything that landed in this year" only visit the matching records.
//!
//! ```
//! use meteorite_bst::{Location, Meteorite, RecordIndex};
//!
//! let mut index = RecordIndex::new();
//! index
//!     .add(
//!         Meteorite::new("Aachen", 1)?
//!             .with_mass(21)?
//!             .with_year(1880)?
//!             .with_location(Location::new(50.775, 6.08333)?),
//!     )?;
//! index.add(Meteorite::new("Abee", 6)?.with_mass(107_000)?.with_year(1952)?)?;
//!
//! assert_eq!(index.by_year_range(1880)?.len(), 1);
//!
//! let paris = Location::new(48.8566, 2.3522)?;
//! assert_eq!(index.nearest_by_location(&paris).unwrap().name(), "Aachen");
//! # Ok::<(), meteorite_bst::TreeError>(())
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod index;
pub mod meteorite;
pub mod order;
pub mod tree;

pub use error::{Result, TreeError};
pub use index::{Record, RecordIndex, RecordOrder};
pub use meteorite::{Location, Meteorite, MASS_ABSENT, YEAR_ABSENT};
pub use tree::OrderedTree;
