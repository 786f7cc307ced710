//! Ordering strategies. A tree is handed its ordering when it is constructed and consults it for
//! every comparison it makes, so trees ordered "naturally" and trees ordered by an injected
//! comparator share one implementation.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use meteorite_bst::order::{Comparator, Natural, Order};
//! use meteorite_bst::TreeError;
//!
//! assert_eq!(Natural.compare(&1_i32, &2), Ok(Ordering::Less));
//! assert_eq!(Natural.compare(&f64::NAN, &1.0), Err(TreeError::InvalidComparison));
//!
//! let reversed = Comparator::new(|a: &i32, b: &i32| Ok(b.cmp(a)));
//! assert_eq!(reversed.compare(&1, &2), Ok(Ordering::Greater));
//! ```

use std::cmp;
use std::fmt;

use crate::error::{Result, TreeError};

/// A total order over `T`. Implementations may refuse to order some values, in which case they
/// return the error to hand back to the caller ([`TreeError::InvalidComparison`] for values of
/// the wrong kind, [`TreeError::NullArgument`] for values it treats as absent).
pub trait Order<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering>;
}

/// The intrinsic order of `T`. Values that are not comparable with each other (e.g. `NaN`) are
/// reported as [`TreeError::InvalidComparison`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T> Order<T> for Natural
where
    T: PartialOrd + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering> {
        a.partial_cmp(b).ok_or(TreeError::InvalidComparison)
    }
}

/// An injected ordering. The wrapped function decides for itself whether to accept or reject a
/// value it considers absent.
#[derive(Clone, Copy)]
pub struct Comparator<F>(F);

impl<F> Comparator<F> {
    /// Wraps `compare` as an ordering strategy.
    pub fn new<T>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Result<cmp::Ordering>,
    {
        Self(compare)
    }
}

impl<T, F> Order<T> for Comparator<F>
where
    F: Fn(&T, &T) -> Result<cmp::Ordering>,
{
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering> {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for Comparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator")
    }
}
