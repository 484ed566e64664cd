//! Comparator capability used for every ordering decision in the tree-based collections.

use std::cmp::Ordering;

/// A three-way comparison over values of type `T`.
///
/// The comparator must be a strict weak ordering over the key type for the collections built on
/// it to stay internally consistent.
pub trait Compare<T: ?Sized> {
    /// Compares two values, returning `Less`, `Equal`, or `Greater`.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// The default comparator: the natural ordering given by [`Ord`].
///
/// # Examples
///
/// ```
/// use splay_collections::compare::{Compare, NaturalOrd};
/// use std::cmp::Ordering;
///
/// assert_eq!(NaturalOrd.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrd;

impl<T> Compare<T> for NaturalOrd
where
    T: Ord + ?Sized,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::{Compare, NaturalOrd};
    use std::cmp::Ordering;

    #[test]
    fn test_natural_ord() {
        assert_eq!(NaturalOrd.compare(&1, &1), Ordering::Equal);
        assert_eq!(NaturalOrd.compare(&2, &1), Ordering::Greater);
    }

    #[test]
    fn test_closure_comparator() {
        let reversed = |lhs: &u32, rhs: &u32| rhs.cmp(lhs);
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
    }
}
