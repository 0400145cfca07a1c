use std::cmp::Ordering;

/// A strict total order over `T`, used to place elements in a
/// [`BinaryTreeSet`](super::BinaryTreeSet).
///
/// Two elements that compare as [`Ordering::Equal`] are treated as the same element, so only the
/// first of them is ever stored.
pub trait Order<T: ?Sized> {
    fn order(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Order<T> for NaturalOrder {
    fn order(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Order<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn order(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// An order built from a pair of predicates. `less` is consulted first, then `greater`. If neither
/// holds, the elements are a tie.
///
/// # Examples
/// ```
/// # use std::cmp::Ordering;
/// # use rcontainers::collections::binary_tree::{Order, Predicates};
/// let by_len = Predicates {
///     greater: |a: &&str, b: &&str| a.len() > b.len(),
///     less: |a: &&str, b: &&str| a.len() < b.len(),
/// };
/// assert_eq!(by_len.order(&"ab", &"abc"), Ordering::Less);
/// assert_eq!(by_len.order(&"ab", &"cd"), Ordering::Equal);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Predicates<G, L> {
    pub greater: G,
    pub less: L,
}

impl<T: ?Sized, G, L> Order<T> for Predicates<G, L>
where
    G: Fn(&T, &T) -> bool,
    L: Fn(&T, &T) -> bool,
{
    fn order(&self, a: &T, b: &T) -> Ordering {
        if (self.less)(a, b) {
            Ordering::Less
        } else if (self.greater)(a, b) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
