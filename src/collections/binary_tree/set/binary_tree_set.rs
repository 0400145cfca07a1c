use std::fmt::{self, Debug, Display, Formatter};
use std::mem;

use tracing::debug;

use super::Branch;
use crate::collections::binary_tree::{NaturalOrder, Order, Predicates};
use crate::util::error::AllocFailure;
use crate::util::fmt::DebugRaw;
use crate::util::result::ResultExtension;

type Cleanup<T> = Box<dyn FnMut(T)>;

/// An ordered set, stored as an unbalanced binary search tree.
///
/// Elements are placed by an [`Order`], which defaults to [`NaturalOrder`]. Every element in the
/// left subtree of a node orders before it, and every element in the right subtree orders after
/// it. Elements which tie with one already stored are never linked in.
///
/// No rebalancing takes place, so inserting elements in sorted order produces a tree with a height
/// equal to its length. The three traversals recurse once per level. Every other operation,
/// teardown included, walks the tree in a loop.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the BinaryTreeSet.
/// - `h`: The height of the tree, between `log2(n)` and `n`.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(h)` |
/// | `contains` | `O(h)` |
/// | `remove` | `O(h)` |
/// | `first/last` | `O(h)` |
/// | `height` | `O(n)` |
/// | `inorder/preorder/postorder` | `O(n)` |
pub struct BinaryTreeSet<T, O = NaturalOrder> {
    pub(crate) root: Branch<T>,
    pub(crate) len: usize,
    pub(crate) order: O,
    pub(crate) cleanup: Option<Cleanup<T>>,
}

impl<T: Ord> BinaryTreeSet<T> {
    /// Creates an empty BinaryTreeSet ordered by `T`'s [`Ord`] implementation.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::binary_tree::BinaryTreeSet;
    /// let mut tree = BinaryTreeSet::new();
    /// for i in [5, 3, 8, 1, 4] {
    ///     tree.insert(i);
    /// }
    ///
    /// let mut sorted = Vec::new();
    /// tree.inorder(|i| sorted.push(*i));
    /// assert_eq!(sorted, [1, 3, 4, 5, 8]);
    /// ```
    pub const fn new() -> BinaryTreeSet<T> {
        BinaryTreeSet::with_order(NaturalOrder)
    }
}

impl<T, G, L> BinaryTreeSet<T, Predicates<G, L>>
where
    G: Fn(&T, &T) -> bool,
    L: Fn(&T, &T) -> bool,
{
    /// Creates an empty BinaryTreeSet ordered by a pair of predicates. See [`Predicates`] for how
    /// they are combined.
    pub fn with_predicates(greater: G, less: L) -> BinaryTreeSet<T, Predicates<G, L>> {
        BinaryTreeSet::with_order(Predicates { greater, less })
    }
}

impl<T, O> BinaryTreeSet<T, O> {
    /// Creates an empty BinaryTreeSet ordered by `order`.
    pub const fn with_order(order: O) -> BinaryTreeSet<T, O> {
        BinaryTreeSet {
            root: Branch(None),
            len: 0,
            order,
            cleanup: None,
        }
    }

    /// Sets a closure that receives each element still owned by the tree when it is cleared or
    /// dropped. Elements are handed over in post-order, exactly once each. Without a cleanup
    /// closure, elements are simply dropped.
    ///
    /// Elements returned by [`remove`](BinaryTreeSet::remove) and the `take` methods belong to
    /// the caller and never reach the cleanup closure.
    ///
    /// The tree stores the closure boxed for as long as it lives, so it must be `'static` and
    /// can't borrow from the caller's stack. State the closure needs to share with the caller goes
    /// behind an [`Rc`](std::rc::Rc) instead.
    ///
    /// # Examples
    /// ```
    /// # use std::cell::RefCell;
    /// # use std::rc::Rc;
    /// # use rcontainers::collections::binary_tree::BinaryTreeSet;
    /// let released = Rc::new(RefCell::new(Vec::new()));
    ///
    /// let recorder = Rc::clone(&released);
    /// let mut tree = BinaryTreeSet::new().with_cleanup(move |i: i32| recorder.borrow_mut().push(i));
    /// tree.extend([2, 1, 3]);
    /// drop(tree);
    ///
    /// assert_eq!(*released.borrow(), [1, 3, 2]);
    /// ```
    pub fn with_cleanup<F: FnMut(T) + 'static>(mut self, cleanup: F) -> BinaryTreeSet<T, O> {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Returns the smallest element.
    pub fn first(&self) -> Option<&T> {
        self.root.first()
    }

    /// Returns the largest element.
    pub fn last(&self) -> Option<&T> {
        self.root.last()
    }

    /// Removes and returns the smallest element.
    pub fn take_first(&mut self) -> Option<T> {
        let node = self.root.take_first_node()?;
        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the largest element.
    pub fn take_last(&mut self) -> Option<T> {
        let node = self.root.take_last_node()?;
        self.len -= 1;
        Some(node.value)
    }

    /// Applies `visit` to every element in order: left subtree, node, right subtree. The elements
    /// are visited from smallest to largest.
    pub fn inorder<F: FnMut(&T)>(&self, mut visit: F) {
        self.root.inorder(&mut visit);
    }

    /// Applies `visit` to every element, visiting each node before its left and right subtrees.
    pub fn preorder<F: FnMut(&T)>(&self, mut visit: F) {
        self.root.preorder(&mut visit);
    }

    /// Applies `visit` to every element, visiting each node after its left and right subtrees.
    pub fn postorder<F: FnMut(&T)>(&self, mut visit: F) {
        self.root.postorder(&mut visit);
    }

    /// Removes every element, passing each to the cleanup closure if there is one.
    pub fn clear(&mut self) {
        let root = mem::take(&mut self.root);
        match &mut self.cleanup {
            Some(cleanup) => root.destroy(cleanup),
            None => root.destroy(&mut drop),
        }
        self.len = 0;
    }
}

impl<T, O: Order<T>> BinaryTreeSet<T, O> {
    /// Inserts `value` at the empty branch where it belongs, unless it ties with a node on the way
    /// down. Returns `true` if a node was linked and `false` if `value` tied with an existing element,
    /// in which case it is dropped and the tree is unchanged.
    ///
    /// # Errors
    /// Returns [`AllocFailure`] if the new node can't be allocated. The tree is left unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<bool, AllocFailure> {
        let linked = self.root.try_insert(value, &self.order)?;

        if linked {
            self.len += 1;
        } else {
            debug!(len = self.len, "dropped element that ties with an existing one");
        }
        Ok(linked)
    }

    /// Inserts `value`, returning `false` if it tied with an existing element.
    ///
    /// # Panics
    /// Panics if the new node can't be allocated.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::binary_tree::BinaryTreeSet;
    /// let mut tree = BinaryTreeSet::new();
    /// assert!(tree.insert("a"));
    /// assert!(!tree.insert("a"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.try_insert(value).throw()
    }

    /// Returns the stored element that ties with `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.root.get(value, &self.order)
    }

    /// Returns true if an element tying with `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Removes and returns the stored element that ties with `value`. A node with two children is
    /// replaced by its in-order successor.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let removed = self.root.remove(value, &self.order)?;
        self.len -= 1;
        Some(removed)
    }
}

impl<T, O> Drop for BinaryTreeSet<T, O> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Ord> Default for BinaryTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O: Order<T>> Extend<T> for BinaryTreeSet<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, O: Order<T> + Default> FromIterator<T> for BinaryTreeSet<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = BinaryTreeSet::with_order(O::default());
        tree.extend(iter);
        tree
    }
}

impl<T: Debug, O> Debug for BinaryTreeSet<T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTreeSet")
            .field("nodes", &DebugRaw(format!("\n{:?}\n", self.root)))
            .field("len", &self.len)
            .finish()
    }
}

impl<T: Debug, O> Display for BinaryTreeSet<T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        self.inorder(|value| {
            set.entry(value);
        });
        set.finish()
    }
}
