use std::alloc::{self, Layout};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::Deref;
use std::ptr::NonNull;

use crate::collections::binary_tree::Order;
use crate::util::error::AllocFailure;

/// A nullable link to an exclusively owned subtree.
pub(crate) struct Branch<T>(pub Option<Box<Node<T>>>);

pub(crate) struct Node<T> {
    pub left: Branch<T>,
    pub right: Branch<T>,
    pub value: T,
}

impl<T> Node<T> {
    /// Allocates a leaf holding `value`, reporting allocation failure instead of aborting.
    pub fn try_boxed(value: T) -> Result<Box<Node<T>>, AllocFailure> {
        // Never zero-sized, a Node always holds two pointer-sized branches.
        let layout = Layout::new::<Node<T>>();

        // SAFETY: layout has a non-zero size.
        let raw_ptr: *mut Node<T> = unsafe { alloc::alloc(layout).cast() };
        let ptr = NonNull::new(raw_ptr).ok_or(AllocFailure { bytes: layout.size() })?;

        // SAFETY: ptr is a fresh allocation from the global allocator with the layout of Node<T>,
        // which is exactly what Box expects to own.
        unsafe {
            ptr.write(Node {
                left: Branch(None),
                right: Branch(None),
                value,
            });
            Ok(Box::from_raw(ptr.as_ptr()))
        }
    }
}

impl<T> Node<T> {
    /// The subtree on the `side` of this node, left for [`Ordering::Less`] and right otherwise.
    fn child(&self, side: Ordering) -> &Branch<T> {
        match side {
            Ordering::Less => &self.left,
            _ => &self.right,
        }
    }

    fn child_mut(&mut self, side: Ordering) -> &mut Branch<T> {
        match side {
            Ordering::Less => &mut self.left,
            _ => &mut self.right,
        }
    }
}

impl<T> Branch<T> {
    /// Walks down from this branch following `order`. Returns the branch holding the first node
    /// that ties with `value`, or the empty branch where `value` belongs.
    fn seek<O: Order<T>>(&mut self, value: &T, order: &O) -> &mut Branch<T> {
        let mut branch = self;
        loop {
            let side = match &branch.0 {
                Some(node) => order.order(value, &node.value),
                None => return branch,
            };
            if side.is_eq() {
                return branch;
            }

            branch = match branch {
                Branch(Some(node)) => node.child_mut(side),
                Branch(None) => return branch,
            };
        }
    }

    /// Walks from this branch towards `side` for as long as there is a child there. Returns the
    /// branch holding the outermost node.
    fn outermost(&mut self, side: Ordering) -> &mut Branch<T> {
        let mut branch = self;
        loop {
            let deeper = match &branch.0 {
                Some(node) => node.child(side).is_some(),
                None => false,
            };
            if !deeper {
                return branch;
            }

            branch = match branch {
                Branch(Some(node)) => node.child_mut(side),
                Branch(None) => return branch,
            };
        }
    }

    /// Descends to the empty branch where `value` belongs and links it there. Stops at the first
    /// node that ties with `value`, dropping it and returning `false`.
    pub fn try_insert<O: Order<T>>(&mut self, value: T, order: &O) -> Result<bool, AllocFailure> {
        let branch = self.seek(&value, order);
        if branch.is_some() {
            return Ok(false);
        }

        branch.0 = Some(Node::try_boxed(value)?);
        Ok(true)
    }

    pub fn get<O: Order<T>>(&self, value: &T, order: &O) -> Option<&T> {
        let mut node = self.0.as_ref()?;
        loop {
            node = match order.order(value, &node.value) {
                Ordering::Equal => return Some(&node.value),
                side => node.child(side).0.as_ref()?,
            };
        }
    }

    pub fn remove<O: Order<T>>(&mut self, value: &T, order: &O) -> Option<T> {
        self.seek(value, order).take_root()
    }

    /// Unlinks the node at the root of this branch, splicing its subtrees back in its place.
    fn take_root(&mut self) -> Option<T> {
        let node = self.0.take()?;
        let Node { left, mut right, value } = *node;

        self.0 = match (left.0, right.0.is_some()) {
            (None, _) => right.0,
            (left, false) => left,
            (left, true) => {
                // The in-order successor is the first node of the right subtree, it has no left
                // child of its own.
                let mut successor = right.take_first_node()?;
                successor.left = Branch(left);
                successor.right = right;
                Some(successor)
            },
        };

        Some(value)
    }

    /// Unlinks the outermost node towards `side`, replacing it with its other subtree.
    fn take_outermost(&mut self, side: Ordering) -> Option<Box<Node<T>>> {
        let branch = self.outermost(side);
        let inner = mem::take(branch.0.as_mut()?.child_mut(side.reverse()));
        mem::replace(branch, inner).0
    }

    /// Unlinks the smallest node, replacing it with its right subtree.
    pub fn take_first_node(&mut self) -> Option<Box<Node<T>>> {
        self.take_outermost(Ordering::Less)
    }

    /// Unlinks the largest node, replacing it with its left subtree.
    pub fn take_last_node(&mut self) -> Option<Box<Node<T>>> {
        self.take_outermost(Ordering::Greater)
    }

    fn outermost_value(&self, side: Ordering) -> Option<&T> {
        let mut node = self.0.as_ref()?;
        while let Some(next) = &node.child(side).0 {
            node = next;
        }
        Some(&node.value)
    }

    pub fn first(&self) -> Option<&T> {
        self.outermost_value(Ordering::Less)
    }

    pub fn last(&self) -> Option<&T> {
        self.outermost_value(Ordering::Greater)
    }

    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending = Vec::new();
        if let Some(node) = &self.0 {
            pending.push((node, 1));
        }

        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            for child in [&node.left, &node.right] {
                if let Some(child) = &child.0 {
                    pending.push((child, depth + 1));
                }
            }
        }
        height
    }

    pub fn inorder<F: FnMut(&T)>(&self, visit: &mut F) {
        if let Some(node) = &self.0 {
            node.left.inorder(visit);
            visit(&node.value);
            node.right.inorder(visit);
        }
    }

    pub fn preorder<F: FnMut(&T)>(&self, visit: &mut F) {
        if let Some(node) = &self.0 {
            visit(&node.value);
            node.left.preorder(visit);
            node.right.preorder(visit);
        }
    }

    pub fn postorder<F: FnMut(&T)>(&self, visit: &mut F) {
        if let Some(node) = &self.0 {
            node.left.postorder(visit);
            node.right.postorder(visit);
            visit(&node.value);
        }
    }

    /// Consumes the branch in post-order, handing each element to `cleanup`. Pending work is kept on
    /// the heap, so the depth of the tree doesn't matter.
    pub fn destroy<F: FnMut(T)>(self, cleanup: &mut F) {
        let mut pending: Vec<Teardown<T>> = self.0.into_iter().map(Teardown::Unlink).collect();

        while let Some(step) = pending.pop() {
            match step {
                Teardown::Unlink(node) => {
                    let Node { left, right, value } = *node;
                    pending.push(Teardown::Release(value));
                    pending.extend(right.0.map(Teardown::Unlink));
                    pending.extend(left.0.map(Teardown::Unlink));
                },
                Teardown::Release(value) => cleanup(value),
            }
        }
    }
}

/// A pending step of [`Branch::destroy`]. A node is unlinked before either of its subtrees, but
/// its value is only released after both of them.
enum Teardown<T> {
    Unlink(Box<Node<T>>),
    Release(T),
}

impl<T> Default for Branch<T> {
    fn default() -> Self {
        Branch(None)
    }
}

impl<T> Deref for Branch<T> {
    type Target = Option<Box<Node<T>>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn indent<T: Debug>(branch: &Branch<T>, prefix: &str) -> String {
    let mut out = String::new();
    for (i, line) in format!("{branch:?}").lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        out.push_str(line);
    }
    out
}

impl<T: Debug> Debug for Branch<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(node) => write!(
                f,
                "{}\n({:?})\n{}",
                indent(&node.left, "┌    "),
                node.value,
                indent(&node.right, "└    "),
            ),
            None => write!(f, "-"),
        }
    }
}
