//! A module containing [`BinaryTreeSet`] and the node structure behind it.
//!
//! There are no iterator types, elements are reached through the visiting traversals
//! ([`inorder`](BinaryTreeSet::inorder), [`preorder`](BinaryTreeSet::preorder) and
//! [`postorder`](BinaryTreeSet::postorder)).
//!
//! [`BinaryTreeSet`] is also re-exported under the parent module.

mod binary_tree_set;
mod node;

pub use binary_tree_set::*;
pub(crate) use node::*;
