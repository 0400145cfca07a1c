//! General-purpose collection types.
//!
//! # Purpose
//! Both collections here own everything reachable from them: [`DynArray`](contiguous::DynArray)
//! owns one contiguous buffer and [`BinaryTreeSet`](binary_tree::BinaryTreeSet) owns a graph of
//! boxed nodes. Neither is synchronized, wrap them in a lock to share them between threads.
//!
//! # Method
//! [`DynArray`](contiguous::DynArray) implements [`Deref<Target = [T]>`](std::ops::Deref) (and
//! DerefMut), which saves writing a lot of the read-only functionality.

#[cfg(feature = "binary-tree")]
pub mod binary_tree;
#[cfg(feature = "contiguous")]
pub mod contiguous;
