//! A module containing [`DynArray`] and associated types.
//!
//! Borrowed iteration uses [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
//! [`std::slice`], through the DynArray's [`Deref<Target = [T]>`](std::ops::Deref) implementation.
//!
//! [`DynArray`] is also re-exported under the parent module.

mod dyn_array;
mod iter;
mod tests;

pub use dyn_array::*;
