//! Owned, generic containers with explicit failure reporting: a growable array and an unbalanced
//! binary search tree.
//!
//! # Purpose
//! These are teaching-grade data structures. They are written carefully enough to be used, but
//! they make no attempt at the optimizations found in [`std`]. Neither of them is synchronized.
//!
//! # Error Handling
//! Every operation that can fail has a `try_*` form which returns a [`Result`] with a strongly
//! typed error, along with a panicking counterpart for callers that don't want to handle it every
//! time (imagine handling an allocation error on every push). A failed operation always leaves the
//! collection as it was.
//!
//! Errors are plain structs (often ZSTs) which implement [`Error`](std::error::Error), combined
//! into enums for static dispatch where an operation can fail in more than one way.
//!
//! | Failure | Type | Reported by |
//! |-|-|-|
//! | Allocation | `AllocFailure` | `try_with_cap`, `try_push`, `try_insert` |
//! | Layout too large | `CapacityOverflow` | `try_with_cap`, `try_push` |
//! | Empty collection | `Underflow` | `try_pop` |
//! | Index past the end | `None` / `IndexOutOfBounds` | `get` / `replace` |
//!
//! # Logging
//! Allocation activity is reported through [`tracing`] at the `trace` and `debug` levels. The
//! crate never installs a subscriber itself.
//!
//! # Features
//! - `contiguous`: [`DynArray`](collections::contiguous::DynArray).
//! - `binary-tree`: [`BinaryTreeSet`](collections::binary_tree::BinaryTreeSet).
//! - `collections-all` (default): both of the above.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
