//! Contiguous collection types. Currently this is only [`DynArray`], a growable array which owns a
//! zero-filled buffer.

pub(crate) mod buffer;
pub mod dyn_array;

#[doc(inline)]
pub use dyn_array::DynArray;
#[doc(inline)]
pub use crate::util::error::{AllocFailure, CapacityOverflow, GrowError, IndexOutOfBounds, Underflow};
