//! Binary tree collection types. Primarily revolves around [`BinaryTreeSet`] and the [`Order`] it is
//! built on.

pub mod order;
pub mod set;

#[doc(inline)]
pub use order::{NaturalOrder, Order, Predicates};
#[doc(inline)]
pub use set::BinaryTreeSet;
#[doc(inline)]
pub use crate::util::error::AllocFailure;
