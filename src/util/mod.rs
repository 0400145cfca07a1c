#![warn(missing_docs)]

#[cfg(feature = "collections")]
pub mod error;
#[cfg(feature = "binary-tree")]
pub mod fmt;
#[cfg(feature = "collections")]
pub mod result;

#[cfg(test)]
pub mod alloc;
#[cfg(test)]
pub mod panic;
#[cfg(test)]
pub mod testing;
