use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "contiguous")]
use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was at or past the end of a collection.
#[cfg(feature = "contiguous")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The index that was requested.
    pub index: usize,
    /// The length of the collection at the time.
    pub len: usize,
}

#[cfg(feature = "contiguous")]
impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

#[cfg(feature = "contiguous")]
impl Error for IndexOutOfBounds {}

/// The requested capacity would take more than [`isize::MAX`] bytes.
#[cfg(feature = "contiguous")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

#[cfg(feature = "contiguous")]
impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

#[cfg(feature = "contiguous")]
impl Error for CapacityOverflow {}

/// The global allocator couldn't provide a block of `bytes` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailure {
    /// The size of the allocation that failed.
    pub bytes: usize,
}

impl Display for AllocFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to allocate {} bytes!", self.bytes)
    }
}

impl Error for AllocFailure {}

/// An element was requested from a collection with no elements.
#[cfg(feature = "contiguous")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underflow;

#[cfg(feature = "contiguous")]
impl Display for Underflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Attempted to remove an element from an empty collection!")
    }
}

#[cfg(feature = "contiguous")]
impl Error for Underflow {}

/// Any of the reasons that acquiring more capacity can fail.
#[cfg(feature = "contiguous")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum GrowError {
    /// The allocator refused the request.
    AllocFailure(AllocFailure),
    /// The new layout couldn't be computed.
    CapacityOverflow(CapacityOverflow),
}
