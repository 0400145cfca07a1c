use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::util::error::{AllocFailure, CapacityOverflow, GrowError};

/// An owned, zero-filled block of `cap` slots of `T`. The buffer doesn't track which slots are
/// initialized, so it never drops any `T`; that is left to the owning collection. Dropping the
/// buffer only releases the allocation.
pub(crate) struct ZeroedBuf<T> {
    pub ptr: NonNull<MaybeUninit<T>>,
    pub cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> ZeroedBuf<T> {
    /// Creates a buffer with no capacity and no allocation.
    pub const fn dangling() -> ZeroedBuf<T> {
        ZeroedBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a buffer of exactly `cap` slots, with every byte set to zero.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if `cap * size_of::<T>()` exceeds [`isize::MAX`], or
    /// [`AllocFailure`] if the global allocator returns null.
    pub fn try_zeroed(cap: usize) -> Result<ZeroedBuf<T>, GrowError> {
        let layout = Self::make_layout(cap)?;

        // Zero-sized types and zero capacities never touch the allocator.
        if layout.size() == 0 {
            return Ok(ZeroedBuf {
                ptr: NonNull::dangling(),
                cap,
                _phantom: PhantomData,
            });
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr: *mut MaybeUninit<T> = unsafe { alloc::alloc_zeroed(layout).cast() };
        let ptr = NonNull::new(raw_ptr).ok_or_else(|| {
            debug!(bytes = layout.size(), "zeroed allocation failed");
            AllocFailure { bytes: layout.size() }
        })?;

        trace!(cap, bytes = layout.size(), "allocated zeroed buffer");
        Ok(ZeroedBuf {
            ptr,
            cap,
            _phantom: PhantomData,
        })
    }

    /// Grows or shrinks the buffer to exactly `new_cap` slots. Slots gained are zero-filled, slots
    /// lost are discarded without being dropped.
    ///
    /// # Errors
    /// On failure the buffer is left exactly as it was. See [`ZeroedBuf::try_zeroed`].
    pub fn try_realloc(&mut self, new_cap: usize) -> Result<(), GrowError> {
        let new_layout = Self::make_layout(new_cap)?;
        // The current layout was validated when it was created.
        let old_layout = Self::make_layout(self.cap)?;

        let new_ptr = match (old_layout.size(), new_layout.size()) {
            (old, new) if old == new => self.ptr,
            (0, _) => {
                // SAFETY: new_layout has a non-zero size.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::alloc_zeroed(new_layout).cast()
                };
                NonNull::new(raw_ptr).ok_or(AllocFailure { bytes: new_layout.size() })?
            },
            (_, 0) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout, which has a
                // non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout) }
                NonNull::dangling()
            },
            (old, new) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout, and the new
                // size is non-zero and no larger than isize::MAX once rounded up to the alignment,
                // which make_layout has checked.
                let raw_ptr: *mut MaybeUninit<T> = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new).cast()
                };
                // On failure realloc leaves the old block untouched, so self is still valid.
                let ptr = NonNull::new(raw_ptr).ok_or(AllocFailure { bytes: new })?;

                if new > old {
                    // SAFETY: The range old..new is within the new allocation.
                    unsafe { ptr.cast::<u8>().add(old).write_bytes(0, new - old) }
                }
                ptr
            },
        };

        trace!(old_cap = self.cap, new_cap, "reallocated buffer");
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Sets every byte of the slot at `index` to zero.
    ///
    /// # Safety
    /// `index` must be less than `cap` and the slot must not hold a live value that still needs to
    /// be dropped.
    pub unsafe fn zero_slot(&mut self, index: usize) {
        // SAFETY: The caller guarantees that index is in bounds of the allocation.
        unsafe { self.ptr.add(index).write_bytes(0, 1) }
    }

    fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }
}

impl<T> Drop for ZeroedBuf<T> {
    fn drop(&mut self) {
        // A buffer that exists always has a valid layout.
        if let Ok(layout) = Self::make_layout(self.cap) {
            if layout.size() != 0 {
                // SAFETY: ptr is always allocated in the global allocator with this layout when the
                // layout has a non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
            }
        }
    }
}
