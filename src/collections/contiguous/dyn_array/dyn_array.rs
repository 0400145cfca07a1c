use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::slice;

use tracing::trace;

use crate::collections::contiguous::buffer::ZeroedBuf;
use crate::util::error::{CapacityOverflow, GrowError, IndexOutOfBounds, Underflow};
use crate::util::result::ResultExtension;

const GROWTH_FACTOR: usize = 2;
/// The capacity given to an empty, unallocated DynArray on its first push.
const FIRST_CAP: usize = 1;

/// A growable contiguous collection which owns its elements. The backing storage is zero-filled
/// when allocated, and each slot is zero-filled again when its element is popped.
///
/// Capacity is only ever changed by growth: when a push finds `len == cap`, the capacity doubles.
/// A DynArray never shrinks.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DynArray.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `cap` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `replace` | `O(1)` |
/// | `visit` | `O(n)` |
/// | `clear` | `O(n)` |
///
/// \* If the DynArray doesn't have enough capacity for the new element, `push` will take `O(n)`.
pub struct DynArray<T> {
    pub(crate) buf: ZeroedBuf<T>,
    pub(crate) len: usize,
}

impl<T> DynArray<T> {
    /// Creates a new DynArray with length and capacity 0. Memory will be allocated on the first
    /// push.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::contiguous::DynArray;
    /// let arr: DynArray<u8> = DynArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.cap(), 0);
    /// ```
    pub const fn new() -> DynArray<T> {
        DynArray {
            buf: ZeroedBuf::dangling(),
            len: 0,
        }
    }

    /// Creates a new DynArray with capacity exactly equal to `cap`. All of the backing storage is
    /// zero-filled.
    ///
    /// # Errors
    /// Returns a [`GrowError`] if the layout would exceed [`isize::MAX`] bytes or the allocation
    /// fails.
    pub fn try_with_cap(cap: usize) -> Result<DynArray<T>, GrowError> {
        Ok(DynArray {
            buf: ZeroedBuf::try_zeroed(cap)?,
            len: 0,
        })
    }

    /// Creates a new DynArray with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if [`DynArray::try_with_cap`] would return an error.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::contiguous::DynArray;
    /// let mut arr: DynArray<i32> = DynArray::with_cap(2);
    /// assert_eq!(arr.cap(), 2);
    /// arr.extend([10, 20, 30]);
    /// assert_eq!(arr.cap(), 4);
    /// ```
    pub fn with_cap(cap: usize) -> DynArray<T> {
        Self::try_with_cap(cap).throw()
    }

    /// Returns the number of elements in the DynArray.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the DynArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently allocated.
    pub const fn cap(&self) -> usize {
        self.buf.cap
    }

    /// Returns the width in bytes of every element slot.
    pub const fn element_width(&self) -> usize {
        size_of::<T>()
    }

    /// Returns a reference to the element at `index`, or [`None`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::contiguous::DynArray;
    /// let arr: DynArray<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(arr.get(2), Some(&3));
    /// assert_eq!(arr.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: index < len, so the slot is initialized.
        Some(unsafe { self.buf.ptr.add(index).as_ref().assume_init_ref() })
    }

    /// Returns a mutable reference to the element at `index`, or [`None`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: index < len, so the slot is initialized. The returned reference borrows self
        // mutably.
        Some(unsafe { self.buf.ptr.add(index).as_mut().assume_init_mut() })
    }

    /// Pushes `value` onto the end of the DynArray, doubling the capacity first if it is full.
    ///
    /// # Errors
    /// If more capacity is needed and can't be allocated, the DynArray is left unchanged and
    /// `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), GrowError> {
        if self.len == self.cap() {
            self.try_grow()?;
        }

        // SAFETY: There is at least one free slot after len.
        unsafe { self.buf.ptr.add(self.len).write(mem::MaybeUninit::new(value)) }
        self.len += 1;
        Ok(())
    }

    /// Pushes `value` onto the end of the DynArray, doubling the capacity first if it is full.
    ///
    /// # Panics
    /// Panics if [`DynArray::try_push`] would return an error.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::contiguous::DynArray;
    /// let mut arr = DynArray::with_cap(1);
    /// for i in 0..5 {
    ///     arr.push(i);
    /// }
    /// assert_eq!(&*arr, &[0, 1, 2, 3, 4]);
    /// assert_eq!(arr.cap(), 8);
    /// ```
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    /// Removes the last element and returns it, zero-filling the slot it occupied.
    ///
    /// # Errors
    /// Returns [`Underflow`] if the DynArray is empty.
    pub fn try_pop(&mut self) -> Result<T, Underflow> {
        if self.len == 0 {
            return Err(Underflow);
        }

        self.len -= 1;
        // SAFETY: The slot at the old last index is initialized. After the read, the value is owned
        // here and the slot is treated as uninitialized, so zeroing it can't skip a drop.
        let value = unsafe {
            let value = self.buf.ptr.add(self.len).read().assume_init();
            self.buf.zero_slot(self.len);
            value
        };
        Ok(value)
    }

    /// Removes the last element and returns it, or [`None`] if the DynArray is empty.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::contiguous::DynArray;
    /// let mut arr: DynArray<_> = (0..3).collect();
    /// assert_eq!(arr.pop(), Some(2));
    /// assert_eq!(arr.get(2), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        self.try_pop().ok()
    }

    /// Replaces the element at `index` with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.check_index(index).throw();

        // SAFETY: index < len was just checked.
        unsafe { mem::replace(self.buf.ptr.add(index).as_mut().assume_init_mut(), new_value) }
    }

    /// Drops every element, zero-filling their slots. The capacity is unchanged.
    pub fn clear(&mut self) {
        while self.try_pop().is_ok() {}
    }

    /// Applies `visit` to every element in index order.
    ///
    /// # Examples
    /// ```
    /// # use rcontainers::collections::contiguous::DynArray;
    /// let arr: DynArray<u8> = (1..=3).collect();
    /// let mut sum = 0;
    /// arr.visit(|i| sum += i);
    /// assert_eq!(sum, 6);
    /// ```
    pub fn visit<F: FnMut(&T)>(&self, visit: F) {
        self.iter().for_each(visit);
    }

    /// Doubles the capacity, or allocates the first slot for an empty DynArray.
    pub(crate) fn try_grow(&mut self) -> Result<(), GrowError> {
        let old_cap = self.cap();
        let new_cap = match old_cap {
            0 => FIRST_CAP,
            _ => old_cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?,
        };

        trace!(old_cap, new_cap, len = self.len, "growing DynArray");
        self.buf.try_realloc(new_cap)
    }

    /// Checks that the provided index is within the bounds of self.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        for i in 0..self.len {
            // SAFETY: All values less than len are initialized and safe to drop.
            unsafe { self.buf.ptr.add(i).as_mut().assume_init_drop() }
        }

        // Implicitly drop self.buf, which releases the allocation.
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized, the pointer is nonnull and properly aligned,
        // and the total size is < isize::MAX because the buffer has a valid layout.
        unsafe { slice::from_raw_parts(self.buf.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, and the slice borrows self mutably.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for DynArray<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for DynArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut arr = DynArray::with_cap(iter.size_hint().0);
        arr.extend(iter);
        arr
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let mut arr = Self::with_cap(self.cap());

        for value in self.iter() {
            arr.push(value.clone());
        }

        arr
    }
}

// SAFETY: A DynArray uniquely owns its buffer, so sending it sends the elements.
unsafe impl<T: Send> Send for DynArray<T> {}
// SAFETY: The safe API only mutates through &mut self, so there is no interior mutability.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for DynArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for DynArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
