use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeroSizedType;

/// A value that increments a shared counter when dropped. Clones share the counter, so the count
/// ends up as the total number of drops across every clone.
#[derive(Debug, Clone)]
pub struct CountedDrop(Rc<Cell<usize>>);

impl CountedDrop {
    pub fn new() -> CountedDrop {
        CountedDrop(Rc::new(Cell::new(0)))
    }

    pub fn drops(&self) -> usize {
        self.0.get()
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

thread_local! {
    static REFUSE_ALLOCATION: Cell<bool> = const { Cell::new(false) };
}

/// The global allocator for test builds. Defers to [`System`], except on a thread that is inside
/// [`refusing_allocation`], where every request returns null.
pub struct RefusingAllocator;

impl RefusingAllocator {
    fn refusing() -> bool {
        REFUSE_ALLOCATION.try_with(Cell::get).unwrap_or(false)
    }
}

// SAFETY: Every request is either refused with null or forwarded unchanged to System.
unsafe impl GlobalAlloc for RefusingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if Self::refusing() {
            return ptr::null_mut();
        }
        // SAFETY: The caller upholds alloc's contract, which System shares.
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if Self::refusing() {
            return ptr::null_mut();
        }
        // SAFETY: As above.
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if Self::refusing() {
            return ptr::null_mut();
        }
        // SAFETY: ptr was allocated by System, since every allocation made here is forwarded to it.
        unsafe { System.realloc(ptr, layout, new_size) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: As above.
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: RefusingAllocator = RefusingAllocator;

/// Runs `f` with every allocation on the current thread failing. `f` must not panic or log, both
/// of which allocate.
pub fn refusing_allocation<R>(f: impl FnOnce() -> R) -> R {
    REFUSE_ALLOCATION.set(true);
    let result = f();
    REFUSE_ALLOCATION.set(false);
    result
}
