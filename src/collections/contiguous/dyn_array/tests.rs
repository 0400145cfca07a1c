#![cfg(test)]

use std::hash::{BuildHasher, RandomState};
use std::iter;
use std::slice;

use rstest::rstest;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::error::{CapacityOverflow, GrowError, IndexOutOfBounds, Underflow};
use crate::util::panic::assert_panics;
use crate::util::testing::init_test_setup;

fn slot_bytes<T>(arr: &DynArray<T>) -> &[u8] {
    // SAFETY: Every byte of the buffer is either zeroed or part of a written value, and the range
    // covers exactly the allocation.
    unsafe {
        slice::from_raw_parts(arr.buf.ptr.as_ptr().cast::<u8>(), arr.cap() * size_of::<T>())
    }
}

#[test]
fn test_push_and_pop_scenario() {
    init_test_setup();

    let mut arr = DynArray::<i32>::with_cap(2);
    assert_eq!(arr.element_width(), 4);

    arr.push(10);
    arr.push(20);
    assert_eq!(arr.cap(), 2, "Capacity shouldn't change until it is exceeded.");

    arr.push(30);
    assert_eq!(arr.cap(), 4, "The third push should double the capacity.");

    arr.push(40);
    assert_eq!(arr.cap(), 4, "The fourth push fits in the doubled capacity.");
    assert_eq!(arr.len(), 4);

    assert_eq!(arr.pop(), Some(40));
    assert_eq!(arr.get(3), None, "A popped slot should no longer be reachable.");
    assert_eq!(arr.get(2), Some(&30));
    assert_eq!(arr.cap(), 4, "Popping should never shrink the DynArray.");
}

#[rstest]
#[case(1, 0, 1)]
#[case(1, 1, 1)]
#[case(1, 5, 8)]
#[case(2, 3, 4)]
#[case(2, 4, 4)]
#[case(3, 4, 6)]
#[case(3, 13, 24)]
#[case(5, 100, 160)]
#[case(0, 1, 1)]
#[case(0, 3, 4)]
fn test_growth_policy(#[case] initial: usize, #[case] pushes: usize, #[case] expected: usize) {
    let mut arr = DynArray::with_cap(initial);
    for i in 0..pushes {
        arr.push(i);
    }

    assert_eq!(arr.len(), pushes);
    assert_eq!(
        arr.cap(),
        expected,
        "Capacity should be the smallest doubling of the initial capacity that fits every push."
    );
}

#[test]
fn test_growth_keeps_elements() {
    let mut arr = DynArray::with_cap(1);
    for i in 0_u64..1000 {
        arr.push(i * 3);
        assert_eq!(
            arr.get(arr.len() - 1),
            Some(&(i * 3)),
            "An element should be readable immediately after being pushed."
        );
    }

    assert!(
        arr.iter().copied().eq((0_u64..1000).map(|i| i * 3)),
        "Growing should preserve every element in order."
    );
}

#[test]
fn test_bounds() {
    let mut arr: DynArray<u8> = DynArray::new();
    assert!(arr.is_empty());
    assert_eq!(arr.get(0), None);

    arr.extend([1, 2, 3]);
    assert_eq!(arr.get(3), None);
    assert_eq!(arr.get(usize::MAX), None);
    assert_eq!(arr.get_mut(3), None);

    *arr.get_mut(1).unwrap() = 20;
    assert_eq!(&*arr, &[1, 20, 3]);

    assert_eq!(arr.replace(0, 10), 1);
    assert_eq!(arr.check_index(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_panics!({
        let mut arr: DynArray<u8> = (0..3).collect();
        arr.replace(3, 0);
    });
}

#[test]
fn test_underflow() {
    let mut arr = DynArray::<u16>::with_cap(4);
    assert_eq!(arr.try_pop(), Err(Underflow), "Popping an empty DynArray should underflow.");
    assert_eq!(arr.pop(), None);

    arr.push(7);
    assert_eq!(arr.try_pop(), Ok(7));
    assert_eq!(arr.try_pop(), Err(Underflow));
    assert_eq!(arr.len(), 0, "A failed pop shouldn't change the length.");
}

#[test]
fn test_zero_filling() {
    let arr = DynArray::<u32>::with_cap(3);
    assert!(
        slot_bytes(&arr).iter().all(|b| *b == 0),
        "A new buffer should be zero-filled."
    );

    let mut arr = DynArray::<u32>::with_cap(2);
    arr.extend([u32::MAX, u32::MAX, u32::MAX]);
    assert!(
        slot_bytes(&arr)[12..].iter().all(|b| *b == 0),
        "Slots gained by growing should be zero-filled."
    );

    arr.pop();
    arr.pop();
    assert_eq!(&slot_bytes(&arr)[..4], &[0xFF; 4]);
    assert!(
        slot_bytes(&arr)[4..].iter().all(|b| *b == 0),
        "Popped slots should be zero-filled."
    );
}

#[test]
fn test_allocation_errors() {
    init_test_setup();

    assert_eq!(
        DynArray::<u32>::try_with_cap(usize::MAX).err(),
        Some(GrowError::CapacityOverflow(CapacityOverflow)),
        "A layout larger than isize::MAX should be rejected before allocating."
    );

    let result = DynArray::<u8>::try_with_cap(isize::MAX as usize);
    assert!(
        result.is_err_and(|e| e.is_alloc_failure()),
        "The allocator can't provide isize::MAX bytes, which should be reported."
    );

    assert_panics!({
        DynArray::<u64>::with_cap(usize::MAX);
    });
}

#[test]
fn test_failed_push_is_noop() {
    let mut arr = DynArray::<ZeroSizedType>::with_cap(usize::MAX / 2 + 1);
    // Zero-sized values are never read from memory, so claiming the slots are full is sound.
    arr.len = arr.cap();

    assert!(
        arr.try_push(ZeroSizedType).is_err_and(|e| e.is_capacity_overflow()),
        "Doubling past usize::MAX should fail."
    );
    assert_eq!(arr.len(), usize::MAX / 2 + 1, "A failed push shouldn't change the length.");
    assert_eq!(arr.cap(), usize::MAX / 2 + 1, "A failed push shouldn't change the capacity.");

    arr.len = 0;
}

#[test]
fn test_zst_support() {
    let mut arr = DynArray::new();
    for _ in 0..10 {
        arr.push(ZeroSizedType);
    }

    assert_eq!(arr.len(), 10);
    assert_eq!(arr.cap(), 16);
    assert_eq!(arr.element_width(), 0);
    assert_eq!(arr.get(9), Some(&ZeroSizedType));
    assert_eq!(arr.pop(), Some(ZeroSizedType));
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new();
    let mut arr: DynArray<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    drop(arr.pop());
    assert_eq!(counter.drops(), 1, "A popped element should be owned by the caller.");

    drop(arr);
    assert_eq!(counter.drops(), 10, "Dropping should drop every remaining element once.");

    let mut arr: DynArray<_> = iter::repeat_with(|| counter.clone()).take(5).collect();
    arr.clear();
    assert_eq!(counter.drops(), 15);
    assert!(arr.is_empty());
    assert_eq!(arr.cap(), 5, "Clearing shouldn't release capacity.");
}

#[test]
fn test_visit_and_formatting() {
    let arr: DynArray<u8> = (1..=4).collect();

    let mut visited = DynArray::new();
    arr.visit(|i| visited.push(*i));
    assert_eq!(visited, arr, "Visiting should see every element in index order.");

    assert_eq!(format!("{arr}"), "![1, 2, 3, 4]");
    assert_eq!(format!("{arr:?}"), "DynArray { contents: [1, 2, 3, 4], len: 4, cap: 4 }");
}

#[test]
fn test_equality_and_hash() {
    let arr: DynArray<usize> = (0..5).collect();
    let mut other = DynArray::with_cap(1);
    other.extend(0..5);

    assert_eq!(arr, other, "Capacity shouldn't affect equality.");
    assert_eq!(arr.clone(), arr);

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&arr),
        state.hash_one([0_usize, 1, 2, 3, 4].as_slice()),
        "A DynArray should hash the same as its slice."
    );
}
