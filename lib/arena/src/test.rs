use core::cell::Cell;
use core::marker::PhantomData;
use core::mem;

use crate::DroplessArena;

#[test]
fn zst() {
    #[derive(Clone, Copy)]
    struct Zero {
        _m: PhantomData<i32>,
    }
    assert_eq!(mem::size_of::<Zero>(), 0);

    let arena = DroplessArena::default();

    for _ in 0..999 {
        arena.alloc(Zero { _m: PhantomData });
    }

    let array = arena.alloc_iter((0..100).map(|_| Zero { _m: PhantomData }));
    assert_eq!(array.len(), 100);
    assert_eq!(arena.allocated_bytes(), 0);
}

#[test]
fn alignment() {
    let arena = DroplessArena::default();
    arena.alloc(1u8);
    let wide = arena.alloc(7u64);
    assert_eq!(core::ptr::from_mut(wide).addr() % mem::align_of::<u64>(), 0);
    arena.alloc(2u16);
    let wider = arena.alloc(9u128);
    assert_eq!(core::ptr::from_mut(wider).addr() % mem::align_of::<u128>(), 0);
    assert_eq!(*wide, 7);
    assert_eq!(*wider, 9);
}

#[test]
fn grows_past_a_page() {
    let arena = DroplessArena::default();
    let values: Vec<&u64> = (0..10_000u64).map(|i| &*arena.alloc(i)).collect();
    assert!(arena.allocated_bytes() > crate::PAGE_SIZE);
    assert!(values.iter().enumerate().all(|(i, v)| **v == i as u64));

    let big = arena.alloc_iter(0..(crate::PAGE_SIZE as u32));
    assert_eq!(big.len(), crate::PAGE_SIZE);
    assert_eq!(big[1234], 1234);
}

#[test]
fn linked_nodes() {
    struct Node<'a> {
        val: u32,
        next: Cell<Option<&'a Node<'a>>>,
    }

    let arena = DroplessArena::default();
    let first: &Node = arena.alloc(Node { val: 1, next: Cell::new(None) });
    let second: &Node = arena.alloc(Node { val: 2, next: Cell::new(None) });
    first.next.set(Some(second));
    second.next.set(Some(first));

    let mut sum = 0;
    let mut node = first;
    for _ in 0..4 {
        sum += node.val;
        node = node.next.get().unwrap();
    }
    assert_eq!(sum, 6);
}

#[test]
fn reset_reuses_memory() {
    let mut arena = DroplessArena::default();
    for i in 0..5000u64 {
        arena.alloc(i);
    }
    let before = arena.allocated_bytes();

    arena.reset();
    let after = arena.allocated_bytes();
    assert!(after <= before);
    assert!(after > 0);

    let n = arena.alloc(42u32);
    assert_eq!(*n, 42);
    assert_eq!(arena.allocated_bytes(), after);
}

#[test]
#[should_panic(expected = "needs_drop")]
fn rejects_drop_types() {
    let arena = DroplessArena::default();
    arena.alloc(String::from("leak"));
}
