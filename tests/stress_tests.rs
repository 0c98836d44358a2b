//! Extreme stress tests that really push the heap to its limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use keyed_heaps::{FibonacciHeap, KeyedHeap, Orientation};

/// Deterministic xorshift so failures reproduce
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Test massive numbers of inserts and pops
#[test]
fn test_massive_operations() {
    let mut heap = FibonacciHeap::min_order();

    for i in 0..10_000 {
        heap.insert((i, i)).unwrap();
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop(), Ok((i, i)));
    }
    assert!(heap.is_empty());
}

/// Test reverse insertion order in a max heap
#[test]
fn test_massive_operations_max_order() {
    let mut heap = FibonacciHeap::max_order();
    for i in 0..5_000i64 {
        heap.insert((i, i)).unwrap();
    }
    for i in (0..5_000).rev() {
        assert_eq!(heap.pop(), Ok((i, i)));
    }
}

/// Test many decrease_key operations
#[test]
fn test_many_decrease_keys() {
    let mut heap = FibonacciHeap::min_order();

    for i in 0..2_000 {
        heap.insert((i, 100_000 + i)).unwrap();
    }
    // Build deep trees before cutting
    heap.pop().unwrap();

    for i in 1..2_000 {
        heap.update_priority((i, i)).unwrap();
    }
    heap.check_invariants().unwrap();

    for i in 1..2_000 {
        assert_eq!(heap.pop(), Ok((i, i)));
    }
}

/// Every decrease inside one deep tree replaces the extremum
#[test]
fn test_decrease_keys_cascade() {
    let mut heap = FibonacciHeap::min_order();
    for i in 0..1_025 {
        heap.insert((i, 10_000 + i)).unwrap();
    }
    heap.pop().unwrap();
    assert_eq!(heap.root_count(), 1);

    for i in 1..1_025 {
        heap.update_priority((i, -i)).unwrap();
        assert_eq!(heap.peek(), Ok(&(i, -i)));
    }
    heap.check_invariants().unwrap();

    for i in (1..1_025).rev() {
        assert_eq!(heap.pop(), Ok((i, -i)));
    }
}

/// Test alternating insert and pop
#[test]
fn test_alternating_ops() {
    let mut heap = FibonacciHeap::min_order();

    for i in 0..2_000 {
        heap.insert((i * 2, i * 2)).unwrap();
        heap.insert((i * 2 + 1, i * 2 + 1)).unwrap();
        assert!(heap.pop().is_ok());
    }
    assert_eq!(heap.len(), 2_000);

    let mut last = i32::MIN;
    while let Ok((_, priority)) = heap.pop() {
        assert!(priority >= last);
        last = priority;
    }
}

/// Test merge with large heaps
#[test]
fn test_large_union() {
    let mut heap1 = FibonacciHeap::min_order();
    let mut heap2 = FibonacciHeap::min_order();

    for i in 0..5_000 {
        heap1.insert((i * 2, i * 2)).unwrap();
        heap2.insert((i * 2 + 1, i * 2 + 1)).unwrap();
    }
    heap1.pop().unwrap();
    heap2.pop().unwrap();

    heap1.union(&mut heap2).unwrap();
    assert_eq!(heap1.len(), 9_998);
    heap1.check_invariants().unwrap();

    let drained: Vec<_> = heap1.drain_sorted().map(|(_, p)| p).collect();
    let expected: Vec<_> = (2..10_000).collect();
    assert_eq!(drained, expected);
}

/// Random mix of every operation, checked against a sorted model
#[test]
fn test_random_workload() {
    for orientation in [Orientation::MinOrder, Orientation::MaxOrder] {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
        let mut heap = FibonacciHeap::new(orientation);
        let mut live: Vec<Option<i64>> = vec![None; 4_096];

        for step in 0..50_000u32 {
            let key = rng.below(live.len() as u64) as usize;
            let priority = rng.below(1_000_000) as i64 - 500_000;
            match rng.below(10) {
                0..=3 => {
                    if heap.insert((key, priority)).is_ok() {
                        assert!(live[key].is_none());
                        live[key] = Some(priority);
                    }
                }
                4..=6 => {
                    if heap.update_priority((key, priority)).is_ok() {
                        live[key] = Some(priority);
                    }
                }
                7 => {
                    if let Ok((k, p)) = heap.delete(&key) {
                        assert_eq!(live[k].take(), Some(p));
                    }
                }
                _ => {
                    if let Ok((k, p)) = heap.pop() {
                        assert_eq!(live[k].take(), Some(p));
                    }
                }
            }
            if step % 5_000 == 0 {
                heap.check_invariants().unwrap();
            }
        }

        let mut expected: Vec<i64> = live.iter().flatten().copied().collect();
        expected.sort_unstable();
        if orientation == Orientation::MaxOrder {
            expected.reverse();
        }
        heap.check_invariants().unwrap();
        let drained: Vec<i64> = heap.drain_sorted().map(|(_, p)| p).collect();
        assert_eq!(drained, expected);
    }
}

/// Repeatedly worsen the current extremum
#[test]
fn test_worsen_extremum_repeatedly() {
    let mut heap = FibonacciHeap::min_order();
    for i in 0..500 {
        heap.insert((i, i)).unwrap();
    }
    heap.pop().unwrap();

    for round in 0..499 {
        let &(key, _) = heap.peek().unwrap();
        heap.update_priority((key, 1_000 + round)).unwrap();
    }
    heap.check_invariants().unwrap();

    let drained: Vec<_> = heap.drain_sorted().map(|(k, _)| k).collect();
    let expected: Vec<_> = (1..500).collect();
    assert_eq!(drained, expected);
}

/// Delete every entry in a scattered order
#[test]
fn test_delete_everything() {
    let mut heap = FibonacciHeap::max_order();
    for i in 0..1_000u32 {
        heap.insert((i, f64::from(i) * 0.5)).unwrap();
    }
    heap.pop().unwrap();

    let mut key = 0u32;
    for _ in 0..999 {
        // 7 is coprime with 999, so this visits every key in 0..999 once
        assert!(heap.delete(&key).is_ok());
        key = (key + 7) % 999;
    }
    assert!(heap.is_empty());
    heap.check_invariants().unwrap();
}
