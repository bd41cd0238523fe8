#![cfg(test)]

use super::*;

#[test]
fn basic_accessors() {
    let s = Delayed::new(100, |i| i * i);
    assert_eq!(s.len(), 100);
    assert!(!s.is_empty());
    assert_eq!(s.index(7), 49);
    assert_eq!(s.front(), 0);
    assert_eq!(s.back(), 99 * 99);
}

#[test]
fn offset_range_applies_first() {
    let s = Delayed::with_range(10, 20, |i| 2 * i);
    assert_eq!(s.len(), 10);
    assert_eq!(s.index(0), 20);
    assert_eq!(s.front(), 20);
    assert_eq!(s.back(), 38);
    let collected: Vec<usize> = s.iter().collect();
    assert_eq!(collected, (10..20).map(|i| 2 * i).collect::<Vec<_>>());
}

#[test]
fn checked_access() {
    let s = Delayed::new(3, |i| i + 1);
    assert_eq!(s.get(0), Some(1));
    assert_eq!(s.get(2), Some(3));
    assert_eq!(s.get(3), None);
    assert_eq!(s.get(usize::MAX), None);
}

#[test]
#[should_panic(expected = "front of an empty delayed sequence")]
fn front_of_empty_panics() {
    let s = Delayed::new(0, |i| i);
    s.front();
}

#[test]
fn iterator_is_double_ended_and_exact() {
    let s = Delayed::new(5, |i| i as i32 - 2);
    assert_eq!(s.iter().len(), 5);
    assert_eq!(s.iter().collect::<Vec<_>>(), vec![-2, -1, 0, 1, 2]);
    assert_eq!(s.iter().rev().collect::<Vec<_>>(), vec![2, 1, 0, -1, -2]);

    let mut it = s.iter();
    assert_eq!(it.next(), Some(-2));
    assert_eq!(it.next_back(), Some(2));
    assert_eq!(it.len(), 3);
}

#[test]
fn constant_ignores_index() {
    let s = constant(1000, 42);
    assert_eq!(s.len(), 1000);
    assert!(s.iter().all(|v| v == 42));
}

#[test]
fn dmap_composes_lazily() {
    let base: Vec<i64> = (0..1000).collect();
    let mapped = dmap(&base[..], |x| 3 * x - 1);
    assert_eq!(mapped.len(), 1000);
    assert_eq!(mapped.index(10), 29);

    // Delayed over delayed.
    let twice = dmap(mapped, |x| x + 1);
    assert_eq!(twice.index(10), 30);
}

#[test]
fn views_are_cheaply_copyable() {
    let s = Delayed::new(10, |i| i);
    let t = s.clone();
    assert_eq!(s.iter().sum::<usize>(), t.iter().sum::<usize>());
}
