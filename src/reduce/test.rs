#![cfg(test)]

use super::*;
use crate::delayed::Delayed;
use crate::monoid::{addm, maxm, minm};

fn lcg(n: usize) -> Vec<i64> {
    (0..n as i64).map(|i| (50021 * i + 61) % (1 << 20)).collect()
}

#[test]
fn matches_left_fold() {
    // Straddle the block-size and single-block boundaries.
    for n in [0, 1, 2, 1023, 1024, 1025, 4096, 100_000] {
        let a = lcg(n);
        let sum = reduce(&a[..], &addm::<i64>(), Flags::NONE);
        assert_eq!(sum, a.iter().sum::<i64>(), "n = {}", n);
    }
}

#[test]
fn empty_is_identity() {
    let a: Vec<i64> = vec![];
    assert_eq!(reduce(&a[..], &addm::<i64>(), Flags::NONE), 0);
    assert_eq!(reduce(&a[..], &maxm::<i64>(), Flags::NONE), i64::MIN);
    assert_eq!(reduce(&a[..], &minm::<i64>(), Flags::NONE), i64::MAX);
}

#[test]
fn max_and_min() {
    let a = lcg(100_000);
    assert_eq!(
        reduce(&a[..], &maxm::<i64>(), Flags::NONE),
        *a.iter().max().unwrap()
    );
    assert_eq!(
        reduce(&a[..], &minm::<i64>(), Flags::NONE),
        *a.iter().min().unwrap()
    );
}

#[test]
fn custom_monoid() {
    // Modular multiplication; associative, identity 1.
    let m = Monoid::new(|a: u64, b: u64| (a * b) % 1_000_000_007, 1);
    let a: Vec<u64> = (1..=2000).map(|i| i * 7 + 3).collect();
    let expected = a.iter().fold(1u64, |r, &x| (r * x) % 1_000_000_007);
    assert_eq!(reduce(&a[..], &m, Flags::NONE), expected);
}

#[test]
fn sequential_flag_is_equivalent() {
    let a = lcg(50_000);
    let m = addm::<i64>();
    assert_eq!(
        reduce(&a[..], &m, Flags::NONE),
        reduce(&a[..], &m, Flags::SEQUENTIAL)
    );
    assert_eq!(
        reduce(&a[..], &m, Flags::NONE),
        reduce(&a[..], &m, Flags::CONSERVATIVE)
    );
}

#[test]
fn reduces_delayed_views() {
    let d = Delayed::new(100_000, |i| i as i64);
    let expected = (100_000i64 - 1) * 100_000 / 2;
    assert_eq!(reduce(&d, &addm::<i64>(), Flags::NONE), expected);
}

#[test]
fn serial_kernel_matches() {
    let a = lcg(3000);
    assert_eq!(
        reduce_serial(&a[..], &addm::<i64>()),
        a.iter().sum::<i64>()
    );
}
