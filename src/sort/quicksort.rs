//! Three-way quicksort with five-element pivot sampling.
//!
//! Partitioning splits on two sampled pivots into less-than / between /
//! greater-than segments. When the sampled pivots compare equal, every
//! element of the middle segment equals them and the middle recursion is
//! skipped.

#[allow(unused_imports)]
use crate::log::Event::*;
use crate::scheduler::{par_do, par_do3};
use std::mem;

/// Below this length the fork-join driver runs serially.
pub const QSORT_PAR_THRESHOLD: usize = 1 << 10;

/// Insertion-sort cutoff; larger elements cross over earlier because
/// their copies dominate.
fn base_case<T>(n: usize) -> bool {
    let large = mem::size_of::<T>() > 8;
    if large {
        n < 16
    } else {
        n < 24
    }
}

pub(crate) fn insertion_sort<T, F>(a: &mut [T], lt: &F)
where
    F: Fn(&T, &T) -> bool,
{
    for i in 1..a.len() {
        let mut j = i;
        while j > 0 && lt(&a[j], &a[j - 1]) {
            a.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Sort five elements sampled at even strides into `a[0..5]`.
fn sort5<T, F>(a: &mut [T], lt: &F)
where
    F: Fn(&T, &T) -> bool,
{
    let n = a.len();
    let m = n / 6;
    for l in 0..5 {
        a.swap(l, m * (l + 1));
    }
    insertion_sort(&mut a[..5], lt);
}

/// Partition `a` around two sampled pivots.
///
/// Returns `(l, m, pivots_equal)`: `a[..l]` is strictly below the low
/// pivot, which lands at `a[l]`; `a[l + 1..m]` lies between the pivots
/// inclusive; `a[m..]` is strictly above the high pivot. When
/// `pivots_equal`, the middle segment is entirely equal to the pivots
/// and needs no further sorting.
fn split3<T, F>(a: &mut [T], lt: &F) -> (usize, usize, bool)
where
    F: Fn(&T, &T) -> bool,
{
    let n = a.len();
    assert!(n >= 5, "split3 requires at least five elements");
    sort5(a, lt);

    // Move the sampled pivots to the front: a[0] = p1, a[1] = p2.
    a.swap(0, 1);
    a.swap(1, 3);
    let pivots_equal = !lt(&a[0], &a[1]);

    // Skip prefixes that already satisfy their invariants. The sampled
    // elements at 2 and 3 bound both sweeps.
    let mut l = 2;
    let mut r = n - 1;
    while lt(&a[l], &a[0]) {
        l += 1;
    }
    while lt(&a[1], &a[r]) {
        r -= 1;
    }
    let mut m = l;

    // a[2..l] is below p1, a[l..m] between the pivots, a[m..=r]
    // unprocessed, a[r+1..] above p2.
    while m <= r {
        if lt(&a[m], &a[0]) {
            a.swap(m, l);
            l += 1;
        } else if lt(&a[1], &a[m]) {
            a.swap(m, r);
            // The element swapped in from the right may belong in the
            // low segment.
            if lt(&a[m], &a[0]) {
                a.swap(l, m);
                l += 1;
            }
            r -= 1;
            while lt(&a[1], &a[r]) {
                r -= 1;
            }
        }
        m += 1;
    }

    // Swap the pivots into their boundary slots.
    l -= 2;
    a.swap(1, l + 1);
    a.swap(0, l);
    a.swap(l + 1, r);
    (l, m, pivots_equal)
}

/// Serial three-way quicksort. Recurses on the middle and right
/// segments and loops on the left to bound stack depth.
pub fn quicksort_serial<T, F>(a: &mut [T], lt: &F)
where
    F: Fn(&T, &T) -> bool,
{
    let mut a = a;
    while !base_case::<T>(a.len()) {
        let (l, m, pivots_equal) = split3(a, lt);
        let tmp = a;
        let (head, right) = tmp.split_at_mut(m);
        let (left, mid) = head.split_at_mut(l + 1);
        if !pivots_equal {
            quicksort_serial(mid, lt);
        }
        quicksort_serial(right, lt);
        a = &mut left[..l];
    }
    insertion_sort(a, lt);
}

/// Fork-join three-way quicksort: sorts `a` in place by the strict weak
/// order `lt`.
pub fn quicksort<T, F>(a: &mut [T], lt: &F)
where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
{
    let n = a.len();
    if n < QSORT_PAR_THRESHOLD {
        quicksort_serial(a, lt);
        return;
    }
    let (l, m, pivots_equal) = split3(a, lt);
    log!(QuicksortFork {
        n,
        mid_skipped: pivots_equal
    });
    let (head, right) = a.split_at_mut(m);
    let (left, mid) = head.split_at_mut(l + 1);
    let left = &mut left[..l];
    if pivots_equal {
        par_do(|| quicksort(left, lt), || quicksort(right, lt));
    } else {
        par_do3(
            || quicksort(left, lt),
            || quicksort(mid, lt),
            || quicksort(right, lt),
        );
    }
}
