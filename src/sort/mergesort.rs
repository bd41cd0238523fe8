//! Parallel stable merge sort backing the `stable_sort` family.
//!
//! Halves sort in parallel and merge out of place, ping-ponging between
//! the input and a scratch buffer. The merge itself forks by bisecting
//! the larger run and binary-searching the matching split point in the
//! smaller one; ties always resolve to the left run, which is what makes
//! the sort stable.

use super::quicksort::insertion_sort;
use crate::scheduler::par_do;

/// Below this length a run is sorted by insertion.
const LEAF: usize = 32;

/// Below this length recursion stops forking.
const MERGE_SORT_BASE: usize = 2048;

/// Below this length merges run serially.
const MERGE_BASE: usize = 2048;

/// First index whose element is not strictly below `v`.
fn lower_bound<T, F>(a: &[T], v: &T, lt: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    let mut lo = 0;
    let mut hi = a.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if lt(&a[mid], v) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// First index whose element is strictly above `v`.
fn upper_bound<T, F>(a: &[T], v: &T, lt: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    let mut lo = 0;
    let mut hi = a.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if lt(v, &a[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

fn merge_serial<T, F>(left: &[T], right: &[T], dst: &mut [T], lt: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let mut i = 0;
    let mut j = 0;
    let mut k = 0;
    while i < left.len() && j < right.len() {
        // Left wins ties.
        if lt(&right[j], &left[i]) {
            dst[k] = right[j].clone();
            j += 1;
        } else {
            dst[k] = left[i].clone();
            i += 1;
        }
        k += 1;
    }
    dst[k..k + left.len() - i].clone_from_slice(&left[i..]);
    k += left.len() - i;
    dst[k..].clone_from_slice(&right[j..]);
}

/// Merge two sorted runs into `dst`, forking on the larger run's
/// midpoint. Splits keep every left-run element of an equal range ahead
/// of every right-run one.
fn merge<T, F>(left: &[T], right: &[T], dst: &mut [T], lt: &F, parallel: bool)
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    debug_assert_eq!(left.len() + right.len(), dst.len());
    if !parallel || dst.len() <= MERGE_BASE {
        merge_serial(left, right, dst, lt);
        return;
    }
    let (i, j) = if left.len() >= right.len() {
        let i = left.len() / 2;
        (i, lower_bound(right, &left[i], lt))
    } else {
        let j = right.len() / 2;
        (upper_bound(left, &right[j], lt), j)
    };
    let (d1, d2) = dst.split_at_mut(i + j);
    par_do(
        || merge(&left[..i], &right[..j], d1, lt, parallel),
        || merge(&left[i..], &right[j..], d2, lt, parallel),
    );
}

/// Sort `a` in place, using `buf` (same length) as scratch.
fn sort_rec<T, F>(a: &mut [T], buf: &mut [T], lt: &F, parallel: bool)
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    let n = a.len();
    if n <= LEAF {
        insertion_sort(a, lt);
        return;
    }
    let mid = n / 2;
    let (a1, a2) = a.split_at_mut(mid);
    let (b1, b2) = buf.split_at_mut(mid);
    if parallel && n > MERGE_SORT_BASE {
        // Reborrow so the halves stay usable for the merge below.
        par_do(
            || sort_into(&mut a1[..], &mut b1[..], lt, parallel),
            || sort_into(&mut a2[..], &mut b2[..], lt, parallel),
        );
    } else {
        sort_into(a1, b1, lt, parallel);
        sort_into(a2, b2, lt, parallel);
    }
    // The sorted halves now live in the scratch; merge them back.
    merge(b1, b2, a, lt, parallel);
}

/// Sort the contents of `a` into `buf`, clobbering `a`.
fn sort_into<T, F>(a: &mut [T], buf: &mut [T], lt: &F, parallel: bool)
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    let n = a.len();
    if n <= LEAF {
        buf.clone_from_slice(a);
        insertion_sort(buf, lt);
        return;
    }
    let mid = n / 2;
    let (a1, a2) = a.split_at_mut(mid);
    let (b1, b2) = buf.split_at_mut(mid);
    if parallel && n > MERGE_SORT_BASE {
        // Reborrow so the halves stay usable for the merge below.
        par_do(
            || sort_rec(&mut a1[..], &mut b1[..], lt, parallel),
            || sort_rec(&mut a2[..], &mut b2[..], lt, parallel),
        );
    } else {
        sort_rec(a1, b1, lt, parallel);
        sort_rec(a2, b2, lt, parallel);
    }
    merge(a1, a2, buf, lt, parallel);
}

/// Stable merge sort of `a` by the strict weak order `lt`.
pub(super) fn merge_sort<T, F>(a: &mut [T], lt: &F, sequential: bool)
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    let n = a.len();
    if n <= LEAF {
        insertion_sort(a, lt);
        return;
    }
    let mut buf = a.to_vec();
    sort_rec(a, &mut buf[..], lt, !sequential);
}
