//! Prefix-sum-driven stable compaction: pack, filter, and two- and
//! three-way splits.
//!
//! All of these share one structure: a first pass over fixed-size blocks
//! computes per-block counts, an in-place exclusive scan of the counts
//! turns them into block base offsets, and a second pass re-traverses
//! each block scattering elements from its base cursor. Stability within
//! a class follows from the left-to-right traversal inside blocks and
//! the block-ordered offsets; disjointness of the write cursors is what
//! lets the second pass run without synchronization.


use std::mem::MaybeUninit;

use crate::blocks::{num_blocks, sliced_for, BLOCK_SIZE};
use crate::delayed::Delayed;
use crate::flags::Flags;
#[allow(unused_imports)]
use crate::log::Event::*;
use crate::monoid::addm;
use crate::scan::scan_inplace;
use crate::sequence::{make_slice, Sequence, Slice};
use crate::uninit::{MutWindows, UninitVec};

fn sum_bools_serial<B>(fl: &B) -> usize
where
    B: Sequence<Item = bool> + ?Sized,
{
    let mut r = 0;
    for i in 0..fl.len() {
        r += fl.index(i) as usize;
    }
    r
}

/// Serial pack of one block into its output window. Returns the number
/// written.
fn pack_serial_at<S, B>(
    a: &Slice<'_, S>,
    fl: &Slice<'_, B>,
    dst: &mut [MaybeUninit<S::Item>],
) -> usize
where
    S: Sequence + ?Sized,
    B: Sequence<Item = bool> + ?Sized,
{
    let mut k = 0;
    for i in 0..a.len() {
        if fl.index(i) {
            dst[k].write(a.index(i));
            k += 1;
        }
    }
    k
}

fn pack_serial<S, B>(a: &S, flags: &B) -> Vec<S::Item>
where
    S: Sequence + ?Sized,
    B: Sequence<Item = bool> + ?Sized,
{
    let m = sum_bools_serial(flags);
    let mut out = Vec::with_capacity(m);
    for i in 0..a.len() {
        if flags.index(i) {
            out.push(a.index(i));
        }
    }
    out
}

/// The elements of `a` whose flag is set, in input order.
///
/// # Panics
///
/// If `flags` does not have exactly the source's length.
pub fn pack<S, B>(a: &S, flags: &B, fl: Flags) -> Vec<S::Item>
where
    S: Sequence + ?Sized,
    B: Sequence<Item = bool> + ?Sized,
{
    let n = a.len();
    assert_eq!(n, flags.len(), "pack: flag sequence length mismatch");
    let l = num_blocks(n, BLOCK_SIZE);
    if l <= 1 || fl.contains(Flags::SEQUENTIAL) {
        return pack_serial(a, flags);
    }

    let a_view = make_slice(a);
    let f_view = make_slice(flags);

    let mut sums = UninitVec::new(l);
    let sw = sums.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let c = sum_bools_serial(&f_view.cut(s, e));
        unsafe {
            sw.slot(i).write(c);
        }
    });
    let mut sums = unsafe { sums.into_vec(l) };
    let add = addm::<usize>();
    let m = scan_inplace(&mut sums[..], &add, Flags::NONE);
    log!(PackBlocked { n, blocks: l, kept: m });

    let mut out = UninitVec::new(m);
    let w = out.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let base = sums[i];
        let end = if i == l - 1 { m } else { sums[i + 1] };
        let dst = unsafe { w.slice(base, end) };
        let k = pack_serial_at(&a_view.cut(s, e), &f_view.cut(s, e), dst);
        debug_assert_eq!(k, end - base);
    });
    unsafe { out.into_vec(m) }
}

/// Pack into a caller-supplied destination; returns the number written.
///
/// # Panics
///
/// If `flags` does not have the source's length, or `dst` is too short
/// for the packed elements.
pub fn pack_into<S, B>(a: &S, flags: &B, dst: &mut [S::Item], fl: Flags) -> usize
where
    S: Sequence + ?Sized,
    B: Sequence<Item = bool> + ?Sized,
{
    let n = a.len();
    assert_eq!(n, flags.len(), "pack_into: flag sequence length mismatch");
    let l = num_blocks(n, BLOCK_SIZE);
    if l <= 1 || fl.contains(Flags::SEQUENTIAL) {
        let mut k = 0;
        for i in 0..n {
            if flags.index(i) {
                dst[k] = a.index(i);
                k += 1;
            }
        }
        return k;
    }

    let a_view = make_slice(a);
    let f_view = make_slice(flags);

    let mut sums = UninitVec::new(l);
    let sw = sums.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let c = sum_bools_serial(&f_view.cut(s, e));
        unsafe {
            sw.slot(i).write(c);
        }
    });
    let mut sums = unsafe { sums.into_vec(l) };
    let add = addm::<usize>();
    let m = scan_inplace(&mut sums[..], &add, Flags::NONE);
    assert!(m <= dst.len(), "pack_into: destination too short");

    let w = MutWindows::new(dst);
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let base = sums[i];
        let end = if i == l - 1 { m } else { sums[i + 1] };
        let block = unsafe { w.slice(base, end) };
        let mut k = 0;
        for j in s..e {
            if f_view.index(j) {
                block[k] = a_view.index(j);
                k += 1;
            }
        }
        debug_assert_eq!(k, end - base);
    });
    m
}

/// Indices whose flag is set: `pack` of the identity delayed sequence.
pub fn pack_index<B>(flags: &B, fl: Flags) -> Vec<usize>
where
    B: Sequence<Item = bool> + ?Sized,
{
    let ids = Delayed::new(flags.len(), |i| i);
    pack(&ids, flags, fl)
}

/// The elements of `a` satisfying `pred`, in input order.
///
/// Equivalent to `pack(a, map(a, pred))`, computed in one fused
/// traversal that caches the predicate per element.
pub fn filter<S, P>(a: &S, pred: P, fl: Flags) -> Vec<S::Item>
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool + Sync,
{
    let n = a.len();
    let l = num_blocks(n, BLOCK_SIZE);
    if l <= 1 || fl.contains(Flags::SEQUENTIAL) {
        let mut out = Vec::new();
        for i in 0..n {
            let v = a.index(i);
            if pred(&v) {
                out.push(v);
            }
        }
        return out;
    }

    // First pass caches the mask while counting.
    let mut mask = UninitVec::new(n);
    let mw = mask.windows();
    let mut sums = UninitVec::new(l);
    let sw = sums.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let block = unsafe { mw.slice(s, e) };
        let mut c = 0;
        for j in s..e {
            let keep = pred(&a.index(j));
            block[j - s].write(keep);
            c += keep as usize;
        }
        unsafe {
            sw.slot(i).write(c);
        }
    });
    let mask = unsafe { mask.into_vec(n) };
    let mut sums = unsafe { sums.into_vec(l) };
    let add = addm::<usize>();
    let m = scan_inplace(&mut sums[..], &add, Flags::NONE);
    log!(PackBlocked { n, blocks: l, kept: m });

    let a_view = make_slice(a);
    let f_view = make_slice(&mask[..]);
    let mut out = UninitVec::new(m);
    let w = out.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let base = sums[i];
        let end = if i == l - 1 { m } else { sums[i + 1] };
        let dst = unsafe { w.slice(base, end) };
        let k = pack_serial_at(&a_view.cut(s, e), &f_view.cut(s, e), dst);
        debug_assert_eq!(k, end - base);
    });
    unsafe { out.into_vec(m) }
}

/// Filter into a caller-supplied destination; returns the number kept.
///
/// # Panics
///
/// If `dst` is too short for the kept elements.
pub fn filter_into<S, P>(a: &S, dst: &mut [S::Item], pred: P, fl: Flags) -> usize
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool + Sync,
{
    let n = a.len();
    let l = num_blocks(n, BLOCK_SIZE);
    if l <= 1 || fl.contains(Flags::SEQUENTIAL) {
        let mut k = 0;
        for i in 0..n {
            let v = a.index(i);
            if pred(&v) {
                dst[k] = v;
                k += 1;
            }
        }
        return k;
    }

    let mut mask = UninitVec::new(n);
    let mw = mask.windows();
    let mut sums = UninitVec::new(l);
    let sw = sums.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let block = unsafe { mw.slice(s, e) };
        let mut c = 0;
        for j in s..e {
            let keep = pred(&a.index(j));
            block[j - s].write(keep);
            c += keep as usize;
        }
        unsafe {
            sw.slot(i).write(c);
        }
    });
    let mask = unsafe { mask.into_vec(n) };
    let mut sums = unsafe { sums.into_vec(l) };
    let add = addm::<usize>();
    let m = scan_inplace(&mut sums[..], &add, Flags::NONE);
    assert!(m <= dst.len(), "filter_into: destination too short");

    let w = MutWindows::new(dst);
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let base = sums[i];
        let end = if i == l - 1 { m } else { sums[i + 1] };
        let block = unsafe { w.slice(base, end) };
        let mut k = 0;
        for j in s..e {
            if mask[j] {
                block[k] = a.index(j);
                k += 1;
            }
        }
        debug_assert_eq!(k, end - base);
    });
    m
}

/// Stable two-way split: all false-flagged elements of `a` in input
/// order, then all true-flagged ones. Returns the output and the false
/// count.
///
/// # Panics
///
/// If `flags` does not have exactly the source's length.
pub fn split_two<S, B>(a: &S, flags: &B, fl: Flags) -> (Vec<S::Item>, usize)
where
    S: Sequence + ?Sized,
    B: Sequence<Item = bool> + ?Sized,
{
    let n = a.len();
    assert_eq!(n, flags.len(), "split_two: flag sequence length mismatch");
    let l = num_blocks(n, BLOCK_SIZE);
    log!(SplitBlocked { n, blocks: l });

    let mut sums = UninitVec::new(l);
    let sw = sums.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let mut c = 0;
        for j in s..e {
            c += !flags.index(j) as usize;
        }
        unsafe {
            sw.slot(i).write(c);
        }
    });
    let mut sums = unsafe { sums.into_vec(l) };
    let add = addm::<usize>();
    let m = scan_inplace(&mut sums[..], &add, Flags::NONE);

    let mut out = UninitVec::new(n);
    let w = out.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        // False cursor from the prefix sum; the true cursor is the block
        // start shifted past the other class's elements.
        let mut c0 = sums[i];
        let mut c1 = s + (m - c0);
        for j in s..e {
            unsafe {
                if !flags.index(j) {
                    w.slot(c0).write(a.index(j));
                    c0 += 1;
                } else {
                    w.slot(c1).write(a.index(j));
                    c1 += 1;
                }
            }
        }
    });
    (unsafe { out.into_vec(n) }, m)
}

/// Stable three-way split of `a` into `dst` by per-element class: class
/// 0, then class 1, then everything else, each in input order. Returns
/// the sizes of classes 0 and 1.
///
/// # Panics
///
/// If `a` and `dst` share storage, or lengths differ.
pub fn split_three<T, C>(a: &[T], dst: &mut [T], classes: &C, fl: Flags) -> (usize, usize)
where
    T: Clone + Send + Sync,
    C: Sequence<Item = u8> + ?Sized,
{
    let n = a.len();
    assert_eq!(n, dst.len(), "split_three: destination length mismatch");
    assert_eq!(n, classes.len(), "split_three: class sequence length mismatch");
    let a_start = a.as_ptr() as usize;
    let a_end = a_start + n * std::mem::size_of::<T>();
    let d_start = dst.as_ptr() as usize;
    let d_end = d_start + n * std::mem::size_of::<T>();
    if a_start < d_end && d_start < a_end {
        panic!("split_three: input and output must not share storage");
    }

    let l = num_blocks(n, BLOCK_SIZE);
    log!(SplitBlocked { n, blocks: l });

    let mut sums0 = UninitVec::new(l);
    let mut sums1 = UninitVec::new(l);
    let sw0 = sums0.windows();
    let sw1 = sums1.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let mut c0 = 0;
        let mut c1 = 0;
        for j in s..e {
            match classes.index(j) {
                0 => c0 += 1,
                1 => c1 += 1,
                _ => {}
            }
        }
        unsafe {
            sw0.slot(i).write(c0);
            sw1.slot(i).write(c1);
        }
    });
    let mut sums0 = unsafe { sums0.into_vec(l) };
    let mut sums1 = unsafe { sums1.into_vec(l) };
    let add = addm::<usize>();
    let m0 = scan_inplace(&mut sums0[..], &add, Flags::NONE);
    let m1 = scan_inplace(&mut sums1[..], &add, Flags::NONE);

    let w = MutWindows::new(dst);
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let mut c0 = sums0[i];
        let mut c1 = m0 + sums1[i];
        let mut c2 = m0 + m1 + (s - sums0[i] - sums1[i]);
        for j in s..e {
            let k = match classes.index(j) {
                0 => {
                    c0 += 1;
                    c0 - 1
                }
                1 => {
                    c1 += 1;
                    c1 - 1
                }
                _ => {
                    c2 += 1;
                    c2 - 1
                }
            };
            unsafe {
                *w.slot(k) = a[j].clone();
            }
        }
    });
    (m0, m1)
}
