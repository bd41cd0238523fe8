//! Blocked parallel scan (prefix combine), exclusive or inclusive.
//!
//! The parallel path is the classic two-phase shape: a per-block serial
//! reduce (up-sweep), a serial exclusive scan of the block totals, and a
//! per-block serial scan seeded with its block's offset (down-sweep).


use std::mem::MaybeUninit;

use crate::blocks::{num_blocks, sliced_for, BLOCK_SIZE};
use crate::flags::Flags;
#[allow(unused_imports)]
use crate::log::Event::*;
use crate::monoid::Monoid;
use crate::reduce::reduce_serial;
use crate::sequence::{make_slice, Sequence, Slice};
use crate::uninit::{MutWindows, UninitVec};

/// Serial scan of `a` into `dst`, starting from `offset`. Returns the
/// total `offset ⊕ a[0] ⊕ … ⊕ a[n-1]`.
///
/// Exclusive unless `fl` carries [`Flags::SCAN_INCLUSIVE`].
///
/// # Panics
///
/// If `dst` does not have exactly the source's length.
pub fn scan_serial<S, F>(
    a: &S,
    dst: &mut [S::Item],
    m: &Monoid<S::Item, F>,
    offset: S::Item,
    fl: Flags,
) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    F: Fn(S::Item, S::Item) -> S::Item,
{
    assert_eq!(a.len(), dst.len(), "scan_serial: length mismatch");
    let mut r = offset;
    if fl.contains(Flags::SCAN_INCLUSIVE) {
        for i in 0..a.len() {
            r = (m.f)(r, a.index(i));
            dst[i] = r.clone();
        }
    } else {
        for i in 0..a.len() {
            let t = a.index(i);
            dst[i] = r.clone();
            r = (m.f)(r, t);
        }
    }
    r
}

/// Serial scan writing into uninitialized slots.
fn scan_serial_into<S, F>(
    a: &Slice<'_, S>,
    dst: &mut [MaybeUninit<S::Item>],
    m: &Monoid<S::Item, F>,
    offset: S::Item,
    inclusive: bool,
) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    F: Fn(S::Item, S::Item) -> S::Item,
{
    debug_assert_eq!(a.len(), dst.len());
    let mut r = offset;
    if inclusive {
        for i in 0..a.len() {
            r = (m.f)(r, a.index(i));
            dst[i].write(r.clone());
        }
    } else {
        for i in 0..a.len() {
            let t = a.index(i);
            dst[i].write(r.clone());
            r = (m.f)(r, t);
        }
    }
    r
}

/// Serial in-place scan over an initialized slice.
fn scan_serial_inplace<T, F>(a: &mut [T], m: &Monoid<T, F>, offset: T, inclusive: bool) -> T
where
    T: Clone,
    F: Fn(T, T) -> T,
{
    let mut r = offset;
    if inclusive {
        for x in a.iter_mut() {
            r = (m.f)(r, x.clone());
            *x = r.clone();
        }
    } else {
        for x in a.iter_mut() {
            let t = x.clone();
            *x = r.clone();
            r = (m.f)(r, t);
        }
    }
    r
}

/// Prefix combine of `a` under `m`, returning the output sequence and
/// the total.
///
/// Exclusive by default: `out[i] = identity ⊕ a[0] ⊕ … ⊕ a[i-1]`. With
/// [`Flags::SCAN_INCLUSIVE`], `out[i]` also folds in `a[i]`. Either way
/// the total is `identity ⊕ a[0] ⊕ … ⊕ a[n-1]`.
pub fn scan<S, F>(a: &S, m: &Monoid<S::Item, F>, fl: Flags) -> (Vec<S::Item>, S::Item)
where
    S: Sequence + ?Sized,
    S::Item: Clone + Send + Sync,
    F: Fn(S::Item, S::Item) -> S::Item + Sync,
{
    let n = a.len();
    let l = num_blocks(n, BLOCK_SIZE);
    let inclusive = fl.contains(Flags::SCAN_INCLUSIVE);
    let view = make_slice(a);
    let mut out = UninitVec::new(n);
    let w = out.windows();

    if l <= 2 || fl.contains(Flags::SEQUENTIAL) {
        log!(ScanSerial { n });
        let dst = unsafe { w.slice(0, n) };
        let total = scan_serial_into(&view, dst, m, m.identity.clone(), inclusive);
        return (unsafe { out.into_vec(n) }, total);
    }

    log!(ScanBlocked { n, blocks: l });
    // Up-sweep: per-block serial reductions.
    let mut sums = UninitVec::new(l);
    let sw = sums.windows();
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let r = reduce_serial(&view.cut(s, e), m);
        unsafe {
            sw.slot(i).write(r);
        }
    });
    let mut sums = unsafe { sums.into_vec(l) };

    // Combine: exclusive scan of the block totals, in place.
    let total = scan_serial_inplace(&mut sums[..], m, m.identity.clone(), false);

    // Down-sweep: per-block serial scans seeded with the block offsets.
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let dst = unsafe { w.slice(s, e) };
        scan_serial_into(&view.cut(s, e), dst, m, sums[i].clone(), inclusive);
    });

    (unsafe { out.into_vec(n) }, total)
}

/// In-place prefix combine: overwrites `a` with the scan output and
/// returns the total.
pub fn scan_inplace<T, F>(a: &mut [T], m: &Monoid<T, F>, fl: Flags) -> T
where
    T: Clone + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let n = a.len();
    let l = num_blocks(n, BLOCK_SIZE);
    let inclusive = fl.contains(Flags::SCAN_INCLUSIVE);
    if l <= 2 || fl.contains(Flags::SEQUENTIAL) {
        return scan_serial_inplace(a, m, m.identity.clone(), inclusive);
    }

    // Up-sweep over the read-only view.
    let mut sums = UninitVec::new(l);
    let sw = sums.windows();
    {
        let view = &*a;
        sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
            let r = reduce_serial(&view[s..e], m);
            unsafe {
                sw.slot(i).write(r);
            }
        });
    }
    let mut sums = unsafe { sums.into_vec(l) };

    let total = scan_serial_inplace(&mut sums[..], m, m.identity.clone(), false);

    // Down-sweep rewrites disjoint block windows in place.
    let w = MutWindows::new(a);
    sliced_for(n, BLOCK_SIZE, fl, |i, s, e| {
        let block = unsafe { w.slice(s, e) };
        scan_serial_inplace(block, m, sums[i].clone(), inclusive);
    });
    total
}
