//! Blocked parallel reduction.

mod test;

use crate::blocks::{num_blocks, sliced_for, BLOCK_SIZE};
use crate::flags::Flags;
#[allow(unused_imports)]
use crate::log::Event::*;
use crate::monoid::Monoid;
use crate::sequence::{make_slice, Sequence};
use crate::uninit::UninitVec;

/// Serial ordered fold of `a` under `m`.
///
/// Folds from the first element rather than the identity; the identity
/// law makes that observationally equivalent, one operator application
/// cheaper.
pub fn reduce_serial<S, F>(a: &S, m: &Monoid<S::Item, F>) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    F: Fn(S::Item, S::Item) -> S::Item,
{
    if a.is_empty() {
        return m.identity.clone();
    }
    let mut r = a.index(0);
    for j in 1..a.len() {
        r = (m.f)(r, a.index(j));
    }
    r
}

/// The ordered left-fold `identity ⊕ a[0] ⊕ … ⊕ a[n-1]`.
///
/// Blocks are folded serially in input order and the block sums are
/// combined recursively, so the result is deterministic for any
/// associative `m`. The block size grows with `√n` to keep the combine
/// step balanced against the per-block work.
pub fn reduce<S, F>(a: &S, m: &Monoid<S::Item, F>, fl: Flags) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Clone + Send + Sync,
    F: Fn(S::Item, S::Item) -> S::Item + Sync,
{
    let n = a.len();
    let block_size = BLOCK_SIZE.max(4 * (n as f64).sqrt().ceil() as usize);
    let l = num_blocks(n, block_size);
    if l == 0 {
        return m.identity.clone();
    }
    if l == 1 || fl.contains(Flags::SEQUENTIAL) {
        log!(ReduceSerial { n });
        return reduce_serial(a, m);
    }
    log!(ReduceBlocked { n, blocks: l });
    let view = make_slice(a);
    let mut sums = UninitVec::new(l);
    let w = sums.windows();
    sliced_for(n, block_size, fl, |i, s, e| {
        let r = reduce_serial(&view.cut(s, e), m);
        unsafe {
            w.slot(i).write(r);
        }
    });
    let sums = unsafe { sums.into_vec(l) };
    reduce(&sums[..], m, fl)
}
