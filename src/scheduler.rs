//! The thin fork-join contract the kernels consume.
//!
//! Everything the library wants from its executor is the four functions
//! in this module, implemented on top of the `rayon` work-stealing pool.
//! Bodies handed to [`parallel_for`] may run on any worker and in any
//! order; the implicit join at the end of each call is the only
//! happens-before edge the kernels rely on.

use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

/// Width of the underlying worker pool.
pub fn num_workers() -> usize {
    rayon::current_num_threads()
}

/// Run two closures, potentially in parallel, and return both results.
pub fn par_do<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

/// Three-way fork.
///
/// rayon has no native ternary join, so this nests two binary ones; `a`
/// runs on the forking side of the outer join.
pub fn par_do3<A, B, C, RA, RB, RC>(a: A, b: B, c: C) -> (RA, RB, RC)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    C: FnOnce() -> RC + Send,
    RA: Send,
    RB: Send,
    RC: Send,
{
    let (ra, (rb, rc)) = rayon::join(a, || rayon::join(b, c));
    (ra, rb, rc)
}

/// Schedule `body(i)` for every `i` in `lo..hi`.
///
/// `granularity` is the minimum number of consecutive indices handed to
/// a single task. `conservative` coarsens it further so that only a
/// couple of chunks per worker are created.
pub fn parallel_for<F>(lo: usize, hi: usize, granularity: usize, conservative: bool, body: F)
where
    F: Fn(usize) + Sync,
{
    let n = hi.saturating_sub(lo);
    if n == 0 {
        return;
    }
    let mut grain = granularity.max(1);
    if conservative {
        grain = grain.max(n / (2 * num_workers()).max(1)).max(1);
    }
    if n <= grain {
        for i in lo..hi {
            body(i);
        }
        return;
    }
    (lo..hi)
        .into_par_iter()
        .with_min_len(grain)
        .for_each(|i| body(i));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};

    #[test]
    fn par_do_returns_both() {
        let (a, b) = par_do(|| 1 + 1, || "two");
        assert_eq!(a, 2);
        assert_eq!(b, "two");
    }

    #[test]
    fn par_do3_returns_all() {
        let (a, b, c) = par_do3(|| 1, || 2, || 3);
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn parallel_for_visits_every_index_once() {
        let n = 100_000;
        let hits: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();
        parallel_for(0, n, 64, false, |i| {
            hits[i].fetch_add(1, Relaxed);
        });
        assert!(hits.iter().all(|h| h.load(Relaxed) == 1));
    }

    #[test]
    fn parallel_for_empty_range() {
        parallel_for(5, 5, 1, false, |_| panic!("must not run"));
        parallel_for(7, 3, 1, false, |_| panic!("must not run"));
    }
}
