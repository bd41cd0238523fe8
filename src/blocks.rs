//! Fixed-size block tiling of an index space.

use crate::flags::Flags;
use crate::scheduler::parallel_for;

/// Block size used by the scan-family kernels.
pub const BLOCK_SIZE: usize = 1 << 10;

/// Number of `block_size` blocks needed to cover `[0, n)`.
pub fn num_blocks(n: usize, block_size: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 + (n - 1) / block_size
    }
}

/// Partition `[0, n)` into `block_size` blocks and run `body(i, s, e)`
/// for each block in parallel, where `[s, e)` is block `i`'s index
/// range. Granularity is one block per parallel unit; `fl` may carry
/// [`Flags::CONSERVATIVE`] to coarsen that, or [`Flags::SEQUENTIAL`] to
/// run the blocks in order on the calling thread.
pub fn sliced_for<F>(n: usize, block_size: usize, fl: Flags, body: F)
where
    F: Fn(usize, usize, usize) + Sync,
{
    let l = num_blocks(n, block_size);
    let run = |i: usize| {
        let s = i * block_size;
        let e = (s + block_size).min(n);
        body(i, s, e);
    };
    if fl.contains(Flags::SEQUENTIAL) {
        for i in 0..l {
            run(i);
        }
    } else {
        parallel_for(0, l, 1, fl.contains(Flags::CONSERVATIVE), run);
    }
}
