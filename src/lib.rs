//! Parallel bulk-sequence primitives.
//!
//! `parseq` is a small algebra over large in-memory sequences: blocked
//! [`reduce()`] and [`scan()`], prefix-sum-driven stable compaction
//! ([`pack()`], [`filter()`], [`split_two()`], [`split_three()`]), a
//! parallel three-way [quicksort](sort_inplace()) and a stable parallel
//! merge sort, and [delayed sequences](Delayed) that compose with all of
//! the above without materializing anything.
//!
//! Every kernel runs on a fork-join work-stealing pool through the thin
//! contract in [`scheduler`]: `parallel_for`, `par_do`, `par_do3`, and
//! `num_workers`. Kernels partition their index space so that no two
//! concurrent tasks touch the same element; the implicit join at the end
//! of each parallel region is the only synchronization they rely on.
//! Given the same inputs, every kernel returns bit-identical results
//! across runs: the block partition is a function of the input length
//! alone, blocks fold in input order, and the combine order is fixed.
//!
//! Sources are anything implementing [`Sequence`]: slices, vectors, or
//! delayed views. Reductions and scans take a [`Monoid`] (an associative
//! operator with a two-sided identity), and all kernels accept [`Flags`]
//! to force sequential execution, ask for coarser granularity, or switch
//! a scan from exclusive to inclusive.

#[macro_use]
mod log;

mod uninit;

pub mod blocks;
pub mod delayed;
pub mod flags;
pub mod monoid;
pub mod pack;
pub mod reduce;
pub mod scan;
pub mod scheduler;
pub mod sequence;
pub mod sort;

pub use crate::blocks::{num_blocks, sliced_for, BLOCK_SIZE};
pub use crate::delayed::{constant, dmap, Delayed};
pub use crate::flags::Flags;
pub use crate::monoid::{addm, maxm, minm, Monoid};
pub use crate::pack::{filter, filter_into, pack, pack_index, pack_into, split_three, split_two};
pub use crate::reduce::{reduce, reduce_serial};
pub use crate::scan::{scan, scan_inplace, scan_serial};
pub use crate::scheduler::{num_workers, par_do, par_do3, parallel_for};
pub use crate::sequence::{copy_into, make_slice, map, tabulate, Sequence, Slice};
pub use crate::sort::{
    quicksort, quicksort_serial, sort, sort_by, sort_inplace, sort_inplace_by, stable_sort,
    stable_sort_by, stable_sort_inplace, stable_sort_inplace_by, QSORT_PAR_THRESHOLD,
};
