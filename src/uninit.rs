//! Uninitialized output buffers and the disjoint-window discipline used
//! to fill them from parallel block bodies.
//!
//! Kernels that produce a fresh sequence reserve capacity up front and
//! hand each parallel block a raw window into the buffer. Windows are
//! disjoint by construction (block ranges partition the index space),
//! every slot is written exactly once, and the buffer's length is set
//! only after the parallel region's join.

use std::mem::MaybeUninit;

/// A buffer of uninitialized slots destined to become a `Vec<T>`.
pub(crate) struct UninitVec<T> {
    buf: Vec<T>,
}

impl<T> UninitVec<T> {
    pub fn new(n: usize) -> Self {
        UninitVec {
            buf: Vec::with_capacity(n),
        }
    }

    /// Raw windows over the buffer, for handing to parallel writers.
    pub fn windows(&mut self) -> UninitWindows<T> {
        UninitWindows {
            ptr: self.buf.as_mut_ptr(),
            len: self.buf.capacity(),
        }
    }

    /// Turn the buffer into a vector of length `len`.
    ///
    /// # Safety
    ///
    /// Every slot in `0..len` must have been written exactly once since
    /// the buffer was created.
    pub unsafe fn into_vec(mut self, len: usize) -> Vec<T> {
        debug_assert!(len <= self.buf.capacity());
        self.buf.set_len(len);
        self.buf
    }
}

/// Shared raw view over an [`UninitVec`]'s slots.
///
/// `Copy`, so block bodies capture it by value. Sending it across
/// workers is sound because every parallel region hands disjoint index
/// ranges to its writers.
pub(crate) struct UninitWindows<T> {
    ptr: *mut T,
    len: usize,
}

impl<T> Clone for UninitWindows<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for UninitWindows<T> {}

unsafe impl<T: Send> Send for UninitWindows<T> {}
unsafe impl<T: Send> Sync for UninitWindows<T> {}

impl<T> UninitWindows<T> {
    /// The window `[s, e)`, as uninitialized slots.
    ///
    /// # Safety
    ///
    /// The range must be in bounds and no other live reference to it may
    /// exist.
    pub unsafe fn slice<'a>(self, s: usize, e: usize) -> &'a mut [MaybeUninit<T>] {
        debug_assert!(s <= e && e <= self.len);
        std::slice::from_raw_parts_mut(self.ptr.add(s) as *mut MaybeUninit<T>, e - s)
    }

    /// The single uninitialized slot `i`.
    ///
    /// # Safety
    ///
    /// As for [`slice`](Self::slice).
    pub unsafe fn slot<'a>(self, i: usize) -> &'a mut MaybeUninit<T> {
        debug_assert!(i < self.len);
        &mut *(self.ptr.add(i) as *mut MaybeUninit<T>)
    }
}

/// Shared raw view over an initialized mutable slice, for parallel block
/// bodies that rewrite disjoint ranges in place.
pub(crate) struct MutWindows<T> {
    ptr: *mut T,
    len: usize,
}

impl<T> Clone for MutWindows<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MutWindows<T> {}

unsafe impl<T: Send> Send for MutWindows<T> {}
unsafe impl<T: Send> Sync for MutWindows<T> {}

impl<T> MutWindows<T> {
    pub fn new(s: &mut [T]) -> Self {
        MutWindows {
            ptr: s.as_mut_ptr(),
            len: s.len(),
        }
    }

    /// The window `[s, e)`.
    ///
    /// # Safety
    ///
    /// The range must be in bounds and no other live reference to it may
    /// exist.
    pub unsafe fn slice<'a>(self, s: usize, e: usize) -> &'a mut [T] {
        debug_assert!(s <= e && e <= self.len);
        std::slice::from_raw_parts_mut(self.ptr.add(s), e - s)
    }

    /// The single slot `i`.
    ///
    /// # Safety
    ///
    /// As for [`slice`](Self::slice).
    pub unsafe fn slot<'a>(self, i: usize) -> &'a mut T {
        debug_assert!(i < self.len);
        &mut *self.ptr.add(i)
    }
}
