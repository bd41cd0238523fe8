//! Execution hints accepted by every kernel.

use std::ops::{BitOr, BitOrAssign};

/// A small bitset of kernel execution hints.
///
/// Unknown bits are ignored. Combine with `|`:
///
/// ```
/// use parseq::Flags;
///
/// let fl = Flags::SEQUENTIAL | Flags::SCAN_INCLUSIVE;
/// assert!(fl.contains(Flags::SEQUENTIAL));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags(u32);

impl Flags {
    /// No hints; the default for every kernel.
    pub const NONE: Flags = Flags(0);

    /// Force single-threaded execution. The output is identical to the
    /// parallel one.
    pub const SEQUENTIAL: Flags = Flags(1);

    /// Hint the scheduler to granularize more coarsely.
    pub const CONSERVATIVE: Flags = Flags(1 << 3);

    /// Make scans inclusive rather than exclusive.
    pub const SCAN_INCLUSIVE: Flags = Flags(1 << 4);

    /// Whether all bits of `other` are set in `self`.
    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}
