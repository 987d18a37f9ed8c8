//! Interned identifier handle.

use std::fmt;

/// Handle to a string held by a [`StringInterner`](crate::StringInterner).
///
/// Index into the interner's table; comparing two names compares the
/// strings they stand for. Index 0 is always the empty string.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, present in every interner.
    pub const EMPTY: Name = Name(0);

    pub(crate) const fn from_index(index: u32) -> Self {
        Name(index)
    }

    /// Position in the interner's table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}
