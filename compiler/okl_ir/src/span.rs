//! Byte ranges into kernel source.
//!
//! The validator never reads source text. Spans come from the front-end,
//! ride along on every node and end up in diagnostic labels.

use std::fmt;
use std::ops::Range;

/// A byte range from the front-end that cannot become a [`Span`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// An offset does not fit in `u32`.
    Overflow { offset: usize },
    /// `end` lies before `start`.
    Inverted { start: usize, end: usize },
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanError::Overflow { offset } => {
                write!(f, "offset {offset} is past the 4 GiB source limit")
            }
            SpanError::Inverted { start, end } => {
                write!(f, "span {start}..{end} ends before it starts")
            }
        }
    }
}

impl std::error::Error for SpanError {}

/// Half-open byte range `start..end` in the kernel source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Checked conversion for offsets read from serialized input.
    pub fn try_from_range(range: Range<usize>) -> Result<Self, SpanError> {
        if range.end < range.start {
            return Err(SpanError::Inverted {
                start: range.start,
                end: range.end,
            });
        }
        let offset =
            |offset: usize| u32::try_from(offset).map_err(|_| SpanError::Overflow { offset });
        Ok(Span {
            start: offset(range.start)?,
            end: offset(range.end)?,
        })
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
