//! Source location spans.

use std::fmt;

/// Error when creating a span from a range that exceeds `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// Span start position exceeds `u32::MAX`.
    StartTooLarge(usize),
    /// Span end position exceeds `u32::MAX`.
    EndTooLarge(usize),
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanError::StartTooLarge(v) => write!(f, "span start {v} exceeds u32::MAX"),
            SpanError::EndTooLarge(v) => write!(f, "span end {v} exceeds u32::MAX"),
        }
    }
}

impl std::error::Error for SpanError {}

/// Byte range into a source file.
///
/// `end` is exclusive. Generated code that has no source location uses
/// [`Span::DUMMY`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for generated code.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Try to create a span from a byte range.
    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanError> {
        let start =
            u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?;
        Ok(Span { start, end })
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let merged = Span::new(20, 30).merge(Span::new(10, 25));
        assert_eq!(merged, Span::new(10, 30));
    }

    #[test]
    fn test_span_try_from_range() {
        assert_eq!(Span::try_from_range(50..100), Ok(Span::new(50, 100)));
        let large = u32::MAX as usize + 1;
        assert!(matches!(
            Span::try_from_range(large..large + 1),
            Err(SpanError::StartTooLarge(_))
        ));
        assert!(matches!(
            Span::try_from_range(0..large),
            Err(SpanError::EndTooLarge(_))
        ));
    }

    #[test]
    fn test_span_point_and_dummy() {
        assert!(Span::point(42).is_empty());
        assert_eq!(Span::default(), Span::DUMMY);
        assert_eq!(format!("{:?}", Span::new(100, 200)), "100..200");
    }
}
