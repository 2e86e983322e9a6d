use std::ops::Range;

/// Byte range of a token or node in the source it was parsed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    /// Span for nodes synthesized outside the parser (builtins, tests).
    pub fn fake() -> Span {
        Span { start: 0, end: 0 }
    }

    pub fn is_fake(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn extend(&self, span: Span) -> Span {
        Span {
            start: self.start.min(span.start),
            end: self.end.max(span.end),
        }
    }
}

impl Eq for Span {}

impl PartialEq for Span {
    fn eq(&self, _: &Self) -> bool {
        // trees built with fake spans in tests must compare equal to parsed ones
        true
    }
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}
