use serde::Serialize;

/// A zero-based location in the source text.
///
/// `character` counts Unicode scalar values from the start of the line, so a
/// multi-byte character such as `職` advances it by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A `[start, end]` span of the source text. `start <= end` by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Builds a range, swapping the endpoints if they arrive out of order.
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// A zero-width range sitting at `at`.
    pub const fn empty_at(at: Position) -> Self {
        Self { start: at, end: at }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `pos` lies inside the range, endpoints included.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Whether `other` lies entirely inside this range.
    #[must_use]
    pub fn encloses(&self, other: &Range) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }
}
