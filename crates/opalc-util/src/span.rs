//! Source location tracking.
//!
//! Positions are 0-based: the first byte of a file is line 0, column 0, and
//! the column resets to 0 after every newline. Display formatting shows the
//! conventional 1-based line number.

use std::fmt;

/// A line/column position in a source buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    /// Line number (0-based).
    pub line: u32,
    /// Column number (0-based, in bytes from the start of the line).
    pub column: u32,
}

impl Loc {
    /// Start of the buffer.
    pub const START: Loc = Loc { line: 0, column: 0 };

    /// Creates a location.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column)
    }
}

/// A half-open source region from `start` up to `end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Position before the first byte of the region.
    pub start: Loc,
    /// Position after the last byte of the region.
    pub end: Loc,
}

impl Span {
    /// A span carrying no real location.
    pub const DUMMY: Span = Span {
        start: Loc::START,
        end: Loc::START,
    };

    /// Creates a span.
    pub const fn new(start: Loc, end: Loc) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based_for_lines() {
        let loc = Loc::new(0, 4);
        assert_eq!(loc.to_string(), "1:4");

        let span = Span::new(Loc::new(1, 0), Loc::new(1, 3));
        assert_eq!(span.to_string(), "2:0-2:3");
    }

    #[test]
    fn test_ordering() {
        assert!(Loc::new(0, 5) < Loc::new(1, 0));
        assert!(Loc::new(2, 1) < Loc::new(2, 9));
    }
}
