//! Source location tracking for deck text
//!
//! `Position` and `Span` locate tokens inside a single text buffer while it is
//! being parsed. `KeywordLocation` is the owned, file-qualified location kept
//! on every parsed keyword and carried by parse errors.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position of the first character of a line that begins at `offset`
    pub fn line_start(offset: usize, line: u32) -> Self {
        Self {
            offset,
            line,
            column: 1,
        }
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a single-character span
    pub fn single(pos: Position) -> Self {
        let end = Position {
            offset: pos.offset + 1,
            line: pos.line,
            column: pos.column + 1,
        };
        Self { start: pos, end }
    }

    /// Span covering `text` starting at `start`
    pub fn covering(start: Position, text: &str) -> Self {
        Self {
            start,
            end: start.advance_str(text),
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };

        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Get the source text for this span from the input
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }

    /// Create an unknown/dummy span (useful for generated records)
    pub fn dummy() -> Self {
        Self {
            start: Position::start(),
            end: Position::start(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Where a keyword appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeywordLocation {
    /// Keyword name as written in the deck
    pub keyword: String,
    /// File the keyword was read from; `<memory>` for string input
    pub filename: String,
    /// Line number of the keyword header (1-based)
    pub line: u32,
}

impl KeywordLocation {
    pub fn new(keyword: impl Into<String>, filename: impl Into<String>, line: u32) -> Self {
        Self {
            keyword: keyword.into(),
            filename: filename.into(),
            line,
        }
    }

    /// Location for records built in code rather than read from text
    pub fn synthetic(keyword: impl Into<String>) -> Self {
        Self::new(keyword, "<generated>", 0)
    }
}

impl fmt::Display for KeywordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} line {}", self.keyword, self.filename, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start().advance_str("AB\nC");
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 4);
    }

    #[test]
    fn test_span_covering_and_slice() {
        let text = "EQUIL\n 1 2 /";
        let span = Span::covering(Position::start(), "EQUIL");
        assert_eq!(span.slice(text), "EQUIL");
        assert_eq!(span.len(), 5);
        assert_eq!(span.to_string(), "1:1-6");
    }

    #[test]
    fn test_span_merge() {
        let a = Span::single(Position::new(0, 1, 1));
        let b = Span::single(Position::new(7, 2, 2));
        let merged = a.merge(b);
        assert_eq!(merged.start().offset, 0);
        assert_eq!(merged.end().offset, 8);
        assert_eq!(merged.to_string(), "1:1-2:3");
    }

    #[test]
    fn test_keyword_location_display() {
        let loc = KeywordLocation::new("WCONPROD", "CASE.DATA", 120);
        assert_eq!(loc.to_string(), "WCONPROD in CASE.DATA line 120");
        assert_eq!(KeywordLocation::synthetic("OIL").line, 0);
    }
}
