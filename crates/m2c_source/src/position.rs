//! Positions within a source file

use derive_more::Display;

/// Highest line number that is tracked; the counter saturates here.
pub const MAX_LINES: u32 = 64_000;

/// Highest column number that is tracked; the counter saturates here.
pub const MAX_COLUMNS: u32 = 250;

/// A 1-based line and column within a source file
#[derive(Debug, Display, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[display(fmt = "{}:{}", line, column)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Creates a new position
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a file
    pub const fn start() -> Self {
        Self::new(1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A line or column counter went past its limit
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LimitViolation {
    /// The given line is longer than [`MAX_COLUMNS`]
    LineTooLong { line: u32 },
    /// The file has more than [`MAX_LINES`] lines
    TooManyLines,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(12, 4).to_string(), "12:4");
    }

    #[test]
    fn test_position_order() {
        assert!(Position::new(1, 80) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 5));
        assert_eq!(Position::default(), Position::start());
    }
}
