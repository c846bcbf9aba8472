//! Declaration locations.

use std::fmt;

use super::FileId;

/// A line and column position in an input file.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Create from 1-indexed line and column (as displayed to users).
    #[inline]
    pub const fn from_one_indexed(line: u32, col: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            col: col.saturating_sub(1),
        }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// Where an item came from.
///
/// Items read from class files usually know their file but not a line;
/// synthesized items reuse the location of the item they were derived from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct FileLocation {
    pub file: Option<FileId>,
    pub line: Option<LineCol>,
}

impl FileLocation {
    /// A location for items with no known origin.
    pub const UNKNOWN: FileLocation = FileLocation { file: None, line: None };

    /// A location in `file` with no line information.
    pub const fn in_file(file: FileId) -> Self {
        Self { file: Some(file), line: None }
    }

    /// A location at a 1-indexed line of `file`.
    pub const fn at_line(file: FileId, line: u32) -> Self {
        Self {
            file: Some(file),
            line: Some(LineCol::from_one_indexed(line, 1)),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.file.is_none()
    }
}
