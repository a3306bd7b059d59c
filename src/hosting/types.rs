//! Value types shared by the hosting services.

use std::fmt;

/// Line selection inside a file view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRange {
    /// A single line.
    Line(u32),
    /// An inclusive range of lines.
    Span {
        /// First selected line.
        start: u32,
        /// Last selected line.
        end: u32,
    },
}

/// Pull or merge request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a pull request number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
