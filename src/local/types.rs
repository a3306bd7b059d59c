//! Domain-specific types for repository queries.

use std::fmt;

/// A full commit hash as printed by `git rev-parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    /// Creates a new `CommitSha` from a string.
    #[must_use]
    pub const fn new(sha: String) -> Self {
        Self(sha)
    }

    /// Returns the SHA as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CommitSha {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<CommitSha> for String {
    fn from(sha: CommitSha) -> Self {
        sha.0
    }
}

/// Kind of object a repository path names at a given commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A directory.
    Tree,
    /// A file.
    Blob,
    /// A submodule entry.
    Commit,
}

impl ObjectKind {
    /// Parses the type column of `git ls-tree` output.
    #[must_use]
    pub fn from_ls_tree(value: &str) -> Option<Self> {
        match value {
            "tree" => Some(Self::Tree),
            "blob" => Some(Self::Blob),
            "commit" => Some(Self::Commit),
            _ => None,
        }
    }
}
