//! Error types for repository queries.

use thiserror::Error;

use crate::process::ExecuteError;

/// Errors that may occur while querying the local repository.
///
/// Absence ("no such commit", "no such remote") is not an error; the
/// queries report it as `None`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Git failed for a reason other than a missing object.
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// The remote's fetch URL could not be parsed.
    #[error("remote '{remote}' has an unusable fetch URL {url}: {reason}")]
    InvalidFetchUrl {
        /// Name of the remote.
        remote: String,
        /// The URL as reported by git.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
}
