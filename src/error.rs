//! Crate-level error type surfaced to the command line.

use thiserror::Error;

use crate::hosting::HostingError;
use crate::local::RepositoryError;

/// Errors that stop URL resolution.
///
/// Each message names the commitish, remote, or path that could not be
/// resolved so it can be printed as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrowseError {
    /// The commitish does not name a commit.
    #[error("No commit found for {commitish}")]
    CommitNotFound {
        /// The commitish as given.
        commitish: String,
    },

    /// The remote does not exist or has no fetch URL.
    #[error("No remote '{remote}' found")]
    RemoteNotFound {
        /// Name of the remote.
        remote: String,
    },

    /// No pull request could be associated with the commit.
    #[error("No pull request found for {commitish}")]
    PullRequestNotFound {
        /// The commitish as given.
        commitish: String,
    },

    /// The path does not exist at the commit.
    #[error("No file or directory '{path}' found at {commitish}")]
    PathNotFound {
        /// Repository-root-relative path.
        path: String,
        /// The commitish that was inspected.
        commitish: String,
    },

    /// A repository query failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The hosting service could not render the URL.
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// The system browser could not be opened.
    #[error("failed to open {url}: {message}")]
    Browser {
        /// URL that was being opened.
        url: String,
        /// Error detail from the opener.
        message: String,
    },

    /// Writing output failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
