//! Local repository queries.
//!
//! This module answers the questions URL construction needs from the local
//! checkout: which commit a commitish names, which remote contains it, where
//! that remote fetches from, and whether a path is a file or a directory.
//!
//! # Example
//!
//! ```no_run
//! use git_browse::local::Repository;
//! use git_browse::process::GitCommand;
//!
//! let runner = GitCommand::new();
//! let repository = Repository::new(&runner);
//! if let Ok(Some(remote)) = repository.find_containing_remote("HEAD") {
//!     println!("HEAD is on {remote}");
//! }
//! ```

mod error;
mod remote;
mod repository;
mod types;

pub use error::RepositoryError;
pub use remote::{DEFAULT_REMOTE_NAME, FetchUrl, select_containing_remote};
pub use repository::Repository;
pub use types::{CommitSha, ObjectKind};

#[cfg(test)]
mod tests;
