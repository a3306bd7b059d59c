//! Open the hosting-service page for a commit, file, or pull request.
//!
//! The library turns a commitish in a local clone into the matching URL on
//! GitHub, GitLab, or Bitbucket. It reads repository state by running the
//! `git` binary through [`process::GitRunner`], picks a
//! [`hosting::HostingService`] from the remote's fetch URL, and renders the
//! page URL with [`browse::UrlResolver`].

pub mod browse;
pub mod config;
pub mod error;
pub mod hosting;
pub mod local;
pub mod process;
pub mod pull_request;
pub mod telemetry;

pub use browse::UrlResolver;
pub use config::{AliasMap, BrowseArgs, BrowseTarget};
pub use error::BrowseError;
pub use hosting::{HostingError, HostingService, LineRange, PullRequestNumber};
pub use local::{CommitSha, FetchUrl, Repository, RepositoryError};
pub use process::{ExecuteError, GitCommand, GitRunner};
pub use pull_request::PullRequestResolver;
