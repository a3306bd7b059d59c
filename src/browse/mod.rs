//! URL orchestration: from command-line intent to a hosting-service URL.
//!
//! Every entry point follows the same chain. Pick a remote (the one given,
//! else the remote whose branches contain the commit, else `origin`), read
//! its fetch URL, pick the hosting service for that URL, and hand the
//! request over to the service.

mod path;

use url::Url;

pub use path::{parse_path_with_range, root_relative};

use crate::config::{AliasMap, BrowseArgs, BrowseTarget, DEFAULT_COMMITISH};
use crate::error::BrowseError;
use crate::hosting::HostingService;
use crate::local::{DEFAULT_REMOTE_NAME, FetchUrl, ObjectKind, Repository};
use crate::pull_request::PullRequestResolver;

/// A remote resolved as far as its hosting service.
struct HostedRemote {
    name: String,
    fetch_url: FetchUrl,
    service: HostingService,
}

/// Resolves browse requests against one repository.
#[derive(Clone, Copy)]
pub struct UrlResolver<'r> {
    repository: Repository<'r>,
    aliases: &'r AliasMap,
}

impl<'r> UrlResolver<'r> {
    /// Creates a resolver for `repository` with hostname `aliases`.
    #[must_use]
    pub const fn new(repository: Repository<'r>, aliases: &'r AliasMap) -> Self {
        Self {
            repository,
            aliases,
        }
    }

    /// Resolves the URL selected by the command-line flags.
    ///
    /// `--home` and `--pr` use the commitish as given. Otherwise it is
    /// pinned first: to a full hash with `--permalink`, else to its
    /// abbreviated ref name.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::CommitNotFound`] when the commitish does not
    /// resolve, plus any error of the selected entry point.
    pub fn resolve(&self, args: &BrowseArgs) -> Result<Url, BrowseError> {
        let remote = args.remote.as_deref();
        match args.target() {
            BrowseTarget::Home => self.home_url(remote),
            BrowseTarget::PullRequest => self.pull_request_url(&args.commitish, remote),
            BrowseTarget::Commit { permalink } => {
                let commitish = self.pin(&args.commitish, permalink)?;
                self.commit_url(&commitish, remote)
            }
            BrowseTarget::Object { permalink } => {
                let commitish = self.pin(&args.commitish, permalink)?;
                self.object_url(&commitish, args.path_or_default(), remote)
            }
        }
    }

    /// Returns the repository home page.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::RemoteNotFound`] when the remote has no fetch
    /// URL, or an error from git or the hosting service.
    pub fn home_url(&self, remote: Option<&str>) -> Result<Url, BrowseError> {
        let hosted = self.hosted_remote(remote, DEFAULT_COMMITISH)?;
        Ok(hosted.service.home_url(&hosted.fetch_url)?)
    }

    /// Returns the page of the commit `commitish` names.
    ///
    /// Services that only accept full hashes get one when `commitish`
    /// resolves, and the literal commitish otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::RemoteNotFound`] when the remote has no fetch
    /// URL, or an error from git or the hosting service.
    pub fn commit_url(&self, commitish: &str, remote: Option<&str>) -> Result<Url, BrowseError> {
        let hosted = self.hosted_remote(remote, commitish)?;
        let commit = if hosted.service.commit_needs_full_hash() {
            self.repository
                .resolve_full_hash(commitish)?
                .map_or_else(|| commitish.to_owned(), String::from)
        } else {
            commitish.to_owned()
        };
        Ok(hosted.service.commit_url(&hosted.fetch_url, &commit)?)
    }

    /// Returns the directory or file page for `path` at `commitish`.
    ///
    /// `path` is relative to the working directory and may carry a
    /// `:LINE` or `:START:END` suffix, which only affects file pages.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::PathNotFound`] when nothing exists at `path`,
    /// [`BrowseError::RemoteNotFound`] when the remote has no fetch URL, or
    /// an error from git or the hosting service.
    pub fn object_url(
        &self,
        commitish: &str,
        path: &str,
        remote: Option<&str>,
    ) -> Result<Url, BrowseError> {
        let hosted = self.hosted_remote(remote, commitish)?;
        let (relative, range) = parse_path_with_range(path);
        let repo_path = root_relative(&self.repository.show_prefix()?, relative);

        if repo_path.is_empty() {
            return Ok(hosted.service.tree_url(&hosted.fetch_url, commitish, "")?);
        }

        let kind = self
            .repository
            .object_kind(commitish, &repo_path)?
            .ok_or_else(|| BrowseError::PathNotFound {
                path: repo_path.clone(),
                commitish: commitish.to_owned(),
            })?;
        tracing::debug!(path = %repo_path, ?kind, "classified path");

        let url = match kind {
            ObjectKind::Blob => {
                hosted
                    .service
                    .blob_url(&hosted.fetch_url, commitish, &repo_path, range)?
            }
            ObjectKind::Tree | ObjectKind::Commit => {
                hosted
                    .service
                    .tree_url(&hosted.fetch_url, commitish, &repo_path)?
            }
        };
        Ok(url)
    }

    /// Returns the page of the pull request that introduced `commitish`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::Hosting`] when the service has no pull request
    /// pages, [`BrowseError::CommitNotFound`] or
    /// [`BrowseError::PullRequestNotFound`] when the lookup comes up empty,
    /// or an error from git.
    pub fn pull_request_url(
        &self,
        commitish: &str,
        remote: Option<&str>,
    ) -> Result<Url, BrowseError> {
        let hosted = self.hosted_remote(remote, commitish)?;
        hosted.service.require_pull_requests()?;

        let sha = self
            .repository
            .resolve_full_hash(commitish)?
            .ok_or_else(|| BrowseError::CommitNotFound {
                commitish: commitish.to_owned(),
            })?;
        let number = PullRequestResolver::new(self.repository, hosted.service)
            .find_pull_request_for(sha.as_str(), &hosted.name)?
            .ok_or_else(|| BrowseError::PullRequestNotFound {
                commitish: commitish.to_owned(),
            })?;

        Ok(hosted.service.pull_request_url(&hosted.fetch_url, number)?)
    }

    /// Resolves `commitish` to the form used in links.
    fn pin(&self, commitish: &str, permalink: bool) -> Result<String, BrowseError> {
        let pinned = if permalink {
            self.repository
                .resolve_full_hash(commitish)?
                .map(String::from)
        } else {
            self.repository.resolve_abbrev_ref(commitish)?
        };
        pinned.ok_or_else(|| BrowseError::CommitNotFound {
            commitish: commitish.to_owned(),
        })
    }

    /// The remote whose branches contain `commitish`, else `origin`.
    fn default_remote(&self, commitish: &str) -> Result<String, BrowseError> {
        Ok(self
            .repository
            .find_containing_remote(commitish)?
            .unwrap_or_else(|| DEFAULT_REMOTE_NAME.to_owned()))
    }

    fn hosted_remote(
        &self,
        remote: Option<&str>,
        commitish: &str,
    ) -> Result<HostedRemote, BrowseError> {
        let name = remote
            .map(str::to_owned)
            .map_or_else(|| self.default_remote(commitish), Ok)?;
        let fetch_url = self
            .repository
            .fetch_url(&name)?
            .ok_or_else(|| BrowseError::RemoteNotFound {
                remote: name.clone(),
            })?;
        let service = HostingService::resolve(&fetch_url, self.aliases)?;
        tracing::debug!(remote = %name, %fetch_url, service = service.name(), "resolved remote");

        Ok(HostedRemote {
            name,
            fetch_url,
            service,
        })
    }
}
