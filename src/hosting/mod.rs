//! Hosting services and the registry that picks one for a fetch URL.
//!
//! Each supported provider is a variant of [`HostingService`]. The registry
//! maps a fetch URL's hostname, after alias substitution, to a lookup key
//! such as `github_com` and from there to a variant. Rendering is pure string
//! templating over the fetch URL; nothing here talks to the network.
//!
//! Some capabilities are optional. [`HostingService::supports_pull_requests`]
//! and [`HostingService::pull_request_extractor`] report whether a provider
//! has them, and callers branch on that before asking.
//!
//! # Example
//!
//! ```
//! use git_browse::config::AliasMap;
//! use git_browse::hosting::HostingService;
//! use git_browse::local::FetchUrl;
//!
//! let fetch_url = FetchUrl::parse("git@github.com:acme/widget.git").expect("valid URL");
//! let service = HostingService::resolve(&fetch_url, &AliasMap::default()).expect("known host");
//! let home = service.home_url(&fetch_url).expect("owner and repository present");
//! assert_eq!(home.as_str(), "https://github.com/acme/widget");
//! ```

mod base;
mod bitbucket;
mod error;
mod github;
mod gitlab;
mod types;

use url::Url;

use base::RepositoryBase;
pub use error::HostingError;
pub use types::{LineRange, PullRequestNumber};

use crate::config::AliasMap;
use crate::local::FetchUrl;

/// Extracts a pull request number from a commit message.
pub type PullRequestExtractor = fn(&str) -> Option<PullRequestNumber>;

/// A supported hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostingService {
    /// `github.com` and GitHub-compatible hosts.
    GitHub,
    /// `gitlab.com` and GitLab-compatible hosts.
    GitLab,
    /// `bitbucket.org`.
    Bitbucket,
}

impl HostingService {
    /// Every supported service, in registry order.
    pub const ALL: [Self; 3] = [Self::GitHub, Self::GitLab, Self::Bitbucket];

    /// Picks the service for `fetch_url`, applying `aliases` to its host.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::UnsupportedHostingService`] naming the
    /// hostname and derived key when no service matches.
    pub fn resolve(fetch_url: &FetchUrl, aliases: &AliasMap) -> Result<Self, HostingError> {
        let hostname = aliases.canonical_host(fetch_url.host());
        let key = lookup_key(hostname);
        let service = Self::from_lookup_key(&key).ok_or_else(|| {
            HostingError::UnsupportedHostingService {
                hostname: hostname.to_owned(),
                key: key.clone(),
            }
        })?;
        tracing::debug!(host = fetch_url.host(), %key, ?service, "hosting service");
        Ok(service)
    }

    /// Looks up a service by its sanitised hostname key.
    #[must_use]
    pub fn from_lookup_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|service| service.lookup_key() == key)
    }

    /// Returns the registry key, e.g. `github_com`.
    #[must_use]
    pub const fn lookup_key(self) -> &'static str {
        match self {
            Self::GitHub => "github_com",
            Self::GitLab => "gitlab_com",
            Self::Bitbucket => "bitbucket_org",
        }
    }

    /// Returns the canonical hostname, used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
            Self::Bitbucket => "bitbucket.org",
        }
    }

    /// Returns the repository home page.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::InvalidFetchUrl`] when the fetch URL lacks an
    /// owner or repository segment.
    pub fn home_url(self, fetch_url: &FetchUrl) -> Result<Url, HostingError> {
        Ok(RepositoryBase::from_fetch_url(fetch_url)?.home())
    }

    /// Whether commit pages need a full hash rather than any commitish.
    #[must_use]
    pub const fn commit_needs_full_hash(self) -> bool {
        match self {
            Self::GitHub => false,
            Self::GitLab | Self::Bitbucket => true,
        }
    }

    /// Returns the page of a single commit.
    ///
    /// Callers should pass a full hash when
    /// [`Self::commit_needs_full_hash`] is true.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::InvalidFetchUrl`] when the fetch URL lacks an
    /// owner or repository segment.
    pub fn commit_url(self, fetch_url: &FetchUrl, commit: &str) -> Result<Url, HostingError> {
        let base = RepositoryBase::from_fetch_url(fetch_url)?;
        Ok(match self {
            Self::GitHub => github::commit_url(&base, commit),
            Self::GitLab => gitlab::commit_url(&base, commit),
            Self::Bitbucket => bitbucket::commit_url(&base, commit),
        })
    }

    /// Returns the page listing a directory at `commitish`.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::InvalidFetchUrl`] when the fetch URL lacks an
    /// owner or repository segment.
    pub fn tree_url(
        self,
        fetch_url: &FetchUrl,
        commitish: &str,
        path: &str,
    ) -> Result<Url, HostingError> {
        let base = RepositoryBase::from_fetch_url(fetch_url)?;
        Ok(match self {
            Self::GitHub => github::tree_url(&base, commitish, path),
            Self::GitLab => gitlab::tree_url(&base, commitish, path),
            Self::Bitbucket => bitbucket::tree_url(&base, commitish, path),
        })
    }

    /// Returns the page showing a file at `commitish`, optionally with a
    /// line selection.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::InvalidFetchUrl`] when the fetch URL lacks an
    /// owner or repository segment.
    pub fn blob_url(
        self,
        fetch_url: &FetchUrl,
        commitish: &str,
        path: &str,
        range: Option<LineRange>,
    ) -> Result<Url, HostingError> {
        let base = RepositoryBase::from_fetch_url(fetch_url)?;
        Ok(match self {
            Self::GitHub => github::blob_url(&base, commitish, path, range),
            Self::GitLab => gitlab::blob_url(&base, commitish, path, range),
            Self::Bitbucket => bitbucket::blob_url(&base, commitish, path, range),
        })
    }

    /// Whether the service has pull request pages.
    #[must_use]
    pub const fn supports_pull_requests(self) -> bool {
        match self {
            Self::GitHub | Self::GitLab => true,
            Self::Bitbucket => false,
        }
    }

    /// Returns the pull (or merge) request page.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::UnsupportedCapability`] for services without
    /// pull request pages, or [`HostingError::InvalidFetchUrl`] when the
    /// fetch URL lacks an owner or repository segment.
    pub fn pull_request_url(
        self,
        fetch_url: &FetchUrl,
        number: PullRequestNumber,
    ) -> Result<Url, HostingError> {
        self.require_pull_requests()?;
        let base = RepositoryBase::from_fetch_url(fetch_url)?;
        match self {
            Self::GitHub => Ok(github::pull_request_url(&base, number)),
            Self::GitLab => Ok(gitlab::pull_request_url(&base, number)),
            Self::Bitbucket => Err(self.unsupported("pull request URLs")),
        }
    }

    /// Fails unless [`Self::supports_pull_requests`] holds.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::UnsupportedCapability`] naming the service.
    pub const fn require_pull_requests(self) -> Result<(), HostingError> {
        if self.supports_pull_requests() {
            Ok(())
        } else {
            Err(self.unsupported("pull request URLs"))
        }
    }

    const fn unsupported(self, capability: &'static str) -> HostingError {
        HostingError::UnsupportedCapability {
            service: self.name(),
            capability,
        }
    }

    /// Returns the service's own rule for finding a pull request number in a
    /// commit message, if it has one.
    #[must_use]
    pub const fn pull_request_extractor(self) -> Option<PullRequestExtractor> {
        match self {
            Self::GitLab => Some(gitlab::extract_pull_request_id),
            Self::GitHub | Self::Bitbucket => None,
        }
    }
}

/// Turns a hostname into a registry key by replacing every character outside
/// `[A-Za-z0-9_]` with `_`.
#[must_use]
pub fn lookup_key(hostname: &str) -> String {
    hostname
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
