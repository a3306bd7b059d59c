//! Remote URL normalisation and containing-remote selection.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Name of the remote preferred when several remotes qualify.
pub const DEFAULT_REMOTE_NAME: &str = "origin";

/// SCP-like remote syntax: `user@host:path`, optionally ending in `.git`.
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^@/:]+)@([^:/]+):(.*?)(?:\.git)?$").expect("SCP_LIKE is a valid regex literal")
});

/// Absolute URL a remote fetches from, with SCP-like forms rewritten to
/// `ssh://user@host/path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchUrl {
    url: Url,
    host: String,
}

impl FetchUrl {
    /// Parses the URL reported by `git remote get-url`.
    ///
    /// `git@github.com:owner/repo.git` becomes
    /// `ssh://git@github.com/owner/repo`; anything else must already be an
    /// absolute URL with a host.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the URL cannot be parsed or
    /// has no host.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let normalised = SCP_LIKE.captures(trimmed).map_or_else(
            || trimmed.to_owned(),
            |caps| {
                let user = caps.get(1).map_or("", |m| m.as_str());
                let host = caps.get(2).map_or("", |m| m.as_str());
                let path = caps.get(3).map_or("", |m| m.as_str());
                format!("ssh://{user}@{host}/{path}")
            },
        );

        let url = Url::parse(&normalised).map_err(|error| error.to_string())?;
        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
            _ => return Err("URL has no host".to_owned()),
        };
        Ok(Self { url, host })
    }

    /// Returns the lowercased hostname.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the non-empty path segments of the URL.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|segment| !segment.is_empty())
    }

    /// Borrows the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for FetchUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Picks the remote whose branches contain a commit.
///
/// Each branch (`<remote>/<branch>`) belongs to the remote with the longest
/// name that prefixes it followed by `/`, so a remote called `fork/mine`
/// wins over `fork` for `fork/mine/feature`. Among the remotes that own at
/// least one branch, `origin` is preferred; otherwise the first remote in
/// `remotes` order is returned.
#[must_use]
pub fn select_containing_remote<'r>(remotes: &'r [String], branches: &[&str]) -> Option<&'r str> {
    let owners: Vec<&str> = branches
        .iter()
        .filter_map(|branch| owning_remote(remotes, branch))
        .collect();

    if owners.contains(&DEFAULT_REMOTE_NAME) {
        return remotes
            .iter()
            .map(String::as_str)
            .find(|remote| *remote == DEFAULT_REMOTE_NAME);
    }

    remotes
        .iter()
        .map(String::as_str)
        .find(|remote| owners.contains(remote))
}

fn owning_remote<'r>(remotes: &'r [String], branch: &str) -> Option<&'r str> {
    remotes
        .iter()
        .map(String::as_str)
        .filter(|remote| {
            branch
                .strip_prefix(remote)
                .is_some_and(|rest| rest.starts_with('/'))
        })
        .max_by_key(|remote| remote.len())
}
