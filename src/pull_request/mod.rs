//! Finding the pull request that introduced a commit.
//!
//! A regular merge leaves a merge commit on the default branch whose message
//! names the pull request, while squash and fast-forward merges do not. The
//! resolver therefore checks the commit's own message first (it may be the
//! merge commit) and only then scans the ancestry path towards the remote's
//! default branch for the oldest merge commit.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::BrowseError;
use crate::hosting::{HostingService, PullRequestExtractor, PullRequestNumber};
use crate::local::Repository;

/// Branch assumed when the remote does not report its HEAD branch.
pub const FALLBACK_DEFAULT_BRANCH: &str = "main";

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static MERGE_PULL_REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Merge pull request #(\d+)").expect("MERGE_PULL_REQUEST is a valid regex literal")
});

/// Extracts `<n>` from GitHub's `Merge pull request #<n> from ...` message.
///
/// Used for services without their own extraction rule.
#[must_use]
pub fn extract_merge_pull_request(message: &str) -> Option<PullRequestNumber> {
    MERGE_PULL_REQUEST
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .map(PullRequestNumber::new)
}

/// Resolves commits to pull request numbers for one hosting service.
#[derive(Clone, Copy)]
pub struct PullRequestResolver<'r> {
    repository: Repository<'r>,
    extract: PullRequestExtractor,
}

impl<'r> PullRequestResolver<'r> {
    /// Creates a resolver using `service`'s extraction rule, or the GitHub
    /// merge message rule when it has none.
    #[must_use]
    pub fn new(repository: Repository<'r>, service: HostingService) -> Self {
        Self {
            repository,
            extract: service
                .pull_request_extractor()
                .unwrap_or(extract_merge_pull_request),
        }
    }

    /// Finds the pull request that introduced `commitish` into `remote`'s
    /// default branch.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::CommitNotFound`] when `commitish` does not
    /// resolve, or [`BrowseError::Repository`] when git fails.
    pub fn find_pull_request_for(
        &self,
        commitish: &str,
        remote: &str,
    ) -> Result<Option<PullRequestNumber>, BrowseError> {
        let branch = self
            .repository
            .default_branch(remote)?
            .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_owned());
        let sha = self
            .repository
            .resolve_full_hash(commitish)?
            .ok_or_else(|| BrowseError::CommitNotFound {
                commitish: commitish.to_owned(),
            })?;

        let message = self.repository.commit_message(&sha)?;
        if let Some(number) = (self.extract)(&message) {
            tracing::debug!(%sha, %number, "commit is itself a merge of a pull request");
            return Ok(Some(number));
        }

        let upstream = format!("{remote}/{branch}");
        let merge = self.repository.first_merge_message(&sha, &upstream)?;
        let number = merge.as_deref().and_then(self.extract);
        tracing::debug!(%sha, %upstream, ?number, "scanned ancestry path for merges");
        Ok(number)
    }
}
