//! The `https://<host>/<owner>/<repo>` root every service builds on.

use url::Url;

use super::error::HostingError;
use crate::local::FetchUrl;

/// Repository home URL derived from a fetch URL.
///
/// Only the first two path segments are used; a trailing `.git` on the
/// repository segment is dropped and any port is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RepositoryBase {
    url: Url,
}

impl RepositoryBase {
    pub(super) fn from_fetch_url(fetch_url: &FetchUrl) -> Result<Self, HostingError> {
        let invalid = |reason: &str| HostingError::InvalidFetchUrl {
            url: fetch_url.to_string(),
            reason: reason.to_owned(),
        };

        let mut segments = fetch_url.path_segments();
        let owner = segments.next().ok_or_else(|| invalid("missing owner"))?;
        let repo_segment = segments
            .next()
            .ok_or_else(|| invalid("missing repository"))?;
        let repo = repo_segment.strip_suffix(".git").unwrap_or(repo_segment);
        if repo.is_empty() {
            return Err(invalid("missing repository"));
        }

        let mut url = Url::parse(&format!("https://{}/", fetch_url.host()))
            .map_err(|error| invalid(&error.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("host cannot carry a path"))?
            .pop_if_empty()
            .push(owner)
            .push(repo);

        Ok(Self { url })
    }

    pub(super) fn home(&self) -> Url {
        self.url.clone()
    }

    /// Appends path components below the repository root.
    ///
    /// Each component is split on `/` so refs like `feature/x` and nested
    /// file paths stay readable; empty pieces are skipped.
    pub(super) fn join(&self, components: &[&str]) -> Url {
        let mut url = self.url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.extend(
                components
                    .iter()
                    .flat_map(|component| component.split('/'))
                    .filter(|piece| !piece.is_empty()),
            );
        }
        url
    }
}
