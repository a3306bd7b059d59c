//! GitLab URL grammar.
//!
//! GitLab pages live below a `/-/` separator and commit pages need a full
//! hash. Merge commits carry `See merge request group/project!<n>` in
//! their message body.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::base::RepositoryBase;
use super::types::{LineRange, PullRequestNumber};

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static MERGE_REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"See merge request (?:.*)!(\d+)").expect("MERGE_REQUEST is a valid regex literal")
});

pub(super) fn commit_url(base: &RepositoryBase, sha: &str) -> Url {
    base.join(&["-", "commit", sha])
}

pub(super) fn tree_url(base: &RepositoryBase, commitish: &str, path: &str) -> Url {
    base.join(&["-", "tree", commitish, path])
}

pub(super) fn blob_url(
    base: &RepositoryBase,
    commitish: &str,
    path: &str,
    range: Option<LineRange>,
) -> Url {
    let mut url = base.join(&["-", "blob", commitish, path]);
    if let Some(selection) = range {
        url.set_query(Some("plain=1"));
        url.set_fragment(Some(&match selection {
            LineRange::Line(line) => format!("L{line}"),
            LineRange::Span { start, end } => format!("L{start}-{end}"),
        }));
    }
    url
}

pub(super) fn pull_request_url(base: &RepositoryBase, number: PullRequestNumber) -> Url {
    base.join(&["-", "merge_requests", &number.to_string()])
}

pub(super) fn extract_pull_request_id(message: &str) -> Option<PullRequestNumber> {
    MERGE_REQUEST
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .map(PullRequestNumber::new)
}
