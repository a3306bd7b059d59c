//! GitHub URL grammar.
//!
//! ```text
//! https://github.com/acme/widget/commit/v1.0.0
//! https://github.com/acme/widget/tree/main/src
//! https://github.com/acme/widget/blob/main/README.md?plain=1#L10-L20
//! https://github.com/acme/widget/pull/42
//! ```

use url::Url;

use super::base::RepositoryBase;
use super::types::{LineRange, PullRequestNumber};

pub(super) fn commit_url(base: &RepositoryBase, commitish: &str) -> Url {
    base.join(&["commit", commitish])
}

pub(super) fn tree_url(base: &RepositoryBase, commitish: &str, path: &str) -> Url {
    base.join(&["tree", commitish, path])
}

/// Without `?plain=1` GitHub renders Markdown and similar files, which
/// disables line anchors.
pub(super) fn blob_url(
    base: &RepositoryBase,
    commitish: &str,
    path: &str,
    range: Option<LineRange>,
) -> Url {
    let mut url = base.join(&["blob", commitish, path]);
    if let Some(selection) = range {
        url.set_query(Some("plain=1"));
        url.set_fragment(Some(&match selection {
            LineRange::Line(line) => format!("L{line}"),
            LineRange::Span { start, end } => format!("L{start}-L{end}"),
        }));
    }
    url
}

pub(super) fn pull_request_url(base: &RepositoryBase, number: PullRequestNumber) -> Url {
    base.join(&["pull", &number.to_string()])
}
