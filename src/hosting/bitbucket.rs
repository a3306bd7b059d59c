//! Bitbucket URL grammar.
//!
//! Bitbucket serves both directories and files under `src/` and always
//! renders Markdown, so a line selection in a `.md` file switches to the
//! `annotate/` view which shows raw lines.

use camino::Utf8Path;
use url::Url;

use super::base::RepositoryBase;
use super::types::LineRange;

pub(super) fn commit_url(base: &RepositoryBase, sha: &str) -> Url {
    base.join(&["commits", sha])
}

pub(super) fn tree_url(base: &RepositoryBase, commitish: &str, path: &str) -> Url {
    base.join(&["src", commitish, path])
}

pub(super) fn blob_url(
    base: &RepositoryBase,
    commitish: &str,
    path: &str,
    range: Option<LineRange>,
) -> Url {
    let Some(selection) = range else {
        return base.join(&["src", commitish, path]);
    };

    let view = if Utf8Path::new(path).extension() == Some("md") {
        "annotate"
    } else {
        "src"
    };
    let mut url = base.join(&[view, commitish, path]);
    url.set_fragment(Some(&match selection {
        LineRange::Line(line) => format!("lines-{line}"),
        LineRange::Span { start, end } => format!("lines-{start}:{end}"),
    }));
    url
}
