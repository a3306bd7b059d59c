//! The `path[:line[:end]]` argument grammar and root-relative paths.

use std::sync::LazyLock;

use camino::{Utf8Component, Utf8Path};
use regex::Regex;

use crate::hosting::LineRange;

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static PATH_WITH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?):(\d+)(?::(\d+))?$").expect("PATH_WITH_RANGE is a valid regex literal")
});

/// Splits an optional `:LINE` or `:START:END` suffix off `input`.
///
/// Input without a suffix, or whose line numbers do not fit in a `u32`, is
/// returned unchanged with no range.
///
/// ```
/// use git_browse::browse::parse_path_with_range;
/// use git_browse::hosting::LineRange;
///
/// assert_eq!(
///     parse_path_with_range("foo/bar.ts:5:9"),
///     ("foo/bar.ts", Some(LineRange::Span { start: 5, end: 9 }))
/// );
/// assert_eq!(parse_path_with_range("foo/bar.ts"), ("foo/bar.ts", None));
/// ```
#[must_use]
pub fn parse_path_with_range(input: &str) -> (&str, Option<LineRange>) {
    let Some(caps) = PATH_WITH_RANGE.captures(input) else {
        return (input, None);
    };
    let (Some(path), Some(start_digits)) = (caps.get(1), caps.get(2)) else {
        return (input, None);
    };
    let Ok(start) = start_digits.as_str().parse::<u32>() else {
        return (input, None);
    };

    let range = match caps.get(3).map(|end| end.as_str().parse::<u32>()) {
        None => LineRange::Line(start),
        Some(Ok(end)) => LineRange::Span { start, end },
        Some(Err(_)) => return (input, None),
    };
    (path.as_str(), Some(range))
}

/// Joins `path` onto the working directory's `prefix` and normalises the
/// result to a `/`-separated path from the repository root.
///
/// `.` components are dropped and `..` removes the preceding component.
/// The repository root itself is the empty string.
#[must_use]
pub fn root_relative(prefix: &str, path: &str) -> String {
    let joined = Utf8Path::new(prefix).join(path);
    let mut parts: Vec<&str> = Vec::new();
    for component in joined.components() {
        match component {
            Utf8Component::Normal(part) => parts.push(part),
            Utf8Component::ParentDir => {
                parts.pop();
            }
            Utf8Component::CurDir | Utf8Component::RootDir | Utf8Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}
