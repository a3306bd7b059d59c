//! Command-line arguments and the hostname alias file.
//!
//! # Command line
//!
//! ```text
//! git-browse [OPTIONS] [COMMITISH]
//! ```
//!
//! `COMMITISH` defaults to `HEAD`. The flags decide which page is opened;
//! see [`BrowseArgs::target`].
//!
//! # Alias file
//!
//! Self-hosted instances can borrow a known service's URL grammar through
//! `<config dir>/git-browse/aliases.json`, a JSON object mapping a hostname
//! to the canonical hostname whose grammar applies:
//!
//! ```json
//! { "git.example.com": "github.com" }
//! ```
//!
//! A missing or malformed file means "no aliases".

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use clap::Parser;

/// Location of the alias file below the user configuration directory.
pub const ALIASES_SUBPATH: &str = "git-browse/aliases.json";

/// Commitish used when none is given.
pub const DEFAULT_COMMITISH: &str = "HEAD";

/// Which page to open, derived from the command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseTarget {
    /// The repository home page.
    Home,
    /// The pull request that introduced the commit.
    PullRequest,
    /// The commit page.
    Commit {
        /// Pin the link to a full hash instead of a ref name.
        permalink: bool,
    },
    /// The file or directory page for `--path`.
    Object {
        /// Pin the link to a full hash instead of a ref name.
        permalink: bool,
    },
}

/// Command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "git-browse",
    version,
    about = "Open the hosting-service page for a commit, file, or pull request"
)]
pub struct BrowseArgs {
    /// Commit, branch, tag, or other revision to browse.
    #[arg(default_value = DEFAULT_COMMITISH)]
    pub commitish: String,

    /// Remote whose hosting service is used (default: the remote containing
    /// the commit, else `origin`).
    #[arg(long)]
    pub remote: Option<String>,

    /// File or directory to show, optionally suffixed with `:LINE` or
    /// `:START:END`.
    #[arg(long)]
    pub path: Option<String>,

    /// Open the repository home page.
    #[arg(long)]
    pub home: bool,

    /// Open the commit page.
    #[arg(long)]
    pub commit: bool,

    /// Open the pull request that introduced the commit.
    #[arg(long)]
    pub pr: bool,

    /// Link to the full commit hash instead of the ref name.
    #[arg(long)]
    pub permalink: bool,

    /// Print the URL instead of opening a browser.
    #[arg(short = 'n', long)]
    pub no_browser: bool,

    /// Run as if started in DIR.
    #[arg(short = 'C', value_name = "DIR")]
    pub directory: Option<Utf8PathBuf>,
}

impl BrowseArgs {
    /// Determines the page to open.
    ///
    /// `--home` wins over everything, then `--pr`; otherwise `--commit`
    /// selects the commit page and anything else the file or directory
    /// page, with `--permalink` carried along.
    #[must_use]
    pub const fn target(&self) -> BrowseTarget {
        if self.home {
            BrowseTarget::Home
        } else if self.pr {
            BrowseTarget::PullRequest
        } else if self.commit {
            BrowseTarget::Commit {
                permalink: self.permalink,
            }
        } else {
            BrowseTarget::Object {
                permalink: self.permalink,
            }
        }
    }

    /// Returns `--path`, defaulting to the current directory.
    #[must_use]
    pub fn path_or_default(&self) -> &str {
        self.path.as_deref().unwrap_or(".")
    }
}

/// Hostname substitutions applied before hosting-service lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap(HashMap<String, String>);

impl AliasMap {
    /// Loads the user's alias file, returning an empty map when there is no
    /// configuration directory or the file is missing or malformed.
    #[must_use]
    pub fn load() -> Self {
        default_aliases_path().map_or_else(Self::default, |path| Self::from_file(&path))
    }

    /// Loads aliases from `path` on a best-effort basis.
    #[must_use]
    pub fn from_file(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no alias file");
                return Self::default();
            }
            Err(error) => {
                tracing::debug!(
                    "ignoring unreadable alias file '{}': {error}",
                    path.display()
                );
                return Self::default();
            }
        };

        Self::from_json(&text).unwrap_or_else(|error| {
            tracing::debug!(
                "ignoring malformed alias file '{}': {error}",
                path.display()
            );
            Self::default()
        })
    }

    /// Parses a JSON object of string-to-string hostname mappings.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `text` is not such an object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    /// Returns the canonical hostname for `host`, or `host` itself.
    #[must_use]
    pub fn canonical_host<'a>(&'a self, host: &'a str) -> &'a str {
        self.0.get(host).map_or(host, String::as_str)
    }

    /// Number of configured aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no aliases are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        )
    }
}

/// Returns `<config dir>/git-browse/aliases.json` when the platform has a
/// configuration directory.
#[must_use]
pub fn default_aliases_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(ALIASES_SUBPATH))
}

#[cfg(test)]
mod tests;
