//! Read-only repository queries layered on a [`GitRunner`].
//!
//! Every query turns the failure that means "this does not exist" into
//! `Ok(None)` and surfaces any other git failure as an error. Only exit
//! codes are inspected; stderr text is never parsed.

use std::sync::LazyLock;

use regex::Regex;

use super::error::RepositoryError;
use super::remote::{FetchUrl, select_containing_remote};
use super::types::{CommitSha, ObjectKind};
use crate::process::{ExecuteError, GitRunner};

/// Exit code of `git rev-parse` for unknown or malformed revisions.
const REV_PARSE_NOT_FOUND: &[i32] = &[128];

/// Exit code of `git branch --contains` for a malformed object name.
const BRANCH_CONTAINS_NOT_FOUND: &[i32] = &[129];

/// Exit code of `git remote get-url` for a missing remote.
const REMOTE_NOT_FOUND: &[i32] = &[2];

/// Prints each matching branch by its full ref name.
const REFNAME_FORMAT: &str = "--format=%(refname)";

/// Prefix of fully qualified remote-tracking branch names.
const REMOTE_REFS_PREFIX: &str = "refs/remotes/";

/// Separator placed after each commit message in multi-commit log output.
const RECORD_SEPARATOR: char = '\u{1e}';

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static HEAD_BRANCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"HEAD branch: (.*)").expect("HEAD_BRANCH is a valid regex literal")
});

/// Queries against one working directory.
#[derive(Clone, Copy)]
pub struct Repository<'r> {
    runner: &'r dyn GitRunner,
}

impl<'r> Repository<'r> {
    /// Wraps a runner.
    #[must_use]
    pub const fn new(runner: &'r dyn GitRunner) -> Self {
        Self { runner }
    }

    fn git(&self, args: &[&str]) -> Result<String, ExecuteError> {
        let owned: Vec<String> = args.iter().map(|arg| (*arg).to_owned()).collect();
        self.runner.execute(&owned)
    }

    /// Like [`Self::git`] but maps the listed exit codes to `None`.
    fn git_unless(&self, args: &[&str], absent: &[i32]) -> Result<Option<String>, RepositoryError> {
        match self.git(args) {
            Ok(stdout) => Ok(Some(stdout)),
            Err(error) if error.has_code(absent) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Resolves `commitish` to the full hash of the commit it names.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails for any reason
    /// other than an unknown revision.
    pub fn resolve_full_hash(&self, commitish: &str) -> Result<Option<CommitSha>, RepositoryError> {
        let revision = format!("{commitish}^{{commit}}");
        let stdout = self.git_unless(&["rev-parse", "--verify", &revision], REV_PARSE_NOT_FOUND)?;
        Ok(stdout
            .map(|out| out.trim().to_owned())
            .filter(|sha| !sha.is_empty())
            .map(CommitSha::new))
    }

    /// Resolves `commitish` to its abbreviated ref name (e.g. `HEAD` to the
    /// current branch). Falls back to `commitish` itself when git prints
    /// nothing, so a found result is never empty.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails for any reason
    /// other than an unknown revision.
    pub fn resolve_abbrev_ref(
        &self,
        commitish: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let stdout = self.git_unless(
            &["rev-parse", "--abbrev-ref", commitish],
            REV_PARSE_NOT_FOUND,
        )?;
        Ok(stdout.map(|out| {
            let trimmed = out.trim();
            if trimmed.is_empty() {
                commitish.to_owned()
            } else {
                trimmed.to_owned()
            }
        }))
    }

    /// Lists configured remotes in git's order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails.
    pub fn remotes(&self) -> Result<Vec<String>, RepositoryError> {
        let stdout = self.git(&["remote"])?;
        Ok(non_empty_lines(&stdout).map(str::to_owned).collect())
    }

    /// Finds the remote with a branch containing `commitish`.
    ///
    /// See [`select_containing_remote`] for the selection rules.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails for any reason
    /// other than a malformed object name.
    pub fn find_containing_remote(
        &self,
        commitish: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let remotes = self.remotes()?;
        let Some(stdout) = self.git_unless(
            &["branch", "-r", "--contains", commitish, REFNAME_FORMAT],
            BRANCH_CONTAINS_NOT_FOUND,
        )?
        else {
            return Ok(None);
        };

        let branches: Vec<&str> = non_empty_lines(&stdout)
            .map(|line| line.strip_prefix(REMOTE_REFS_PREFIX).unwrap_or(line))
            .collect();
        let selected = select_containing_remote(&remotes, &branches).map(str::to_owned);
        tracing::debug!(commitish, ?selected, "containing remote");
        Ok(selected)
    }

    /// Returns the normalised fetch URL of `remote`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidFetchUrl`] when git reports a URL
    /// that cannot be parsed, or [`RepositoryError::Execute`] when git fails
    /// for any reason other than a missing remote.
    pub fn fetch_url(&self, remote: &str) -> Result<Option<FetchUrl>, RepositoryError> {
        let Some(stdout) = self.git_unless(&["remote", "get-url", remote], REMOTE_NOT_FOUND)? else {
            return Ok(None);
        };
        let Some(raw) = non_empty_lines(&stdout).next() else {
            return Ok(None);
        };

        FetchUrl::parse(raw)
            .map(Some)
            .map_err(|reason| RepositoryError::InvalidFetchUrl {
                remote: remote.to_owned(),
                url: raw.to_owned(),
                reason,
            })
    }

    /// Returns the branch `remote` reports as its HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when `git remote show` fails.
    pub fn default_branch(&self, remote: &str) -> Result<Option<String>, RepositoryError> {
        let stdout = self.git(&["remote", "show", remote])?;
        Ok(HEAD_BRANCH
            .captures(&stdout)
            .and_then(|caps| caps.get(1))
            .map(|branch| branch.as_str().trim())
            .filter(|branch| !branch.is_empty() && *branch != "(unknown)")
            .map(str::to_owned))
    }

    /// Returns the full message of a single commit.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails.
    pub fn commit_message(&self, sha: &CommitSha) -> Result<String, RepositoryError> {
        Ok(self.git(&["log", "-1", "--format=%B", sha.as_str()])?)
    }

    /// Returns the message of the oldest merge commit on the ancestry path
    /// from `sha` to `upstream`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails.
    pub fn first_merge_message(
        &self,
        sha: &CommitSha,
        upstream: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let range = format!("{sha}..{upstream}");
        let stdout = self.git(&[
            "log",
            "--merges",
            "--reverse",
            "--ancestry-path",
            "--format=%B%x1e",
            &range,
        ])?;
        Ok(stdout
            .split(RECORD_SEPARATOR)
            .map(str::trim)
            .find(|record| !record.is_empty())
            .map(str::to_owned))
    }

    /// Returns the working directory's path relative to the repository
    /// root, with a trailing `/` unless it is the root itself.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails.
    pub fn show_prefix(&self) -> Result<String, RepositoryError> {
        let stdout = self.git(&["rev-parse", "--show-prefix"])?;
        Ok(stdout.trim().to_owned())
    }

    /// Classifies the root-relative `path` at `commitish`.
    ///
    /// Only an entry whose listed path equals `path` exactly counts; the
    /// parent trees `ls-tree -t` prints along the way are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Execute`] when git fails.
    pub fn object_kind(
        &self,
        commitish: &str,
        path: &str,
    ) -> Result<Option<ObjectKind>, RepositoryError> {
        let stdout = self.git(&[
            "ls-tree",
            "-z",
            "-t",
            "--full-tree",
            commitish,
            "--",
            path,
        ])?;
        Ok(stdout.split('\0').find_map(|entry| {
            let (meta, name) = entry.split_once('\t')?;
            if name != path {
                return None;
            }
            meta.split(' ').nth(1).and_then(ObjectKind::from_ls_tree)
        }))
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
