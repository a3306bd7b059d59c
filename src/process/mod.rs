//! Execution of the git binary.
//!
//! All repository queries go through the [`GitRunner`] trait so that tests
//! can script git's output without touching a real repository. The default
//! implementation, [`GitCommand`], runs `git` with a fixed set of safety
//! flags and captures its output.

mod error;

use std::process::{Command, Stdio};

use camino::Utf8PathBuf;

pub use error::ExecuteError;

/// Flags prepended to every git invocation.
///
/// `--literal-pathspecs` disables globbing and pathspec magic, and
/// `--no-optional-locks` keeps read-only queries from taking the index lock.
pub const SAFETY_FLAGS: [&str; 3] = ["--no-pager", "--literal-pathspecs", "--no-optional-locks"];

/// Runs git subcommands and returns their standard output.
#[cfg_attr(test, mockall::automock)]
pub trait GitRunner {
    /// Runs `git <SAFETY_FLAGS> <args>` and returns captured stdout.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::NonZeroExit`] when git fails, carrying the exit
    /// code and captured output, or another variant when git could not be
    /// run at all.
    fn execute(&self, args: &[String]) -> Result<String, ExecuteError>;
}

/// [`GitRunner`] backed by the `git` binary on `PATH`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitCommand {
    working_dir: Option<Utf8PathBuf>,
}

impl GitCommand {
    /// Creates a runner operating in the process working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { working_dir: None }
    }

    /// Creates a runner operating in `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }
}

impl GitRunner for GitCommand {
    fn execute(&self, args: &[String]) -> Result<String, ExecuteError> {
        tracing::debug!(?args, "running git");

        let mut command = Command::new("git");
        command
            .args(SAFETY_FLAGS)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|error| ExecuteError::Spawn {
            message: error.to_string(),
        })?;

        let stdout = String::from_utf8(output.stdout).map_err(|_| ExecuteError::InvalidOutput {
            args: args.to_vec(),
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            return Ok(stdout);
        }

        match output.status.code() {
            Some(code) => {
                tracing::debug!(?args, code, "git exited with failure");
                Err(ExecuteError::NonZeroExit {
                    args: args.to_vec(),
                    code,
                    stdout,
                    stderr,
                })
            }
            None => Err(ExecuteError::Terminated {
                args: args.to_vec(),
                stdout,
                stderr,
            }),
        }
    }
}
