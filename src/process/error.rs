//! Error types for git process execution.

use thiserror::Error;

/// Errors raised while running the git binary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteError {
    /// Git exited with a non-zero status.
    #[error("[{code}]: {}", stderr.trim_end())]
    NonZeroExit {
        /// Arguments passed after the fixed safety flags.
        args: Vec<String>,
        /// Exit status reported by git.
        code: i32,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// Git was terminated by a signal before reporting an exit status.
    #[error("git {} was terminated: {}", args.join(" "), stderr.trim_end())]
    Terminated {
        /// Arguments passed after the fixed safety flags.
        args: Vec<String>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The git binary could not be started.
    #[error("failed to run git: {message}")]
    Spawn {
        /// Error detail from the operating system.
        message: String,
    },

    /// Git produced output that is not valid UTF-8.
    #[error("git {} produced non UTF-8 output", args.join(" "))]
    InvalidOutput {
        /// Arguments passed after the fixed safety flags.
        args: Vec<String>,
    },
}

impl ExecuteError {
    /// Returns the exit code when git exited normally with a failure status.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            Self::Terminated { .. } | Self::Spawn { .. } | Self::InvalidOutput { .. } => None,
        }
    }

    /// Returns true when git exited with one of the given codes.
    #[must_use]
    pub fn has_code(&self, codes: &[i32]) -> bool {
        self.code().is_some_and(|code| codes.contains(&code))
    }
}
