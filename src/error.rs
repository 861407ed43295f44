//! Error types for skill-deps.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DepsError>;

#[derive(Error, Debug)]
pub enum DepsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("package.json not found at {}", .0.display())]
    PackageJsonNotFound(PathBuf),

    #[error("Could not find repository root (no .git directory found)")]
    RepoRootNotFound,

    #[error("No GitHub token found. Set GITHUB_TOKEN or run 'gh auth login'")]
    NoToken,

    #[error("{program} failed: {message}")]
    CommandFailed { program: String, message: String },

    #[error("{failed} of {total} skill(s) failed")]
    BatchFailed { failed: usize, total: usize },
}

impl DepsError {
    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Config(_) => "config_error",
            Self::Serialization(_) => "serialization_error",
            Self::PackageJsonNotFound(_) => "package_json_not_found",
            Self::RepoRootNotFound => "repo_root_not_found",
            Self::NoToken => "no_token",
            Self::CommandFailed { .. } => "command_failed",
            Self::BatchFailed { .. } => "batch_failed",
        }
    }
}

impl From<serde_json::Error> for DepsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
