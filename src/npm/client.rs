//! npm CLI client.
//!
//! Runs `npm install` / `npm update` inside a skill package directory. Stderr
//! is captured so failures can be classified, then echoed so the user still
//! sees it.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::NpmConfig;
use crate::error::{DepsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpmAction {
    Install,
    Update,
}

impl NpmAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for NpmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can install or update dependencies in a package directory.
pub trait PackageManager {
    fn run(&self, action: NpmAction, dir: &Path) -> Result<()>;
}

/// Client for the npm binary.
pub struct NpmClient {
    /// Path to npm binary (default: "npm")
    npm_bin: PathBuf,

    /// Send npm's stdout to our stderr, keeping stdout clean for JSON.
    stdout_to_stderr: bool,
}

impl NpmClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            npm_bin: PathBuf::from("npm"),
            stdout_to_stderr: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &NpmConfig) -> Self {
        Self::with_binary(&config.bin)
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            npm_bin: binary.into(),
            stdout_to_stderr: false,
        }
    }

    #[must_use]
    pub const fn with_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    /// Resolved location of the npm binary, if it can be found.
    #[must_use]
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.npm_bin).ok()
    }
}

impl Default for NpmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for NpmClient {
    fn run(&self, action: NpmAction, dir: &Path) -> Result<()> {
        let program = format!("{} {action}", self.npm_bin.display());
        info!(dir = %dir.display(), command = %program, "running package manager");

        let stdout = if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        };
        let output = Command::new(&self.npm_bin)
            .arg(action.as_str())
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .map_err(|err| DepsError::CommandFailed {
                program: program.clone(),
                message: format!("failed to execute {}: {err}", self.npm_bin.display()),
            })?;

        if !output.stderr.is_empty() {
            let _ = std::io::stderr().write_all(&output.stderr);
        }

        if output.status.success() {
            debug!(command = %program, "package manager finished");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            output.status.to_string()
        } else {
            stderr.trim().to_string()
        };
        Err(DepsError::CommandFailed { program, message })
    }
}
