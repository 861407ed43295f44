//! Registry credentials: token lookup and `~/.npmrc` configuration.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::core::npmrc::RegistryAuth;
use crate::error::{DepsError, Result};
use crate::utils::fs::{read_optional, write_text};

/// A source of registry tokens.
pub trait TokenSource {
    /// The token, or `None` when this source has nothing to offer.
    fn token(&self) -> Option<String>;
}

/// Token from `gh auth token`.
pub struct GhTokenSource {
    gh_bin: PathBuf,
}

impl GhTokenSource {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            gh_bin: binary.into(),
        }
    }
}

impl Default for GhTokenSource {
    fn default() -> Self {
        Self::with_binary("gh")
    }
}

impl TokenSource for GhTokenSource {
    fn token(&self) -> Option<String> {
        let output = Command::new(&self.gh_bin)
            .args(["auth", "token"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();
        match output {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
                (!token.is_empty()).then_some(token)
            }
            Ok(output) => {
                debug!(status = %output.status, "gh auth token returned no token");
                None
            }
            Err(err) => {
                debug!(error = %err, "gh not available");
                None
            }
        }
    }
}

/// A fixed token, typically from `GITHUB_TOKEN`.
impl TokenSource for Option<String> {
    fn token(&self) -> Option<String> {
        self.clone().filter(|token| !token.trim().is_empty())
    }
}

/// First token offered by `sources`, in order.
pub fn resolve_token(sources: &[&dyn TokenSource]) -> Result<String> {
    sources
        .iter()
        .find_map(|source| source.token())
        .ok_or(DepsError::NoToken)
}

/// Write the registry declaration and token into the `.npmrc` at `path`.
///
/// Other lines in the file are kept as they are.
pub fn configure_npmrc(path: &Path, auth: &RegistryAuth, token: &str) -> Result<()> {
    let existing = read_optional(path)?.unwrap_or_default();
    let updated = auth.apply(&existing, token);
    if updated == existing {
        debug!(path = %path.display(), "npmrc already up to date");
        return Ok(());
    }
    write_text(path, &updated)?;
    info!(path = %path.display(), registry = %auth.host_path(), "npm auth configured");
    Ok(())
}
