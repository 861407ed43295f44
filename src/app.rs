use std::path::PathBuf;

use tracing::debug;

use crate::config::Config;
use crate::core::npmrc::RegistryAuth;
use crate::core::repo_root::find_repo_root;
use crate::error::Result;
use crate::npm::auth::resolve_token;
use crate::npm::{GhTokenSource, NpmClient, configure_npmrc};

/// Everything a command needs: resolved paths, config, output mode.
///
/// This is the only place that reads the process environment; the core
/// receives tokens, thresholds and directories as plain values.
pub struct AppContext {
    pub cwd: PathBuf,
    pub repo_root: Option<PathBuf>,
    pub config: Config,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let repo_root = find_repo_root(&cwd);
        debug!(cwd = %cwd.display(), repo_root = ?repo_root, "resolved working directories");
        let config = Config::load(cli.config.as_deref(), repo_root.as_deref())?;

        Ok(Self {
            cwd,
            repo_root,
            config,
            robot_mode: cli.robot,
        })
    }

    /// Print a human-readable line; silent in robot mode.
    pub fn say(&self, line: impl AsRef<str>) {
        if !self.robot_mode {
            println!("{}", line.as_ref());
        }
    }

    #[must_use]
    pub fn registry_auth(&self) -> RegistryAuth {
        self.config.registry.auth()
    }

    #[must_use]
    pub fn npm_client(&self) -> NpmClient {
        NpmClient::from_config(&self.config.npm).with_stdout_to_stderr(self.robot_mode)
    }

    /// Configured token first, then `gh auth token`.
    pub fn resolve_token(&self) -> Result<String> {
        let gh = GhTokenSource::with_binary(&self.config.npm.gh_bin);
        resolve_token(&[&self.config.registry.token, &gh])
    }

    /// Refresh the registry token in `~/.npmrc`.
    pub fn reauthenticate(&self) -> Result<PathBuf> {
        let token = self.resolve_token()?;
        let path = self.config.npmrc_path()?;
        configure_npmrc(&path, &self.registry_auth(), &token)?;
        Ok(path)
    }
}
