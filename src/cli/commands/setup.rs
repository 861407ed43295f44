//! skill-deps setup - Configure npm auth and repo-level files

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, ok_line, robot_ok};
use crate::core::{env_file, gitignore};
use crate::error::{DepsError, Result};
use crate::skills::auth_status;
use crate::utils::fs::{read_optional, write_text};

#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Only configure ~/.npmrc, leave .gitignore and .env alone
    #[arg(long)]
    pub auth_only: bool,
}

#[derive(Debug, Serialize)]
struct SetupReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    repo_root: Option<PathBuf>,
    gitignore_added: Vec<String>,
    env_updated: bool,
    npmrc: PathBuf,
    auth_refreshed: bool,
}

pub fn run(ctx: &AppContext, args: &SetupArgs) -> Result<()> {
    let mut report = SetupReport {
        repo_root: ctx.repo_root.clone(),
        gitignore_added: Vec::new(),
        env_updated: false,
        npmrc: PathBuf::new(),
        auth_refreshed: false,
    };

    if let (Some(root), false) = (ctx.repo_root.as_deref(), args.auth_only) {
        report.gitignore_added = ensure_gitignore(root, &ctx.config.gitignore.patterns)?;
        if report.gitignore_added.is_empty() {
            ctx.say(ok_line(".gitignore OK"));
        } else {
            ctx.say(ok_line(&format!(
                "Added to .gitignore: {}",
                report.gitignore_added.join(", ")
            )));
        }

        report.env_updated = ensure_env_file(root)?;
        ctx.say(ok_line(if report.env_updated {
            "Skill config written to .env"
        } else {
            ".env already has skill config"
        }));
    }

    report.npmrc = ctx.config.npmrc_path()?;
    match ctx.reauthenticate() {
        Ok(_) => {
            report.auth_refreshed = true;
            ctx.say(ok_line(&format!(
                "npm auth configured in {}",
                report.npmrc.display()
            )));
        }
        // Without a token an existing registry setup is left as it is.
        Err(DepsError::NoToken) if auth_status(&report.npmrc, &ctx.registry_auth()).configured => {
            info!(path = %report.npmrc.display(), "no token found, keeping existing npm auth");
            ctx.say(ok_line("npm auth already configured"));
        }
        Err(err) => return Err(err),
    }

    if ctx.robot_mode {
        return emit_robot(&robot_ok(report));
    }
    Ok(())
}

/// Append missing patterns to `<root>/.gitignore`; returns what was added.
fn ensure_gitignore(root: &Path, patterns: &[String]) -> Result<Vec<String>> {
    let path = root.join(".gitignore");
    let existing = read_optional(&path)?.unwrap_or_default();
    let added: Vec<String> = gitignore::missing(&existing, patterns)
        .into_iter()
        .map(str::to_string)
        .collect();
    if !added.is_empty() {
        write_text(&path, &gitignore::merge(&existing, patterns))?;
        info!(path = %path.display(), added = ?added, "updated .gitignore");
    }
    Ok(added)
}

/// Make sure `<root>/.env` carries the update-check section.
fn ensure_env_file(root: &Path) -> Result<bool> {
    let path = root.join(".env");
    let existing = read_optional(&path)?.unwrap_or_default();
    let Some(updated) = env_file::merge(&existing) else {
        return Ok(false);
    };
    write_text(&path, &updated)?;
    info!(path = %path.display(), "wrote skill config to .env");
    Ok(true)
}
