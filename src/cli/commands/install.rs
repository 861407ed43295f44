//! skill-deps install - Install dependencies for one skill

use std::path::{Path, PathBuf};

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, ok_line, robot_ok};
use crate::error::Result;
use crate::npm::NpmAction;
use crate::skills::{Installer, resolve_manifest};

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Path to the skill's package.json
    #[arg(long, value_name = "PATH")]
    pub npm: PathBuf,
}

pub fn run(ctx: &AppContext, args: &InstallArgs) -> Result<()> {
    run_single(ctx, NpmAction::Install, &args.npm)
}

/// Shared body of `install` and `update`.
pub(crate) fn run_single(ctx: &AppContext, action: NpmAction, manifest: &Path) -> Result<()> {
    let (_, dir) = resolve_manifest(manifest)?;
    let verb = match action {
        NpmAction::Install => "Installing",
        NpmAction::Update => "Updating",
    };
    ctx.say(format!("{verb} dependencies in {}...", dir.display()));

    let client = ctx.npm_client();
    let installer = Installer::new(&client).with_reauth(|| ctx.reauthenticate().map(|_| ()));
    let report = match action {
        NpmAction::Install => installer.install(manifest)?,
        NpmAction::Update => installer.update(manifest)?,
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok(report));
    }
    if report.reauthenticated {
        ctx.say(ok_line("Re-authenticated with registry"));
    }
    ctx.say(ok_line(match action {
        NpmAction::Install => "Dependencies installed",
        NpmAction::Update => "Dependencies updated",
    }));
    Ok(())
}
