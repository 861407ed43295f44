//! skill-deps install-all - Install dependencies for every skill in the repo

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, fail_line, ok_line, robot_ok, robot_partial, warn_line};
use crate::error::{DepsError, Result};
use crate::npm::NpmAction;
use crate::skills::{Installer, discover_skills};

#[derive(Args, Debug)]
pub struct InstallAllArgs {}

pub fn run(ctx: &AppContext, _args: &InstallAllArgs) -> Result<()> {
    run_batch(ctx, NpmAction::Install)
}

/// Run `action` over every discovered skill; shared with `update-all`.
pub(crate) fn run_batch(ctx: &AppContext, action: NpmAction) -> Result<()> {
    let root = ctx.repo_root.as_deref().ok_or(DepsError::RepoRootNotFound)?;
    let packages = discover_skills(root, &ctx.config.skills.dirs)?;

    if packages.is_empty() {
        ctx.say(warn_line("No skills with package.json found"));
    }
    for package in &packages {
        ctx.say(format!("{action}: {}", package.relative.display()));
    }

    let client = ctx.npm_client();
    let installer = Installer::new(&client).with_reauth(|| ctx.reauthenticate().map(|_| ()));
    let report = installer.run_batch(action, &packages);

    let failed = report.failed();
    let completed = report.items.len() - failed;
    if ctx.robot_mode {
        if failed > 0 {
            emit_robot(&robot_partial(&report, completed, failed))?;
        } else {
            emit_robot(&robot_ok(&report))?;
        }
    } else {
        for item in &report.items {
            match &item.error {
                None => ctx.say(ok_line(&item.skill)),
                Some(err) => ctx.say(fail_line(&format!("{}: {err}", item.skill))),
            }
        }
        ctx.say(format!("{completed}/{} skills succeeded", report.items.len()));
    }

    report.into_result().map(|_| ())
}
