//! skill-deps ensure - Install if missing, update if stale

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, ok_line, robot_ok};
use crate::error::Result;
use crate::skills::{EnsureOutcome, Installer};

#[derive(Args, Debug)]
pub struct EnsureArgs {
    /// Path to the skill's package.json
    #[arg(long, value_name = "PATH")]
    pub npm: PathBuf,

    /// Update when the last run is older than this many days (0 disables)
    #[arg(long, value_name = "DAYS")]
    pub max_age: Option<u32>,
}

pub fn run(ctx: &AppContext, args: &EnsureArgs) -> Result<()> {
    let check_days = args.max_age.unwrap_or(ctx.config.update.check_days);
    debug!(check_days, manifest = %args.npm.display(), "ensuring dependencies");

    let client = ctx.npm_client();
    let installer = Installer::new(&client).with_reauth(|| ctx.reauthenticate().map(|_| ()));
    let outcome = installer.ensure(&args.npm, check_days)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(outcome));
    }
    let line = match &outcome {
        EnsureOutcome::UpToDate { dir } => format!("Dependencies up to date in {}", dir.display()),
        EnsureOutcome::Installed(report) => {
            format!("Dependencies installed in {}", report.dir.display())
        }
        EnsureOutcome::Updated(report) => {
            format!("Dependencies updated in {}", report.dir.display())
        }
    };
    ctx.say(ok_line(&line));
    Ok(())
}
