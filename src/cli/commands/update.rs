//! skill-deps update - Update dependencies for one skill

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::npm::NpmAction;

use super::install::run_single;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Path to the skill's package.json
    #[arg(long, value_name = "PATH")]
    pub npm: PathBuf,
}

pub fn run(ctx: &AppContext, args: &UpdateArgs) -> Result<()> {
    run_single(ctx, NpmAction::Update, &args.npm)
}
