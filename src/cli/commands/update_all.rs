//! skill-deps update-all - Update dependencies for every skill in the repo

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::npm::NpmAction;

use super::install_all::run_batch;

#[derive(Args, Debug)]
pub struct UpdateAllArgs {}

pub fn run(ctx: &AppContext, _args: &UpdateAllArgs) -> Result<()> {
    run_batch(ctx, NpmAction::Update)
}
