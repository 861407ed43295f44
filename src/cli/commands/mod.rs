//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod ensure;
pub mod install;
pub mod install_all;
pub mod setup;
pub mod status;
pub mod update;
pub mod update_all;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure npm auth for private packages
    Setup(setup::SetupArgs),

    /// Install dependencies for an agent skill
    Install(install::InstallArgs),

    /// Update dependencies for an agent skill
    Update(update::UpdateArgs),

    /// Smart install/update (install if missing, update if stale)
    Ensure(ensure::EnsureArgs),

    /// Install dependencies for all agent skills in the repo
    InstallAll(install_all::InstallAllArgs),

    /// Update dependencies for all agent skills in the repo
    UpdateAll(update_all::UpdateAllArgs),

    /// Show dependency status and diagnostics
    Status(status::StatusArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Setup(args) => setup::run(ctx, args),
        Commands::Install(args) => install::run(ctx, args),
        Commands::Update(args) => update::run(ctx, args),
        Commands::Ensure(args) => ensure::run(ctx, args),
        Commands::InstallAll(args) => install_all::run(ctx, args),
        Commands::UpdateAll(args) => update_all::run(ctx, args),
        Commands::Status(args) => status::run(ctx, args),
    }
}
