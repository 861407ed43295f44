//! skill-deps - keep npm dependencies of agent skills installed and fresh.
//!
//! The `core` module holds the pure freshness and config-merge logic; `npm`,
//! `skills` and `cli` form the thin shell that shells out to the package
//! manager and reports results.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod npm;
pub mod skills;
pub mod test_utils;
pub mod utils;

pub use error::{DepsError, Result};
