//! Package manager and credential helper clients.

pub mod auth;
pub mod client;

pub use auth::{GhTokenSource, TokenSource, configure_npmrc};
pub use client::{NpmAction, NpmClient, PackageManager};
