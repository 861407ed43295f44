//! Core freshness and config-merge logic.
//!
//! Everything here is a pure transformation over text and timestamps, except
//! for the marker and repo-root helpers which touch the filesystem at paths
//! they compute themselves.

pub mod env_file;
pub mod gitignore;
pub mod marker;
pub mod npmrc;
pub mod registry_error;
pub mod repo_root;

pub use marker::{MARKER_NAME, is_stale, is_stale_at, marker_path, read_marker, touch};
pub use npmrc::{NpmrcDocument, RegistryAuth};
pub use registry_error::is_registry_error;
pub use repo_root::find_repo_root;
