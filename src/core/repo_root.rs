//! Repository root discovery.

use std::path::{Path, PathBuf};

pub const BOUNDARY_MARKER: &str = ".git";

/// Upper bound on the number of directories inspected.
pub const MAX_LEVELS: usize = 20;

/// Closest directory at or above `start` holding a `.git` entry.
#[must_use]
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    find_upwards(start, BOUNDARY_MARKER, MAX_LEVELS)
}

/// Walk from `start` towards the filesystem root looking for `name`.
///
/// `.git` may be a directory or, for worktrees, a file; both count.
#[must_use]
pub fn find_upwards(start: &Path, name: &str, max_levels: usize) -> Option<PathBuf> {
    let mut current = Some(start);
    for _ in 0..max_levels {
        let dir = current?;
        if dir.join(name).exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}
