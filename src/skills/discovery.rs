//! Locate skill `package.json` files.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{DepsError, Result};

const MANIFEST: &str = "package.json";

/// A skill with an npm manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillPackage {
    /// Skill directory name, e.g. `pdf-tools`.
    pub name: String,
    /// Manifest path relative to the repository root.
    pub relative: PathBuf,
    pub manifest: PathBuf,
    /// Directory that holds the manifest and `node_modules`.
    pub dir: PathBuf,
}

/// Absolute manifest path and its directory, failing if the file is missing.
pub fn resolve_manifest(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let absolute = std::path::absolute(path)?;
    if !absolute.is_file() {
        return Err(DepsError::PackageJsonNotFound(absolute));
    }
    let dir = absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| DepsError::PackageJsonNotFound(absolute.clone()))?;
    Ok((absolute, dir))
}

/// Every skill under `<repo_root>/<skill_dir>/*` that carries a manifest.
///
/// `scripts/package.json` wins over a top-level `package.json`. Results are
/// sorted by skill directory so batch runs are deterministic.
pub fn discover_skills(repo_root: &Path, skill_dirs: &[String]) -> Result<Vec<SkillPackage>> {
    let mut packages = Vec::new();

    for skill_dir in skill_dirs {
        let base = repo_root.join(skill_dir);
        if !base.is_dir() {
            debug!(dir = %base.display(), "skills directory missing");
            continue;
        }

        let mut entries = std::fs::read_dir(&base)?
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
            .map(|entry| entry.path())
            .collect::<Vec<_>>();
        entries.sort();

        for skill_path in entries {
            let Some(manifest) = skill_manifest(&skill_path) else {
                continue;
            };
            let name = skill_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let relative = manifest
                .strip_prefix(repo_root)
                .map_or_else(|_| manifest.clone(), Path::to_path_buf);
            let dir = manifest
                .parent()
                .map_or_else(|| skill_path.clone(), Path::to_path_buf);
            packages.push(SkillPackage {
                name,
                relative,
                manifest,
                dir,
            });
        }
    }

    Ok(packages)
}

fn skill_manifest(skill_path: &Path) -> Option<PathBuf> {
    [
        skill_path.join("scripts").join(MANIFEST),
        skill_path.join(MANIFEST),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}
