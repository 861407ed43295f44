//! Read-only inspection of skill installs and npm auth.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::marker;
use crate::core::npmrc::RegistryAuth;

#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub npmrc: PathBuf,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillStatus {
    pub manifest: PathBuf,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_written_at: Option<DateTime<Utc>>,
    pub stale: bool,
    pub node_modules: bool,
    /// Installed version per declared dependency.
    pub installed: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct InstalledManifest {
    version: Option<String>,
}

/// Whether the `.npmrc` at `path` carries registry and token for `auth`.
#[must_use]
pub fn auth_status(path: &Path, auth: &RegistryAuth) -> AuthStatus {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    let has_registry = content.contains(auth.host_path());
    AuthStatus {
        npmrc: path.to_path_buf(),
        configured: auth.is_configured(&content),
        registry: has_registry.then(|| auth.host_path().to_string()),
    }
}

/// Status of the skill whose manifest is at `manifest`.
///
/// `check_days == 0` means update checks are off, so nothing is stale.
#[must_use]
pub fn inspect_skill(manifest: &Path, check_days: u32, now: DateTime<Utc>) -> SkillStatus {
    let manifest = std::path::absolute(manifest).unwrap_or_else(|_| manifest.to_path_buf());
    let found = manifest.is_file();
    let dir = manifest
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf);

    let node_modules = found && dir.join("node_modules").is_dir();
    let marker_written_at = if found { marker::read_marker(&dir) } else { None };
    let stale = found && check_days > 0 && marker::is_stale_at(&dir, check_days, now);
    let installed = if node_modules {
        installed_versions(&manifest, &dir)
    } else {
        BTreeMap::new()
    };

    SkillStatus {
        manifest,
        found,
        marker_written_at,
        stale,
        node_modules,
        installed,
    }
}

/// Versions of declared dependencies found under `node_modules`.
///
/// Unreadable manifests yield whatever was collected so far.
fn installed_versions(manifest: &Path, dir: &Path) -> BTreeMap<String, String> {
    let mut versions = BTreeMap::new();
    let Some(declared) = std::fs::read_to_string(manifest)
        .ok()
        .and_then(|raw| serde_json::from_str::<Manifest>(&raw).ok())
    else {
        return versions;
    };

    let node_modules = dir.join("node_modules");
    let names = declared
        .dependencies
        .keys()
        .chain(declared.dev_dependencies.keys());
    for name in names {
        // Scoped names (`@scope/pkg`) map onto nested directories.
        let package_json = name
            .split('/')
            .fold(node_modules.clone(), |path, part| path.join(part))
            .join("package.json");
        let version = std::fs::read_to_string(&package_json)
            .ok()
            .and_then(|raw| serde_json::from_str::<InstalledManifest>(&raw).ok())
            .and_then(|installed| installed.version);
        if let Some(version) = version {
            versions.insert(name.clone(), version);
        }
    }
    versions
}
