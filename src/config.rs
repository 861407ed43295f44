use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::env_file::CHECK_DAYS_KEY;
use crate::core::gitignore::DEFAULT_PATTERNS;
use crate::core::npmrc::{DEFAULT_REGISTRY_URL, DEFAULT_SCOPE, RegistryAuth};
use crate::error::{DepsError, Result};

pub const PROJECT_CONFIG_FILE: &str = ".skill-deps.toml";
pub const DEFAULT_CHECK_DAYS: u32 = 7;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub update: UpdateConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub npm: NpmConfig,
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub gitignore: GitignoreConfig,
}

impl Config {
    /// Load config from files, the repo `.env` and the process environment.
    pub fn load(explicit_path: Option<&Path>, repo_root: Option<&Path>) -> Result<Self> {
        let global = dirs::config_dir().map(|dir| dir.join("skill-deps/config.toml"));
        Self::load_with(explicit_path, repo_root, global.as_deref(), &|key: &str| {
            std::env::var(key).ok()
        })
    }

    /// Layered load with an explicit global path and environment lookup.
    pub fn load_with(
        explicit_path: Option<&Path>,
        repo_root: Option<&Path>,
        global_path: Option<&Path>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env("SKILL_DEPS_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(patch) = global_path.map(Self::load_patch).transpose()?.flatten() {
                config.merge_patch(patch);
            }
            if let Some(root) = repo_root {
                if let Some(patch) = Self::load_patch(&root.join(PROJECT_CONFIG_FILE))? {
                    config.merge_patch(patch);
                }
            }
        }

        if let Some(root) = repo_root {
            config.apply_dotenv(&root.join(".env"))?;
        }
        config.apply_env_overrides(env)?;

        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| DepsError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| DepsError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.update {
            self.update.merge(patch);
        }
        if let Some(patch) = patch.registry {
            self.registry.merge(patch);
        }
        if let Some(patch) = patch.npm {
            self.npm.merge(patch);
        }
        if let Some(patch) = patch.skills {
            self.skills.merge(patch);
        }
        if let Some(patch) = patch.gitignore {
            self.gitignore.merge(patch);
        }
    }

    /// Pick up the update-check interval from a repo-level `.env` file.
    ///
    /// The file is parsed, not loaded into the process environment. It is
    /// shared with other tools, so entries that fail to parse are skipped;
    /// only a bad `SKILL_UPDATE_CHECK_DAYS` value is an error.
    fn apply_dotenv(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|err| DepsError::Config(format!("read {}: {err}", path.display())))?;

        let value = match dotenv_value(raw.as_bytes(), CHECK_DAYS_KEY) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unparsable .env entries");
                raw.lines()
                    .rev()
                    .find_map(|line| dotenv_value(line.as_bytes(), CHECK_DAYS_KEY).ok().flatten())
            }
        };
        if let Some(value) = value {
            self.update.check_days = parse_u32(CHECK_DAYS_KEY, &value)?;
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self, env: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = env(CHECK_DAYS_KEY) {
            self.update.check_days = parse_u32(CHECK_DAYS_KEY, &value)?;
        }

        if let Some(value) = env("SKILL_DEPS_REGISTRY_SCOPE") {
            self.registry.scope = value;
        }
        if let Some(value) = env("SKILL_DEPS_REGISTRY_URL") {
            self.registry.url = value;
        }
        let token = env("GITHUB_TOKEN")
            .or_else(|| env("GH_TOKEN"))
            .filter(|value| !value.trim().is_empty());
        if token.is_some() {
            self.registry.token = token;
        }

        if let Some(value) = env("SKILL_DEPS_NPM_BIN") {
            self.npm.bin = value;
        }
        if let Some(value) = env("SKILL_DEPS_GH_BIN") {
            self.npm.gh_bin = value;
        }
        if let Some(value) = env("SKILL_DEPS_NPMRC") {
            self.npm.npmrc_path = Some(PathBuf::from(value));
        }

        Ok(())
    }

    /// `~/.npmrc` unless overridden.
    pub fn npmrc_path(&self) -> Result<PathBuf> {
        if let Some(path) = self.npm.npmrc_path.as_ref() {
            return Ok(path.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".npmrc"))
            .ok_or_else(|| DepsError::Config("home directory not found".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Days before a marker is stale; 0 disables staleness-driven updates.
    #[serde(default = "default_check_days")]
    pub check_days: u32,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            check_days: DEFAULT_CHECK_DAYS,
        }
    }
}

impl UpdateConfig {
    fn merge(&mut self, patch: UpdatePatch) {
        if let Some(value) = patch.check_days {
            self.check_days = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_registry_url")]
    pub url: String,
    /// Resolved from the environment only, never from files.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            scope: default_scope(),
            url: default_registry_url(),
            token: None,
        }
    }
}

impl RegistryConfig {
    fn merge(&mut self, patch: RegistryPatch) {
        if let Some(value) = patch.scope {
            self.scope = value;
        }
        if let Some(value) = patch.url {
            self.url = value;
        }
    }

    #[must_use]
    pub fn auth(&self) -> RegistryAuth {
        RegistryAuth::new(self.scope.clone(), self.url.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpmConfig {
    #[serde(default = "default_npm_bin")]
    pub bin: String,
    #[serde(default = "default_gh_bin")]
    pub gh_bin: String,
    #[serde(default)]
    pub npmrc_path: Option<PathBuf>,
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self {
            bin: default_npm_bin(),
            gh_bin: default_gh_bin(),
            npmrc_path: None,
        }
    }
}

impl NpmConfig {
    fn merge(&mut self, patch: NpmPatch) {
        if let Some(value) = patch.bin {
            self.bin = value;
        }
        if let Some(value) = patch.gh_bin {
            self.gh_bin = value;
        }
        if let Some(value) = patch.npmrc_path {
            self.npmrc_path = Some(value);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Directories under the repo root that hold one skill per subdirectory.
    #[serde(default = "default_skill_dirs")]
    pub dirs: Vec<String>,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            dirs: default_skill_dirs(),
        }
    }
}

impl SkillsConfig {
    fn merge(&mut self, patch: SkillsPatch) {
        if let Some(values) = patch.dirs {
            self.dirs = values;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitignoreConfig {
    #[serde(default = "default_gitignore_patterns")]
    pub patterns: Vec<String>,
}

impl Default for GitignoreConfig {
    fn default() -> Self {
        Self {
            patterns: default_gitignore_patterns(),
        }
    }
}

impl GitignoreConfig {
    fn merge(&mut self, patch: GitignorePatch) {
        if let Some(values) = patch.patterns {
            self.patterns = values;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub update: Option<UpdatePatch>,
    pub registry: Option<RegistryPatch>,
    pub npm: Option<NpmPatch>,
    pub skills: Option<SkillsPatch>,
    pub gitignore: Option<GitignorePatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct UpdatePatch {
    pub check_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RegistryPatch {
    pub scope: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NpmPatch {
    pub bin: Option<String>,
    pub gh_bin: Option<String>,
    pub npmrc_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SkillsPatch {
    pub dirs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GitignorePatch {
    pub patterns: Option<Vec<String>>,
}

const fn default_check_days() -> u32 {
    DEFAULT_CHECK_DAYS
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_npm_bin() -> String {
    "npm".to_string()
}

fn default_gh_bin() -> String {
    "gh".to_string()
}

fn default_skill_dirs() -> Vec<String> {
    vec!["skills".to_string()]
}

fn default_gitignore_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| (*p).to_string()).collect()
}

/// Last value of `key` in dotenv content; fails on the first malformed entry.
fn dotenv_value(
    reader: impl std::io::Read,
    key: &str,
) -> std::result::Result<Option<String>, dotenvy::Error> {
    let mut found = None;
    for item in dotenvy::from_read_iter(reader) {
        let (name, value) = item?;
        if name == key {
            found = Some(value);
        }
    }
    Ok(found)
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|err| DepsError::Config(format!("invalid {key} value {value}: {err}")))
}
