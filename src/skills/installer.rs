//! Install, update and ensure for skill packages.
//!
//! A package manager failure that looks like a registry/auth problem gets one
//! re-authentication and one retry. Anything else fails straight away.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{marker, registry_error};
use crate::error::{DepsError, Result};
use crate::npm::{NpmAction, PackageManager};

use super::discovery::{SkillPackage, resolve_manifest};

type Reauth<'a> = Box<dyn Fn() -> Result<()> + 'a>;

/// Result of a single install or update run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub action: &'static str,
    pub dir: PathBuf,
    pub reauthenticated: bool,
    pub marker_written: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnsureOutcome {
    UpToDate { dir: PathBuf },
    Installed(RunReport),
    Updated(RunReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub skill: String,
    pub manifest: PathBuf,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.items.iter().all(|item| item.ok)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.items.iter().filter(|item| !item.ok).count()
    }

    /// `BatchFailed` when any item failed.
    pub fn into_result(self) -> Result<Self> {
        if self.all_succeeded() {
            Ok(self)
        } else {
            Err(DepsError::BatchFailed {
                failed: self.failed(),
                total: self.items.len(),
            })
        }
    }
}

pub struct Installer<'a> {
    pm: &'a dyn PackageManager,
    reauth: Option<Reauth<'a>>,
}

impl<'a> Installer<'a> {
    pub fn new(pm: &'a dyn PackageManager) -> Self {
        Self { pm, reauth: None }
    }

    /// Hook run once before retrying after a registry/auth failure.
    #[must_use]
    pub fn with_reauth(mut self, reauth: impl Fn() -> Result<()> + 'a) -> Self {
        self.reauth = Some(Box::new(reauth));
        self
    }

    pub fn install(&self, manifest: &Path) -> Result<RunReport> {
        let (_, dir) = resolve_manifest(manifest)?;
        self.run_in(NpmAction::Install, &dir)
    }

    pub fn update(&self, manifest: &Path) -> Result<RunReport> {
        let (_, dir) = resolve_manifest(manifest)?;
        self.run_in(NpmAction::Update, &dir)
    }

    /// Install when `node_modules` is missing, update when the marker is stale.
    ///
    /// `check_days == 0` turns off staleness-driven updates.
    pub fn ensure(&self, manifest: &Path, check_days: u32) -> Result<EnsureOutcome> {
        let (_, dir) = resolve_manifest(manifest)?;

        if !dir.join("node_modules").is_dir() {
            return self.run_in(NpmAction::Install, &dir).map(EnsureOutcome::Installed);
        }
        if check_days > 0 && marker::is_stale(&dir, check_days) {
            return self.run_in(NpmAction::Update, &dir).map(EnsureOutcome::Updated);
        }

        debug!(dir = %dir.display(), "dependencies up to date");
        Ok(EnsureOutcome::UpToDate { dir })
    }

    /// Run `action` for every package in order, continuing past failures.
    pub fn run_batch(&self, action: NpmAction, packages: &[SkillPackage]) -> BatchReport {
        let mut report = BatchReport::default();
        for package in packages {
            info!(skill = %package.name, %action, "processing skill");
            let result = self.run_in(action, &package.dir);
            let error = match result {
                Ok(_) => None,
                Err(err) => {
                    warn!(skill = %package.name, error = %err, "skill failed");
                    Some(err.to_string())
                }
            };
            report.items.push(BatchItem {
                skill: package.relative.display().to_string(),
                manifest: package.manifest.clone(),
                ok: error.is_none(),
                error,
            });
        }
        report
    }

    fn run_in(&self, action: NpmAction, dir: &Path) -> Result<RunReport> {
        let reauthenticated = self.run_with_retry(action, dir)?;
        let marker_written = marker::touch(dir);
        if !marker_written {
            warn!(dir = %dir.display(), "could not write freshness marker");
        }
        Ok(RunReport {
            action: action.as_str(),
            dir: dir.to_path_buf(),
            reauthenticated,
            marker_written,
        })
    }

    /// Returns whether a re-authentication happened.
    fn run_with_retry(&self, action: NpmAction, dir: &Path) -> Result<bool> {
        let err = match self.pm.run(action, dir) {
            Ok(()) => return Ok(false),
            Err(err) => err,
        };

        let Some(reauth) = self.reauth.as_ref() else {
            return Err(err);
        };
        if !is_registry_failure(&err) {
            return Err(err);
        }

        warn!(dir = %dir.display(), error = %err, "registry error, re-authenticating");
        if let Err(reauth_err) = reauth() {
            warn!(error = %reauth_err, "re-authentication failed");
            return Err(err);
        }

        self.pm.run(action, dir)?;
        Ok(true)
    }
}

fn is_registry_failure(err: &DepsError) -> bool {
    match err {
        DepsError::CommandFailed { message, .. } => registry_error::is_registry_error(message),
        _ => false,
    }
}
