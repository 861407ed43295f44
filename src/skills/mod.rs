//! Skill packages: discovery, installation and status.

pub mod discovery;
pub mod installer;
pub mod status;

pub use discovery::{SkillPackage, discover_skills, resolve_manifest};
pub use installer::{BatchItem, BatchReport, EnsureOutcome, Installer, RunReport};
pub use status::{AuthStatus, SkillStatus, auth_status, inspect_skill};
