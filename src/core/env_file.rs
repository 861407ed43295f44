//! Repo-level `.env` section for the update-check interval.

pub const CHECK_DAYS_KEY: &str = "SKILL_UPDATE_CHECK_DAYS";

pub const SKILL_SECTION: &str = "# Skill dependency management (skill-deps)
# How often to check for package updates (days). Set to 0 to disable.
SKILL_UPDATE_CHECK_DAYS=7
";

/// New `.env` text with the skill section, or `None` if it already has one.
#[must_use]
pub fn merge(existing: &str) -> Option<String> {
    if existing.contains(CHECK_DAYS_KEY) {
        return None;
    }
    let head = existing.trim_end();
    if head.is_empty() {
        return Some(SKILL_SECTION.to_string());
    }
    Some(format!("{head}\n\n{SKILL_SECTION}"))
}
