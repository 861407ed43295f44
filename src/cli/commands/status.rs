//! skill-deps status - Show dependency status and diagnostics

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::skills::{AuthStatus, SkillStatus, auth_status, discover_skills, inspect_skill};
use crate::utils::format::format_age;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Inspect a single skill's package.json instead of every skill in the repo
    #[arg(long, value_name = "PATH")]
    pub npm: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    auth: AuthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    npm: Option<PathBuf>,
    check_days: u32,
    skills: Vec<SkillStatus>,
}

pub fn run(ctx: &AppContext, args: &StatusArgs) -> Result<()> {
    let auth = auth_status(&ctx.config.npmrc_path()?, &ctx.registry_auth());
    let npm = ctx.npm_client().locate();
    let check_days = ctx.config.update.check_days;
    let now = Utc::now();

    let manifests = match (&args.npm, ctx.repo_root.as_deref()) {
        (Some(path), _) => vec![path.clone()],
        (None, Some(root)) => discover_skills(root, &ctx.config.skills.dirs)?
            .into_iter()
            .map(|package| package.manifest)
            .collect(),
        (None, None) => Vec::new(),
    };
    let skills = manifests
        .iter()
        .map(|manifest| inspect_skill(manifest, check_days, now))
        .collect();

    let report = StatusReport {
        auth,
        npm,
        check_days,
        skills,
    };
    if ctx.robot_mode {
        return emit_robot(&robot_ok(report));
    }
    emit_human(human_layout(&report, now));
    Ok(())
}

fn human_layout(report: &StatusReport, now: chrono::DateTime<Utc>) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title("Skill dependency status");

    layout
        .section("npm")
        .kv(
            "Binary",
            &report
                .npm
                .as_ref()
                .map_or_else(|| "not found".to_string(), |path| path.display().to_string()),
        )
        .kv("Config", &report.auth.npmrc.display().to_string())
        .kv(
            "Auth",
            if report.auth.configured {
                "configured"
            } else {
                "missing (run `skill-deps setup`)"
            },
        )
        .kv(
            "Update check",
            &if report.check_days == 0 {
                "disabled".to_string()
            } else {
                format!("every {} days", report.check_days)
            },
        );

    if report.skills.is_empty() {
        layout.blank().push_line("No skills found");
        return layout;
    }

    for skill in &report.skills {
        layout.blank().section(&skill.manifest.display().to_string());
        if !skill.found {
            layout.kv("Manifest", "not found");
            continue;
        }
        let marker = skill.marker_written_at.map_or_else(
            || "never".to_string(),
            |written| format_age(now - written),
        );
        layout
            .kv("node_modules", if skill.node_modules { "present" } else { "missing" })
            .kv("Last run", &marker)
            .kv("Stale", if skill.stale { "yes" } else { "no" });
        if !skill.installed.is_empty() {
            layout.kv("Installed", "");
            for (name, version) in &skill.installed {
                layout.bullet(&format!("{name}@{version}"));
            }
        }
    }
    layout
}
