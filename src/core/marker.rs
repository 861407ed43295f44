//! Install freshness marker.
//!
//! The marker lives inside `node_modules` so that wiping the install also
//! wipes the marker. Any doubt about its content counts as stale.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use tracing::debug;

pub const MARKER_NAME: &str = ".skill-update-check";

const NODE_MODULES: &str = "node_modules";
const MS_PER_DAY: f64 = 86_400_000.0;

/// Path of the marker for a package directory. No I/O.
#[must_use]
pub fn marker_path(target_dir: &Path) -> PathBuf {
    target_dir.join(NODE_MODULES).join(MARKER_NAME)
}

/// Read and parse the marker timestamp, `None` if missing or corrupt.
#[must_use]
pub fn read_marker(target_dir: &Path) -> Option<DateTime<Utc>> {
    let content = std::fs::read_to_string(marker_path(target_dir)).ok()?;
    parse_timestamp(content.trim())
}

/// True when the marker is absent, corrupt, or older than `max_age_days`.
#[must_use]
pub fn is_stale(target_dir: &Path, max_age_days: u32) -> bool {
    is_stale_at(target_dir, max_age_days, Utc::now())
}

/// Same as [`is_stale`] with an explicit clock.
#[must_use]
pub fn is_stale_at(target_dir: &Path, max_age_days: u32, now: DateTime<Utc>) -> bool {
    let Some(written_at) = read_marker(target_dir) else {
        debug!(dir = %target_dir.display(), "marker missing or unreadable");
        return true;
    };

    #[allow(clippy::cast_precision_loss)]
    let age_days = (now - written_at).num_milliseconds() as f64 / MS_PER_DAY;
    let stale = age_days > f64::from(max_age_days);
    debug!(
        dir = %target_dir.display(),
        age_days,
        max_age_days,
        stale,
        "marker age checked"
    );
    stale
}

/// Refresh the marker with the current time.
///
/// Returns `false` without writing when `node_modules` is missing, and on
/// any write failure.
#[must_use]
pub fn touch(target_dir: &Path) -> bool {
    touch_at(target_dir, Utc::now())
}

pub(crate) fn touch_at(target_dir: &Path, now: DateTime<Utc>) -> bool {
    if !target_dir.join(NODE_MODULES).is_dir() {
        return false;
    }
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    match std::fs::write(marker_path(target_dir), stamp) {
        Ok(()) => true,
        Err(err) => {
            debug!(dir = %target_dir.display(), error = %err, "marker write failed");
            false
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Date-only markers are read as midnight UTC.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
