//! `.gitignore` merging: append required patterns that are not yet present.

pub const DEFAULT_PATTERNS: &[&str] = &[".npmrc", ".env", "**/skills/*/scripts/node_modules"];

/// Patterns from `required` with no trimmed match among existing lines.
#[must_use]
pub fn missing<'a, S: AsRef<str>>(existing: &str, required: &'a [S]) -> Vec<&'a str> {
    let present: Vec<&str> = existing.lines().map(str::trim).collect();
    let mut out: Vec<&str> = Vec::new();
    for pattern in required {
        let pattern = pattern.as_ref();
        if !present.contains(&pattern.trim()) && !out.contains(&pattern) {
            out.push(pattern);
        }
    }
    out
}

/// Existing text verbatim, followed by each missing pattern once.
///
/// Appended lines use the file's own line ending (CRLF if it has any).
#[must_use]
pub fn merge<S: AsRef<str>>(existing: &str, required: &[S]) -> String {
    let additions = missing(existing, required);
    if additions.is_empty() {
        return existing.to_string();
    }

    let eol = if existing.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(existing.len() + additions.len() * 16);
    out.push_str(existing);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(eol);
    }
    for pattern in additions {
        out.push_str(pattern);
        out.push_str(eol);
    }
    out
}
