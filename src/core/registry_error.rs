//! Registry/auth failure detection for package manager output.

/// Lowercased tokens that mark a failure as registry or auth related.
const REGISTRY_ERROR_TOKENS: &[&str] = &[
    "e404",
    "e401",
    "e403",
    "unauthorized",
    "forbidden",
    "@varasto",
];

/// True when `message` looks like a registry access or authentication failure.
///
/// Only the npm-prefixed codes count, so a bare `404` in unrelated output
/// does not trigger re-authentication.
#[must_use]
pub fn is_registry_error(message: &str) -> bool {
    let lowered = message.to_lowercase();
    REGISTRY_ERROR_TOKENS
        .iter()
        .any(|token| lowered.contains(token))
}
