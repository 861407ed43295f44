//! `.npmrc` merging.
//!
//! The file is modelled as an ordered list of entries. Each entry keeps its
//! original line and, when the line belongs to a managed key, that key. A
//! merge sets every managed key to exactly one line: replaced in place when
//! present, appended when absent. Unmanaged lines pass through untouched.

pub const DEFAULT_SCOPE: &str = "@varasto";
pub const DEFAULT_REGISTRY_URL: &str = "https://npm.pkg.github.com";

/// Registry coordinates used to build the managed `.npmrc` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAuth {
    pub scope: String,
    pub url: String,
}

impl Default for RegistryAuth {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            url: DEFAULT_REGISTRY_URL.to_string(),
        }
    }
}

impl RegistryAuth {
    pub fn new(scope: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            url: url.into(),
        }
    }

    /// `@scope:registry=https://host`
    #[must_use]
    pub fn registry_line(&self) -> String {
        format!("{}:registry={}", self.scope, self.url)
    }

    /// Host plus path of the registry URL, e.g. `npm.pkg.github.com`.
    #[must_use]
    pub fn host_path(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);
        without_scheme.trim_end_matches('/')
    }

    /// `//host/:_authToken=`
    #[must_use]
    pub fn token_key_prefix(&self) -> String {
        format!("//{}/:_authToken=", self.host_path())
    }

    #[must_use]
    pub fn token_line(&self, token: &str) -> String {
        format!("{}{token}", self.token_key_prefix())
    }

    /// Merge registry and token lines for `token` into `existing`.
    #[must_use]
    pub fn apply(&self, existing: &str, token: &str) -> String {
        merge(
            existing,
            &self.registry_line(),
            &self.token_key_prefix(),
            &self.token_line(token),
        )
    }

    /// True when `text` declares this registry and carries a token for it.
    #[must_use]
    pub fn is_configured(&self, text: &str) -> bool {
        let prefix = self.token_key_prefix();
        text.contains(self.host_path()) && text.lines().any(|line| line.starts_with(&prefix))
    }
}

/// How a managed key recognises its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch<'a> {
    Exact(&'a str),
    Prefix(&'a str),
}

impl KeyMatch<'_> {
    fn matches(self, line: &str) -> bool {
        match self {
            Self::Exact(expected) => line == expected,
            Self::Prefix(prefix) => line.starts_with(prefix),
        }
    }
}

/// A managed key and the single line it should map to.
#[derive(Debug, Clone)]
pub struct ManagedLine<'a> {
    pub key: KeyMatch<'a>,
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: Option<usize>,
    line: String,
}

/// Ordered `.npmrc` content with managed keys tagged.
#[derive(Debug, Clone)]
pub struct NpmrcDocument<'a> {
    managed: Vec<ManagedLine<'a>>,
    entries: Vec<Entry>,
}

impl<'a> NpmrcDocument<'a> {
    /// Split `text` into entries; empty input has no entries.
    #[must_use]
    pub fn parse(text: &str, managed: Vec<ManagedLine<'a>>) -> Self {
        let entries = text
            .lines()
            .map(|line| Entry {
                key: managed.iter().position(|m| m.key.matches(line)),
                line: line.to_string(),
            })
            .collect();
        Self { managed, entries }
    }

    /// Put every managed line in place, dropping extra lines for the same key.
    pub fn apply(&mut self) {
        let mut seen = vec![false; self.managed.len()];
        let mut merged = Vec::with_capacity(self.entries.len() + self.managed.len());

        for entry in self.entries.drain(..) {
            match entry.key {
                Some(idx) if seen[idx] => {}
                Some(idx) => {
                    seen[idx] = true;
                    merged.push(Entry {
                        key: Some(idx),
                        line: self.managed[idx].line.clone(),
                    });
                }
                None => merged.push(entry),
            }
        }

        for (idx, managed) in self.managed.iter().enumerate() {
            if !seen[idx] {
                merged.push(Entry {
                    key: Some(idx),
                    line: managed.line.clone(),
                });
            }
        }

        self.entries = merged;
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.line);
            out.push('\n');
        }
        out
    }
}

/// Merge a registry declaration and an auth token line into `.npmrc` text.
#[must_use]
pub fn merge(
    existing: &str,
    registry_line: &str,
    token_key_prefix: &str,
    token_line: &str,
) -> String {
    let managed = vec![
        ManagedLine {
            key: KeyMatch::Exact(registry_line),
            line: registry_line.to_string(),
        },
        ManagedLine {
            key: KeyMatch::Prefix(token_key_prefix),
            line: token_line.to_string(),
        },
    ];
    let mut doc = NpmrcDocument::parse(existing, managed);
    doc.apply();
    doc.render()
}
