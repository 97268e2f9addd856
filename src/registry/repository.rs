//! Artifact coordinates and repository URL handling.

use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Repository aliases understood without any configuration.
pub const BUILTIN_ALIASES: [(&str, &str); 2] = [
    ("central", "https://repo1.maven.org/maven2/"),
    (
        "oss-snapshots",
        "https://oss.sonatype.org/content/repositories/snapshots/",
    ),
];

/// Maven `group:artifact` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub group: String,
    pub artifact: String,
}

impl Coordinates {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Parse `group:artifact`.
    pub fn parse(s: &str) -> Result<Self> {
        let (group, artifact) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| anyhow!("Expected coordinates as 'group:artifact', got '{}'", s))?;
        let (group, artifact) = (group.trim(), artifact.trim());
        if group.is_empty() || artifact.is_empty() || artifact.contains(':') {
            bail!("Expected coordinates as 'group:artifact', got '{}'", s);
        }
        Ok(Self::new(group, artifact))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// Drop any query string or fragment.
pub fn clean_repository_url(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Replace a known alias with its URL. Configured aliases win over built-ins;
/// lookup ignores case. Anything else is returned unchanged.
pub fn resolve_repository_alias(url: &str, extra_aliases: &HashMap<String, String>) -> String {
    let key = url.trim().to_lowercase();

    if let Some(target) = extra_aliases
        .iter()
        .find(|(alias, _)| alias.to_lowercase() == key)
        .map(|(_, target)| target)
    {
        return target.clone();
    }

    BUILTIN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or_else(|| url.trim().to_string(), |(_, target)| target.to_string())
}

/// Turn a user-supplied location (URL or alias) into a usable repository URL.
pub fn repository_url(location: &str, extra_aliases: &HashMap<String, String>) -> Result<String> {
    let resolved = resolve_repository_alias(clean_repository_url(location), extra_aliases);
    let parsed = Url::parse(&resolved)
        .map_err(|e| anyhow!("Invalid repository URL '{}': {}", resolved, e))?;

    match parsed.scheme() {
        "http" | "https" => Ok(resolved),
        other => bail!(
            "Unsupported repository URL scheme '{}' in '{}'. Use http or https.",
            other,
            resolved
        ),
    }
}

/// Location of `maven-metadata.xml` for the given coordinates.
pub fn metadata_url(repository: &str, coordinates: &Coordinates) -> String {
    format!(
        "{}/{}/{}/maven-metadata.xml",
        repository.trim_end_matches('/'),
        coordinates.group.replace('.', "/"),
        coordinates.artifact
    )
}
