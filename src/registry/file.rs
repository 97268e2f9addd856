use super::{Coordinates, Registry};
use crate::metadata::parse_maven_metadata;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Offline version source backed by a local file.
///
/// The file is either a `maven-metadata.xml` document or a plain list with
/// one version per line. In a plain list every line is an entry, so an
/// entry's index is its 0-based line number. Coordinates are ignored.
pub struct VersionsFile {
    path: PathBuf,
}

impl VersionsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split file content into raw version strings.
    pub fn parse_content(content: &str) -> Result<Vec<String>> {
        if content.trim_start().starts_with('<') {
            return Ok(parse_maven_metadata(content)?);
        }

        // Blank lines stay in so they are rejected as empty at their own index.
        Ok(content.lines().map(|line| line.trim().to_string()).collect())
    }
}

#[async_trait]
impl Registry for VersionsFile {
    async fn fetch_versions(&self, coordinates: &Coordinates) -> Result<Vec<String>> {
        let path = self.path();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read versions file {}", path.display()))?;
        let versions = Self::parse_content(&content)?;
        debug!(
            "Read {} version entries for {} from {}",
            versions.len(),
            coordinates,
            path.display()
        );
        Ok(versions)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
