//! Mock registry for testing version retrieval without network calls.

use super::{Coordinates, Registry};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;

/// A mock registry that returns pre-configured version lists for testing.
pub struct MockRegistry {
    /// Map of `group:artifact` to raw version strings
    versions: HashMap<String, Vec<String>>,
    /// Coordinates whose lookup fails
    failing: Vec<String>,
    /// Registry name
    name: &'static str,
}

impl MockRegistry {
    /// Create a new mock registry with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            versions: HashMap::new(),
            failing: Vec::new(),
            name,
        }
    }

    /// Add an artifact with its raw version strings.
    pub fn with_versions(mut self, coordinates: &str, versions: &[&str]) -> Self {
        self.versions.insert(
            coordinates.to_string(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Make lookups of an artifact fail.
    pub fn with_failure(mut self, coordinates: &str) -> Self {
        self.failing.push(coordinates.to_string());
        self
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_versions(&self, coordinates: &Coordinates) -> Result<Vec<String>> {
        let key = coordinates.to_string();
        if self.failing.contains(&key) {
            return Err(anyhow!("Registry unavailable for {}", key));
        }
        // Unknown artifacts behave like a 404: no versions.
        Ok(self.versions.get(&key).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_registry_basic() {
        let registry = MockRegistry::new("test")
            .with_versions("org.example:demo", &["1.0", "2.0"])
            .with_failure("org.example:down");

        assert_eq!(
            registry
                .fetch_versions(&Coordinates::new("org.example", "demo"))
                .await
                .unwrap(),
            vec!["1.0", "2.0"]
        );
        assert!(
            registry
                .fetch_versions(&Coordinates::new("org.example", "other"))
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            registry
                .fetch_versions(&Coordinates::new("org.example", "down"))
                .await
                .is_err()
        );
        assert_eq!(registry.name(), "test");
    }
}
