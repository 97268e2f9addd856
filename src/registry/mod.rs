mod file;
mod maven;
#[cfg(test)]
pub mod mock;
mod repository;

pub use file::VersionsFile;
pub use maven::{Credentials, MavenRepository};
#[cfg(test)]
pub use mock::MockRegistry;
pub use repository::{
    BUILTIN_ALIASES, Coordinates, clean_repository_url, metadata_url, repository_url,
    resolve_repository_alias,
};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT_ENCODING;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Default number of attempts for failed HTTP requests
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (100ms, 200ms, 400ms)
pub const BASE_DELAY_MS: u64 = 100;

/// How often and how patiently a request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1 << attempt.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES, Duration::from_millis(BASE_DELAY_MS))
    }
}

/// Execute an HTTP GET request with retry and exponential backoff.
/// Retries on transient errors (network issues, 5xx server errors).
///
/// The last response is returned as-is once attempts are exhausted, so the
/// caller decides how to report a final 5xx.
pub async fn get_with_retry(
    client: &Client,
    url: &str,
    credentials: Option<&Credentials>,
    policy: &RetryPolicy,
) -> Result<Response, reqwest::Error> {
    let mut attempt = 0;

    loop {
        let is_last = attempt + 1 >= policy.attempts;

        let mut request = client.get(url).header(ACCEPT_ENCODING, "identity");
        if let Some(credentials) = credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        match request.send().await {
            // Don't retry client errors (4xx) - they won't succeed on retry
            Ok(response) if !response.status().is_server_error() || is_last => {
                return Ok(response);
            }
            Ok(response) => {
                debug!(
                    "HTTP {} from {} (attempt {}/{})",
                    response.status().as_u16(),
                    url,
                    attempt + 1,
                    policy.attempts
                );
            }
            Err(e) if is_last => return Err(e),
            Err(e) => {
                debug!(
                    "Request to {} failed (attempt {}/{}): {}",
                    url,
                    attempt + 1,
                    policy.attempts,
                    e
                );
            }
        }

        tokio::time::sleep(policy.delay_for(attempt)).await;
        attempt += 1;
    }
}

/// Create a descriptive error message for HTTP failures
///
/// # Arguments
/// * `status` - HTTP status code
/// * `entity_type` - Type of entity (e.g., "Artifact")
/// * `name` - Display name of the entity
/// * `registry_hint` - Optional hint about where to configure credentials
pub fn http_error_message(
    status: reqwest::StatusCode,
    entity_type: &str,
    name: &str,
    registry_hint: Option<&str>,
) -> String {
    let code = status.as_u16();
    match code {
        401 => {
            let hint = registry_hint.map_or_else(
                || "Check your credentials.".to_string(),
                |h| format!("Check your credentials. {}", h),
            );
            format!(
                "{} '{}' requires authentication (HTTP 401). {}",
                entity_type, name, hint
            )
        }
        403 => format!(
            "Access denied for {} '{}' (HTTP 403). You may lack permission or the repository may be private.",
            entity_type, name
        ),
        408 | 504 => format!(
            "Request timed out for {} '{}' (HTTP {}). The repository may be slow or unreachable.",
            entity_type, name, code
        ),
        429 => format!(
            "Rate limited while fetching {} '{}' (HTTP 429). Wait a moment and try again.",
            entity_type, name
        ),
        500..=599 => format!(
            "Repository server error for {} '{}' (HTTP {}). The repository may be experiencing issues.",
            entity_type, name, code
        ),
        _ => format!(
            "Failed to fetch {} '{}': HTTP {} {}",
            entity_type,
            name,
            code,
            status.canonical_reason().unwrap_or("Unknown error")
        ),
    }
}

/// A source of raw version strings for an artifact.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Raw version strings in the order the source lists them. An artifact
    /// the source doesn't know yields an empty list.
    async fn fetch_versions(&self, coordinates: &Coordinates) -> Result<Vec<String>>;

    /// Registry name for display
    fn name(&self) -> &'static str;
}
