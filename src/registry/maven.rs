use super::{Coordinates, Registry, RetryPolicy, get_with_retry, http_error_message, metadata_url};
use crate::metadata::parse_maven_metadata;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

const AUTH_HINT: &str =
    "Pass --user and --password, or set MAVEN_VERSIONS_USER and MAVEN_VERSIONS_PASSWORD.";

/// Basic auth credentials for a repository.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Credentials from optional parts; present when either part is non-empty.
    pub fn from_parts(user: Option<String>, password: Option<String>) -> Option<Self> {
        let user = user.unwrap_or_default();
        let password = password.unwrap_or_default();
        if user.is_empty() && password.is_empty() {
            None
        } else {
            Some(Self { user, password })
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Maven 2 layout repository reached over HTTP.
pub struct MavenRepository {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
    retry: RetryPolicy,
}

impl MavenRepository {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("maven-versions/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            credentials: None,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Registry for MavenRepository {
    async fn fetch_versions(&self, coordinates: &Coordinates) -> Result<Vec<String>> {
        let url = metadata_url(&self.base_url, coordinates);
        info!("Retrieving maven-metadata.xml: {}", url);

        let response = get_with_retry(&self.client, &url, self.credentials.as_ref(), &self.retry)
            .await
            .with_context(|| format!("Failed to fetch versions for '{}'", coordinates))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No maven-metadata.xml for {} at {}", coordinates, url);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            bail!(
                "{}",
                http_error_message(status, "Artifact", &coordinates.to_string(), Some(AUTH_HINT))
            );
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {}", url))?;
        let versions = parse_maven_metadata(&body)?;
        debug!("Found {} version entries for {}", versions.len(), coordinates);

        Ok(versions)
    }

    fn name(&self) -> &'static str {
        "maven"
    }
}
