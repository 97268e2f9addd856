use thiserror::Error;

/// Errors raised while parsing or transforming a [`Version`](super::Version).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Version must not be empty")]
    Empty,

    #[error("Version doesn't match to {pattern}: {version}")]
    Format { pattern: &'static str, version: String },

    #[error("{0}")]
    Argument(String),
}

impl VersionError {
    pub(crate) fn format(version: &str) -> Self {
        Self::Format {
            pattern: super::parse::VERSION_PATTERN,
            version: version.to_string(),
        }
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }
}
