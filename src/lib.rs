pub mod cli;
pub mod config;
pub mod metadata;
pub mod output;
pub mod registry;
pub mod retriever;
pub mod selection;
pub mod version;

pub use cli::{Cli, OutputFormat};
pub use config::MavenVersionsConfig;
pub use registry::{Coordinates, MavenRepository, Registry, VersionsFile};
pub use retriever::{Retrieval, retrieve_artifact_versions};
pub use selection::{ArtifactVersions, VersionBounds};
pub use version::{Version, VersionError};
