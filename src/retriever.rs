//! Fetch an artifact's versions from a [`Registry`] and build its views.

use crate::registry::{Coordinates, Registry};
use crate::selection::{ArtifactVersions, RejectedVersion, VersionBounds};
use anyhow::Result;
use tracing::info;

/// Outcome of one retrieval.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub coordinates: Coordinates,
    pub versions: ArtifactVersions,
    pub rejected: Vec<RejectedVersion>,
}

pub async fn retrieve_artifact_versions(
    registry: &dyn Registry,
    coordinates: &Coordinates,
    bounds: &VersionBounds,
) -> Result<Retrieval> {
    let raw = registry.fetch_versions(coordinates).await?;
    info!(
        "{} returned {} version entries for {}",
        registry.name(),
        raw.len(),
        coordinates
    );

    let (versions, rejected) = ArtifactVersions::resolve(&raw, bounds);

    Ok(Retrieval {
        coordinates: coordinates.clone(),
        versions,
        rejected,
    })
}
