//! Turning a flat list of raw version strings into release views.
//!
//! The pipeline is: parse every entry (bad entries are reported and skipped),
//! filter by optional numeric bounds, sort descending, then derive the
//! "latest", per-major, per-minor and merged views.

use crate::version::{Version, VersionError, compare_versions_desc};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::{debug, warn};

/// Numeric position used to pick the latest version of each major line.
pub const MAJOR_POSITION: NonZeroUsize = NonZeroUsize::new(2).expect("2 is non-zero");

/// Numeric position used to pick the latest version of each minor line.
pub const MINOR_POSITION: NonZeroUsize = NonZeroUsize::new(3).expect("3 is non-zero");

/// Keep the greatest version of every group that shares the numbers before
/// `pos`. Groups come out in the order their first member was seen.
pub fn last_version_by_number(versions: &[Version], pos: NonZeroUsize) -> Vec<Version> {
    let mut grouped: IndexMap<Vec<u64>, Version> = IndexMap::new();

    for version in versions {
        match grouped.entry(group_key(version, pos)) {
            Entry::Occupied(mut entry) => {
                if entry.get().compare_to(version).is_lt() {
                    entry.insert(version.clone());
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(version.clone());
            }
        }
    }

    grouped.into_values().collect()
}

/// Identifies the group of `version` at `pos`. Two versions share a key
/// exactly when
/// `without_suffix().without_number_at(pos + 1).with_number_at(pos, 0)`
/// gives them equal numbers: that is the first `pos - 1` numbers
/// zero-padded, so trailing zeros are dropped instead of padding out to
/// `pos`. The key never grows past the version's own length.
fn group_key(version: &Version, pos: NonZeroUsize) -> Vec<u64> {
    let mut key: Vec<u64> = version.numbers().into_iter().take(pos.get() - 1).collect();
    while key.last() == Some(&0) {
        key.pop();
    }
    key
}

/// A raw entry that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedVersion {
    pub index: usize,
    pub raw: String,
    pub error: VersionError,
}

/// Result of parsing a batch of raw version strings.
#[derive(Debug, Clone, Default)]
pub struct ParsedVersions {
    pub versions: Vec<Version>,
    pub rejected: Vec<RejectedVersion>,
}

/// Parse every entry independently. Blank and malformed entries are logged
/// with their index and collected in `rejected`; they never abort the batch.
pub fn parse_versions<I, S>(raw: I) -> ParsedVersions
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedVersions::default();

    for (index, text) in raw.into_iter().enumerate() {
        let text = text.as_ref();
        let error = match Version::parse(text) {
            Ok(Some(version)) => {
                parsed.versions.push(version);
                continue;
            }
            Ok(None) => VersionError::Empty,
            Err(e) => e,
        };

        warn!("Invalid version at index {}: {:?}: {}", index, text, error);
        parsed.rejected.push(RejectedVersion {
            index,
            raw: text.to_string(),
            error,
        });
    }

    parsed
}

/// Optional inclusive bounds on the numeric part of a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionBounds {
    pub min: Option<Version>,
    pub max: Option<Version>,
}

impl VersionBounds {
    pub fn new(min: Option<Version>, max: Option<Version>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// The candidate's suffix is ignored; the bounds are compared as given.
    pub fn contains(&self, candidate: &Version) -> bool {
        let candidate = candidate.without_suffix();
        if let Some(min) = &self.min
            && min.compare_to(&candidate).is_gt()
        {
            return false;
        }
        if let Some(max) = &self.max
            && max.compare_to(&candidate).is_lt()
        {
            return false;
        }
        true
    }
}

/// Every view derived from one artifact's version list.
///
/// Lists are ordered newest first. `unstable` is the full list, releases
/// included; the `*_and_latest_unstable` views are their stable counterpart
/// with at most one newer pre-release in front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactVersions {
    pub latest_stable: Option<Version>,
    pub latest_unstable: Option<Version>,
    pub stable: Vec<Version>,
    pub stable_and_latest_unstable: Vec<Version>,
    pub unstable: Vec<Version>,
    pub stable_majors: Vec<Version>,
    pub stable_majors_and_latest_unstable: Vec<Version>,
    pub unstable_majors: Vec<Version>,
    pub stable_minors: Vec<Version>,
    #[serde(rename = "stableMinorAndLatestUnstable")]
    pub stable_minors_and_latest_unstable: Vec<Version>,
    pub unstable_minors: Vec<Version>,
}

/// One named output view, borrowed from [`ArtifactVersions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Single(Option<&'a Version>),
    List(&'a [Version]),
}

impl ArtifactVersions {
    /// Parse, bound-filter and select in one go.
    pub fn resolve<I, S>(raw: I, bounds: &VersionBounds) -> (Self, Vec<RejectedVersion>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ParsedVersions { versions, rejected } = parse_versions(raw);
        let total = versions.len();

        let versions: Vec<Version> = if bounds.is_unbounded() {
            versions
        } else {
            versions.into_iter().filter(|v| bounds.contains(v)).collect()
        };
        debug!(
            "{} valid version(s), {} within bounds, {} rejected",
            total,
            versions.len(),
            rejected.len()
        );

        (Self::from_versions(versions), rejected)
    }

    pub fn from_versions(mut versions: Vec<Version>) -> Self {
        versions.sort_by(compare_versions_desc);

        let stable: Vec<Version> = versions.iter().filter(|v| v.is_release()).cloned().collect();
        let unstable = versions;

        let stable_majors = last_version_by_number(&stable, MAJOR_POSITION);
        let unstable_majors = last_version_by_number(&unstable, MAJOR_POSITION);
        let stable_minors = last_version_by_number(&stable, MINOR_POSITION);
        let unstable_minors = last_version_by_number(&unstable, MINOR_POSITION);

        let latest_stable = stable.first().cloned();
        let latest_unstable = unstable.first().cloned();

        // `unstable` holds releases too, so they are skipped explicitly here
        let newer_prerelease = match &latest_stable {
            Some(latest) => unstable
                .iter()
                .find(|v| !v.is_release() && v.compare_to(latest).is_gt()),
            None => unstable.iter().find(|v| !v.is_release()),
        };

        Self {
            stable_and_latest_unstable: prepend(newer_prerelease, &stable),
            stable_majors_and_latest_unstable: prepend(newer_prerelease, &stable_majors),
            stable_minors_and_latest_unstable: prepend(newer_prerelease, &stable_minors),
            latest_stable,
            latest_unstable,
            stable,
            unstable,
            stable_majors,
            unstable_majors,
            stable_minors,
            unstable_minors,
        }
    }

    /// All views keyed by their output name, in output order.
    pub fn views(&self) -> [(&'static str, View<'_>); 11] {
        [
            ("latestStable", View::Single(self.latest_stable.as_ref())),
            ("latestUnstable", View::Single(self.latest_unstable.as_ref())),
            ("stable", View::List(&self.stable)),
            ("stableAndLatestUnstable", View::List(&self.stable_and_latest_unstable)),
            ("unstable", View::List(&self.unstable)),
            ("stableMajors", View::List(&self.stable_majors)),
            (
                "stableMajorsAndLatestUnstable",
                View::List(&self.stable_majors_and_latest_unstable),
            ),
            ("unstableMajors", View::List(&self.unstable_majors)),
            ("stableMinors", View::List(&self.stable_minors)),
            (
                "stableMinorAndLatestUnstable",
                View::List(&self.stable_minors_and_latest_unstable),
            ),
            ("unstableMinors", View::List(&self.unstable_minors)),
        ]
    }
}

fn prepend(head: Option<&Version>, rest: &[Version]) -> Vec<Version> {
    head.into_iter().chain(rest).cloned().collect()
}
