//! Version model and ordering.
//!
//! Versions are parsed leniently enough to accept Maven-style
//! (`5.2.0.RELEASE`, `2.0-M1`), semver-style (`1.2.3-rc.4`) and ad-hoc
//! suffixed (`2.5.6.SEC01`) strings alike. Ordering compares the numeric
//! prefix first and falls back to qualifier-aware suffix comparison.

mod error;
mod model;
mod ordering;
mod parse;

pub use error::VersionError;
pub use model::{MAX_POSITION, Version};
pub use ordering::{
    ALPHA_ORDER, BETA_ORDER, DEV_ORDER, MILESTONE_ORDER, NIGHTLY_ORDER, RC_ORDER, RELEASE_ORDER,
    SNAPSHOT_ORDER, SP_ORDER, UNQUALIFIED_ORDER, compare_numbers, compare_suffix_tokens,
    qualifier_order, tokens_order,
};
pub use parse::{
    SuffixToken, VERSION_PATTERN, VersionMatch, match_version, parse_numbers,
    parse_numbers_string, parse_suffix_string, parse_suffix_tokens,
};

use std::cmp::Ordering;

/// Ascending comparator, usable with `sort_by`.
pub fn compare_versions(a: &Version, b: &Version) -> Ordering {
    a.compare_to(b)
}

/// Descending comparator, usable with `sort_by`.
pub fn compare_versions_desc(a: &Version, b: &Version) -> Ordering {
    b.compare_to(a)
}
