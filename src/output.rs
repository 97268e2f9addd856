//! Rendering of [`ArtifactVersions`] for the terminal.

use crate::selection::{ArtifactVersions, View};
use colored::Colorize;

/// One `key: a, b, c` line per view, in output order. Missing "latest"
/// values are left out; empty lists keep their line.
pub fn render_text(versions: &ArtifactVersions, color: bool) -> String {
    let mut out = String::new();

    for (key, view) in versions.views() {
        let value = match view {
            View::Single(None) => continue,
            View::Single(Some(version)) => version.to_string(),
            View::List(list) => list
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        };

        let key = if color {
            key.cyan().bold().to_string()
        } else {
            key.to_string()
        };

        if value.is_empty() {
            out.push_str(&format!("{}:\n", key));
        } else {
            out.push_str(&format!("{}: {}\n", key, value));
        }
    }

    out
}

/// Pretty JSON object with every view; missing "latest" values are `null`.
pub fn render_json(versions: &ArtifactVersions) -> serde_json::Result<String> {
    serde_json::to_string_pretty(versions)
}
