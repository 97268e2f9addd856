use crate::config::MavenVersionsConfig;
use crate::registry::{Coordinates, Credentials};
use crate::selection::VersionBounds;
use crate::version::Version;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Repository used when neither the command line nor the config names one.
pub const DEFAULT_REPOSITORY: &str = "central";

#[derive(Parser)]
#[command(name = "maven-versions")]
#[command(
    author,
    version,
    about = "List the stable, unstable, per-major and per-minor versions of a Maven artifact"
)]
pub struct Cli {
    /// Artifact group id (e.g. org.springframework)
    #[arg(
        short,
        long,
        env = "MAVEN_VERSIONS_GROUP",
        required_unless_present = "versions_file"
    )]
    pub group: Option<String>,

    /// Artifact id (e.g. spring-core)
    #[arg(
        short = 'a',
        long,
        env = "MAVEN_VERSIONS_NAME",
        required_unless_present = "versions_file"
    )]
    pub name: Option<String>,

    /// Repository URL or alias (central, oss-snapshots, or one from the config)
    #[arg(short, long, env = "MAVEN_VERSIONS_REPOSITORY", value_name = "URL")]
    pub repository: Option<String>,

    /// Repository user for basic auth
    #[arg(long, env = "MAVEN_VERSIONS_USER")]
    pub user: Option<String>,

    /// Repository password for basic auth
    #[arg(long, env = "MAVEN_VERSIONS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Lowest version to include; suffixes of candidates are ignored
    #[arg(long, env = "MAVEN_VERSIONS_MIN", value_name = "VERSION", value_parser = parse_bound)]
    pub min: Option<VersionBound>,

    /// Highest version to include; suffixes of candidates are ignored
    #[arg(long, env = "MAVEN_VERSIONS_MAX", value_name = "VERSION", value_parser = parse_bound)]
    pub max: Option<VersionBound>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read versions from a file (one per line, or maven-metadata.xml) instead of a repository
    #[arg(long, value_name = "FILE")]
    pub versions_file: Option<PathBuf>,

    /// Path to config file (default: auto-discover .maven-versions.toml or maven-versions.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A `--min`/`--max` value. Blank input means "no bound".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBound(pub Option<Version>);

fn parse_bound(s: &str) -> Result<VersionBound, String> {
    Version::parse(s)
        .map(VersionBound)
        .map_err(|e| e.to_string())
}

impl Cli {
    /// Coordinates from `--group` and `--name`, when both are given.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (&self.group, &self.name) {
            (Some(group), Some(name)) => Some(Coordinates::new(group.trim(), name.trim())),
            _ => None,
        }
    }

    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.user.clone(), self.password.clone())
    }

    pub fn bounds(&self) -> VersionBounds {
        let bound = |arg: &Option<VersionBound>| arg.as_ref().and_then(|b| b.0.clone());
        VersionBounds::new(bound(&self.min), bound(&self.max))
    }

    /// Repository location: command line, then config, then [`DEFAULT_REPOSITORY`].
    pub fn repository_location<'a>(&'a self, config: &'a MavenVersionsConfig) -> &'a str {
        self.repository
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .or(config.repository.as_deref())
            .unwrap_or(DEFAULT_REPOSITORY)
    }
}
