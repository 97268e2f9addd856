use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use maven_versions::cli::{Cli, OutputFormat};
use maven_versions::config::MavenVersionsConfig;
use maven_versions::output::{render_json, render_text};
use maven_versions::registry::{Coordinates, MavenRepository, Registry, VersionsFile, repository_url};
use maven_versions::retriever::retrieve_artifact_versions;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle no-color flag
    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the `--verbose` default.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let (registry, coordinates): (Box<dyn Registry>, Coordinates) = match &cli.versions_file {
        Some(path) => {
            let coordinates = cli
                .coordinates()
                .unwrap_or_else(|| Coordinates::new("local", path.display().to_string()));
            (Box::new(VersionsFile::new(path)), coordinates)
        }
        None => {
            let coordinates = cli
                .coordinates()
                .ok_or_else(|| anyhow!("Both --group and --name are required"))?;
            let url = repository_url(cli.repository_location(&config), &config.aliases)?;
            let repository = MavenRepository::new(url)?
                .with_credentials(cli.credentials())
                .with_retry(config.retry_policy());
            tracing::debug!("Using repository {}", repository.base_url());
            (Box::new(repository), coordinates)
        }
    };

    let retrieval = retrieve_artifact_versions(registry.as_ref(), &coordinates, &cli.bounds()).await?;

    if !retrieval.rejected.is_empty() && cli.verbose {
        eprintln!(
            "{}",
            format!(
                "Skipped {} invalid version(s) for {}",
                retrieval.rejected.len(),
                retrieval.coordinates
            )
            .yellow()
        );
    }

    match cli.format {
        OutputFormat::Text => {
            let color = !cli.no_color && std::io::stdout().is_terminal();
            print!("{}", render_text(&retrieval.versions, color));
        }
        OutputFormat::Json => println!("{}", render_json(&retrieval.versions)?),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<MavenVersionsConfig> {
    let cwd = std::env::current_dir()?;
    let (config, sources) =
        MavenVersionsConfig::load_layered(&cwd, cli.config.as_deref()).map_err(|e| anyhow!(e))?;

    for path in &sources {
        tracing::debug!("Using config file {}", path.display());
    }
    if !config.has_config() {
        tracing::debug!("No configuration set, using defaults");
    }

    Ok(config)
}
