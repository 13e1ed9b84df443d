use clap::Parser;
use maven_clients::application::dto::OutputFormat;
use maven_clients::client_discovery::domain::Coordinates;
use std::path::PathBuf;

/// Artifact inspected when no coordinates are given
pub const DEFAULT_TARGET: &str = "org.sonarsource.sonarqube:sonar-plugin-api";

/// Find the published Maven artifacts that depend on a given artifact
///
/// Candidates are scraped from mvnrepository.com and each candidate version is
/// confirmed against the dependencies declared in its POM on Maven Central.
#[derive(Parser, Debug)]
#[command(name = "maven-clients")]
#[command(version)]
#[command(about = "Find the published Maven artifacts that depend on a given artifact", long_about = None)]
pub struct Args {
    /// group:artifact for every published version, or group:artifact:version for one
    #[arg(value_name = "COORDINATES", default_value = DEFAULT_TARGET)]
    pub coordinates: Coordinates,

    /// Output format: text or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./maven-clients.config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the Maven repository holding metadata and POMs
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,

    /// Base URL of the usage index
    #[arg(long, value_name = "URL")]
    pub usage_index_url: Option<String>,

    /// Requests per second sent to the Maven repository
    #[arg(long, value_name = "RATE")]
    pub metadata_rate: Option<f64>,

    /// Requests per second sent to the usage index
    #[arg(long, value_name = "RATE")]
    pub usage_index_rate: Option<f64>,

    /// Seconds to wait after a failed request before retrying
    #[arg(long, value_name = "SECONDS")]
    pub cooldown_secs: Option<u64>,

    /// Give up on a request after this many attempts (retries forever by default)
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Candidate versions verified at the same time
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Give up at once on rejected requests (4xx other than 408/429) instead of waiting out cooldowns
    #[arg(long)]
    pub fail_fast: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
