mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, RunOptions};
use maven_clients::adapters::outbound::console::StderrProgressReporter;
use maven_clients::adapters::outbound::network::{MavenCentralRepository, MvnRepositoryClient};
use maven_clients::application::dto::ClientReport;
use maven_clients::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use maven_clients::application::use_cases::CollectClientsUseCase;
use maven_clients::client_discovery::domain::Coordinates;
use maven_clients::shared::error::ExitCode;
use maven_clients::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "maven_clients=info";

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse_args();

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let config_file = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    let options = RunOptions::resolve(&args, config_file)?;
    tracing::debug!(?options, "resolved options");

    // Create adapters (Dependency Injection)
    let metadata_repository = MavenCentralRepository::with_base_url(&options.repository_url)?;
    let usage_index = MvnRepositoryClient::with_base_url(&options.usage_index_url)?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = CollectClientsUseCase::new(
        metadata_repository,
        usage_index,
        progress_reporter,
        options.collector,
    )?;

    let results = match &args.coordinates {
        Coordinates::Identity(identity) => use_case.collect_clients_of(identity).await?,
        Coordinates::Version(version) => use_case.collect_clients_of_version(version).await?,
    };
    let report = ClientReport::new(args.coordinates.to_string(), results);

    eprintln!("{}", FormatterFactory::progress_message(options.format));
    let output = FormatterFactory::create(options.format).format(&report)?;

    PresenterFactory::create(PresenterType::from_output(options.output)).present(&output)?;

    if report.results.is_complete() {
        Ok(ExitCode::Success)
    } else {
        tracing::warn!(
            incomplete = report.results.incomplete().len(),
            "some target versions could not be processed"
        );
        Ok(ExitCode::PartialResults)
    }
}
