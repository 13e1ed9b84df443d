//! maven-clients - find the published Maven artifacts that depend on a given artifact
//!
//! Candidate consumers are scraped from a web usage index (mvnrepository.com).
//! The index is incomplete and noisy, so every version of every candidate is
//! confirmed against the direct dependencies declared in its POM before it is
//! reported as a client.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`client_discovery`): Coordinates, result sets, matching and retry policy
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Errors, rate limiting and the temporary working context
//!
//! # Example
//!
//! ```no_run
//! use maven_clients::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let metadata_repository = MavenCentralRepository::new()?;
//! let usage_index = MvnRepositoryClient::new()?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = CollectClientsUseCase::new(
//!     metadata_repository,
//!     usage_index,
//!     progress_reporter,
//!     CollectorSettings::default(),
//! )?;
//!
//! // Execute
//! let identity: ComponentIdentity = "org.sonarsource.sonarqube:sonar-plugin-api".parse()?;
//! let results = use_case.collect_clients_of(&identity).await?;
//!
//! // Format output
//! let report = ClientReport::new(identity.to_string(), results);
//! println!("{}", TextFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod client_discovery;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{MavenCentralRepository, MvnRepositoryClient};
    pub use crate::application::dto::{ClientReport, CollectorSettings, OutputFormat};
    pub use crate::application::use_cases::CollectClientsUseCase;
    pub use crate::client_discovery::domain::{
        ClientResultSet, ComponentIdentity, ComponentVersion, Coordinates, DependencyEdge,
    };
    pub use crate::client_discovery::policies::{Backoff, RetryPolicy};
    pub use crate::ports::outbound::{
        ClientReportFormatter, MetadataRepository, OutputPresenter, ProgressReporter, UsageIndex,
    };
    pub use crate::shared::{RateLimiter, Result, WorkingContext};
}
