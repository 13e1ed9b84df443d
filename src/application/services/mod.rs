/// Application services composing ports with the client discovery domain
mod dependency_verifier;
mod retrying_executor;
mod usage_scraper;
mod version_enumerator;

pub use dependency_verifier::DependencyVerifier;
pub use retrying_executor::RetryingExecutor;
pub use usage_scraper::UsageScraper;
pub use version_enumerator::VersionEnumerator;
