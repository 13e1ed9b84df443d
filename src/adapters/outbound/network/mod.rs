/// Network adapters for the metadata repository and the usage index
mod maven_central_client;
mod maven_model;
mod mvnrepository_client;

pub use maven_central_client::{MavenCentralRepository, DEFAULT_REPOSITORY_URL};
pub use mvnrepository_client::{parse_usage_page, MvnRepositoryClient, DEFAULT_USAGE_INDEX_URL};
