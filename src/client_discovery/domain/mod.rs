pub mod client_result_set;
pub mod coordinates;
pub mod dependency_edge;
pub mod usage_page;

pub use client_result_set::{ClientResultSet, IncompleteTarget, TargetClients};
pub use coordinates::{ComponentIdentity, ComponentVersion, Coordinates};
pub use dependency_edge::DependencyEdge;
pub use usage_page::{UsagePage, UsageRow};
