/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound (driven) ports exist: the use case is called directly by
/// the CLI and by library users.
pub mod outbound;
