/// Adapters layer - Concrete implementations of the outbound ports
///
/// Maven Central and mvnrepository.com clients, the stderr progress
/// reporter, report formatters and output presenters.
pub mod outbound;
