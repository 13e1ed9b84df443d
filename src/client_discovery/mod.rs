/// Client discovery domain - pure business logic
///
/// Coordinates, result sets, matching rules and retry policies. Nothing in
/// here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
