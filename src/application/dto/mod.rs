/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod client_report;
mod collector_settings;
mod output_format;

pub use client_report::ClientReport;
pub use collector_settings::CollectorSettings;
pub use output_format::OutputFormat;
