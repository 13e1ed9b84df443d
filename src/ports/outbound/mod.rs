/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (metadata repository, usage index,
/// console, file system).
pub mod formatter;
pub mod metadata_repository;
pub mod output_presenter;
pub mod progress_reporter;
pub mod usage_index;

pub use formatter::ClientReportFormatter;
pub use metadata_repository::MetadataRepository;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use usage_index::UsageIndex;
