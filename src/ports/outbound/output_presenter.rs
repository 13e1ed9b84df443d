use crate::shared::Result;

/// OutputPresenter port for delivering the formatted client report
///
/// Implemented for stdout and for a file given with `--output`.
pub trait OutputPresenter {
    /// Writes the formatted report to its destination
    ///
    /// # Errors
    /// Returns an error when the destination cannot be written. File
    /// destinations report `CollectorError::FileWriteError`, which also covers
    /// symbolic links and missing parent directories.
    fn present(&self, content: &str) -> Result<()>;
}
