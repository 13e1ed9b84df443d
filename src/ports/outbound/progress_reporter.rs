/// ProgressReporter port for user-facing feedback during a collection run
///
/// Collection is slow by nature (rate-limited requests, cooldowns between
/// retries), so the use case reports each phase: version resolution, the
/// scrape of every target version and the verification of its candidates.
/// Log records go through `tracing`; this port is for the person watching.
pub trait ProgressReporter {
    /// Reports a phase or status line
    fn report(&self, message: &str);

    /// Reports how many candidate versions have been verified so far
    ///
    /// # Arguments
    /// * `current` - Candidates verified so far
    /// * `total` - Candidates queued for the current target version
    /// * `message` - Optional label, usually the candidate just checked
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning that does not stop the run
    fn report_error(&self, message: &str);

    /// Reports the end of a collection run
    fn report_completion(&self, message: &str);
}
