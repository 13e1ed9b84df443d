use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str = "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Messages go to stderr so they never mix with the report on stdout.
/// Candidate verification is shown as an indicatif bar; a new bar starts
/// whenever a series with a different total begins.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn bar_for(&self, total: usize) -> ProgressBar {
        let mut current = self.progress_bar.borrow_mut();
        if let Some(bar) = current.as_ref() {
            if !bar.is_finished() && bar.length() == Some(total as u64) {
                return bar.clone();
            }
            bar.finish_and_clear();
        }

        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("=>-"));
        *current = Some(bar.clone());
        bar
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.progress_bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.clear_bar();
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let bar = self.bar_for(total);
        bar.set_position(current as u64);
        if let Some(message) = message {
            bar.set_message(message.to_string());
        }
        if current >= total {
            self.clear_bar();
        }
    }

    fn report_error(&self, message: &str) {
        self.clear_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.clear_bar();
        eprintln!();
        eprintln!("✅ {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_lifecycle() {
        let reporter = StderrProgressReporter::new();
        reporter.report("Resolving versions");
        reporter.report_progress(1, 3, Some("x:a:1.0"));
        assert!(reporter.progress_bar.borrow().is_some());

        reporter.report_progress(3, 3, Some("x:a:1.2"));
        assert!(reporter.progress_bar.borrow().is_none());

        reporter.report_error("Warning");
        reporter.report_completion("Found 0 clients");
    }

    #[test]
    fn test_new_series_replaces_bar() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 5, None);
        reporter.report_progress(1, 2, None);

        let bar = reporter.progress_bar.borrow();
        assert_eq!(bar.as_ref().and_then(|bar| bar.length()), Some(2));
    }
}
