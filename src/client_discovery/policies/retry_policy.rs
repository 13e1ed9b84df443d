use crate::shared::error::CollectorError;
use std::fmt;
use std::time::Duration;

/// Cooldown applied after a failed call when nothing else is configured.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10);

/// Classifies an error as worth retrying (`true`) or fatal (`false`).
pub type RetryPredicate = fn(&anyhow::Error) -> bool;

/// Delay schedule between attempts.
///
/// The CLI and config file only set a fixed cooldown; `Exponential` is
/// available to library users building their own `RetryPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay after every failure
    Fixed(Duration),
    /// Delay doubles after every failure, starting at `initial` and capped at `max`
    Exponential { initial: Duration, max: Duration },
}

impl Backoff {
    /// Delay to wait after the `failures`-th consecutive failure (1-based).
    pub fn delay_for(&self, failures: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { initial, max } => {
                let exponent = failures.saturating_sub(1).min(31);
                initial.saturating_mul(1u32 << exponent).min(max)
            }
        }
    }
}

/// Retry policy for calls to external services.
///
/// The default treats every failure as temporary throttling: it retries
/// forever with a fixed 10 second cooldown. Bounded attempts, exponential
/// backoff and fail-fast classification are opt-in.
///
/// `CollectorError::Resolution` is an answer from the service ("no such
/// component"), not a failed call, and is never retried whatever the predicate says.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
    backoff: Backoff,
    is_retryable: RetryPredicate,
}

impl RetryPolicy {
    /// Unbounded attempts, fixed cooldown, everything retryable.
    pub fn indefinite() -> Self {
        Self {
            max_attempts: None,
            backoff: Backoff::Fixed(DEFAULT_COOLDOWN),
            is_retryable: retry_all,
        }
    }

    /// Caps the total number of attempts (first call included). Zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts.max(1));
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_predicate(mut self, is_retryable: RetryPredicate) -> Self {
        self.is_retryable = is_retryable;
        self
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    pub fn is_retryable(&self, error: &anyhow::Error) -> bool {
        let resolved = error
            .downcast_ref::<CollectorError>()
            .is_some_and(CollectorError::is_resolution);
        !resolved && (self.is_retryable)(error)
    }

    /// Whether another attempt should follow `attempts` failed ones ending in `error`.
    pub fn should_retry(&self, attempts: u32, error: &anyhow::Error) -> bool {
        let budget_left = self.max_attempts.map_or(true, |max| attempts < max);
        budget_left && self.is_retryable(error)
    }

    pub fn delay_for(&self, attempts: u32) -> Duration {
        self.backoff.delay_for(attempts)
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::indefinite()
    }
}

/// Predicate treating every failure as transient.
pub fn retry_all(_error: &anyhow::Error) -> bool {
    true
}

/// Predicate that gives up immediately on failures a cooldown will not fix.
///
/// Network errors, timeouts, 408, 429 and 5xx responses stay retryable, as do
/// errors of unknown origin. Any other status (403 included), unreadable
/// descriptors and invalid coordinates are fatal.
pub fn transient_only(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<CollectorError>() {
        Some(CollectorError::Fetch { .. }) | None => true,
        Some(CollectorError::UnexpectedStatus { status, .. }) => {
            matches!(status, 408 | 429 | 500..=599)
        }
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_error() -> anyhow::Error {
        CollectorError::Fetch {
            url: "https://repo1.maven.org".to_string(),
            details: "connection reset".to_string(),
        }
        .into()
    }

    fn resolution_error() -> anyhow::Error {
        CollectorError::Resolution {
            coordinates: "x:gone".to_string(),
            details: "HTTP 404".to_string(),
        }
        .into()
    }

    #[test]
    fn test_default_is_indefinite_fixed_cooldown() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), None);
        assert_eq!(policy.backoff(), Backoff::Fixed(Duration::from_secs(10)));
        assert!(policy.should_retry(1_000_000, &network_error()));
        assert_eq!(policy.delay_for(1), DEFAULT_COOLDOWN);
        assert_eq!(policy.delay_for(50), DEFAULT_COOLDOWN);
    }

    #[test]
    fn test_bounded_attempts() {
        let policy = RetryPolicy::indefinite().with_max_attempts(3);
        assert!(policy.should_retry(1, &network_error()));
        assert!(policy.should_retry(2, &network_error()));
        assert!(!policy.should_retry(3, &network_error()));
    }

    #[test]
    fn test_zero_max_attempts_means_single_attempt() {
        let policy = RetryPolicy::indefinite().with_max_attempts(0);
        assert_eq!(policy.max_attempts(), Some(1));
        assert!(!policy.should_retry(1, &network_error()));
    }

    fn status_error(status: u16) -> anyhow::Error {
        CollectorError::UnexpectedStatus {
            service: "Maven repository",
            status,
            url: "https://repo1.maven.org/maven2/x/a/maven-metadata.xml".to_string(),
        }
        .into()
    }

    #[test]
    fn test_resolution_is_never_retried() {
        for policy in [
            RetryPolicy::default(),
            RetryPolicy::indefinite().with_predicate(transient_only),
        ] {
            assert!(!policy.is_retryable(&resolution_error()));
            assert!(!policy.should_retry(1, &resolution_error()));
        }
    }

    #[test]
    fn test_transient_only_predicate() {
        let policy = RetryPolicy::indefinite().with_predicate(transient_only);
        assert!(policy.should_retry(1, &network_error()));
        assert!(policy.should_retry(1, &status_error(503)));
        assert!(policy.should_retry(1, &status_error(429)));
        assert!(policy.should_retry(1, &anyhow::anyhow!("unclassified failure")));
        assert!(!policy.should_retry(1, &status_error(403)));
        assert!(!policy.should_retry(1, &status_error(410)));
    }

    #[test]
    fn test_default_retries_every_status() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(1, &status_error(403)));
        assert!(policy.should_retry(1, &status_error(503)));
    }

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(10),
        };
        assert_eq!(backoff.delay_for(1), Duration::from_secs(1));
        assert_eq!(backoff.delay_for(2), Duration::from_secs(2));
        assert_eq!(backoff.delay_for(4), Duration::from_secs(8));
        assert_eq!(backoff.delay_for(5), Duration::from_secs(10));
        assert_eq!(backoff.delay_for(200), Duration::from_secs(10));
    }
}
