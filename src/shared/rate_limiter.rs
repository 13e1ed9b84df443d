use crate::shared::error::CollectorError;
use crate::shared::Result;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

/// Sustained rate for the metadata backend (Maven Central), in operations per second.
/// Found empirically; faster than this and the repository starts refusing us.
pub const METADATA_RATE: f64 = 2.5;

/// Sustained rate for the usage index (mvnrepository.com), in operations per second.
pub const USAGE_INDEX_RATE: f64 = 4.0;

type DirectLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token-bucket pacing for one external service.
///
/// One instance exists per service and is shared (behind an `Arc`) by every
/// component talking to that service. The bucket holds a single token, so
/// bursts are limited to one request on top of the sustained rate.
pub struct RateLimiter {
    service: String,
    rate: f64,
    inner: DirectLimiter,
}

impl RateLimiter {
    /// Creates a limiter admitting `rate` operations per second.
    ///
    /// # Errors
    /// Returns a validation error when `rate` is not a positive finite number
    /// or is too high to be represented as a replenish period.
    pub fn per_second(service: impl Into<String>, rate: f64) -> Result<Self> {
        let service = service.into();
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CollectorError::Validation {
                message: format!("Rate for {} must be positive, got {}", service, rate),
            }
            .into());
        }

        let quota = Quota::with_period(Duration::from_secs_f64(1.0 / rate))
            .ok_or_else(|| CollectorError::Validation {
                message: format!("Rate for {} is too high: {}", service, rate),
            })?
            .allow_burst(NonZeroU32::MIN);

        Ok(Self {
            service,
            rate,
            inner: governor::RateLimiter::direct(quota),
        })
    }

    /// Waits until the next request to this service is permitted.
    pub async fn acquire(&self) {
        self.inner.until_ready().await;
    }

}

#[cfg(test)]
impl RateLimiter {
    /// Takes a token if one is available right now.
    fn try_acquire(&self) -> bool {
        self.inner.check().is_ok()
    }

    fn service(&self) -> &str {
        &self.service
    }

    fn rate(&self) -> f64 {
        self.rate
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("service", &self.service)
            .field("rate", &self.rate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_rejects_non_positive_rates() {
        assert!(RateLimiter::per_second("test", 0.0).is_err());
        assert!(RateLimiter::per_second("test", -1.0).is_err());
        assert!(RateLimiter::per_second("test", f64::NAN).is_err());
        assert!(RateLimiter::per_second("test", f64::INFINITY).is_err());
    }

    #[test]
    fn test_default_rates() {
        let metadata = RateLimiter::per_second("Maven Central", METADATA_RATE).unwrap();
        let index = RateLimiter::per_second("mvnrepository.com", USAGE_INDEX_RATE).unwrap();
        assert_eq!(metadata.rate(), 2.5);
        assert_eq!(index.rate(), 4.0);
        assert_eq!(metadata.service(), "Maven Central");
    }

    #[test]
    fn test_burst_is_a_single_token() {
        let limiter = RateLimiter::per_second("test", 1.0).unwrap();
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_acquire_paces_requests() {
        let limiter = RateLimiter::per_second("test", 20.0).unwrap();
        let started = Instant::now();

        for _ in 0..5 {
            limiter.acquire().await;
        }

        // First token is immediate, the next four wait 50ms each
        assert!(started.elapsed() >= Duration::from_millis(180));
    }
}
