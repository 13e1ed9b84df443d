use crate::client_discovery::policies::RetryPolicy;
use crate::shared::error::CollectorError;
use crate::shared::rate_limiter::{METADATA_RATE, USAGE_INDEX_RATE};
use crate::shared::Result;

/// CollectorSettings - Tuning knobs for a collection run
///
/// Rates are in requests per second. `concurrency` bounds how many candidate
/// versions are verified at the same time; the limiters still pace the
/// actual requests.
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    pub metadata_rate: f64,
    pub usage_index_rate: f64,
    pub retry_policy: RetryPolicy,
    pub concurrency: usize,
}

impl CollectorSettings {
    /// Checks values that the limiters and the worker pool cannot accept.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(CollectorError::Validation {
                message: "concurrency must be at least 1".to_string(),
            }
            .into());
        }
        for (name, rate) in [
            ("metadata_rate", self.metadata_rate),
            ("usage_index_rate", self.usage_index_rate),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(CollectorError::Validation {
                    message: format!("{} must be a positive number, got {}", name, rate),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            metadata_rate: METADATA_RATE,
            usage_index_rate: USAGE_INDEX_RATE,
            retry_policy: RetryPolicy::default(),
            concurrency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CollectorSettings::default();
        assert_eq!(settings.metadata_rate, 2.5);
        assert_eq!(settings.usage_index_rate, 4.0);
        assert_eq!(settings.concurrency, 1);
        assert_eq!(settings.retry_policy.max_attempts(), None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let settings = CollectorSettings {
            concurrency: 0,
            ..CollectorSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let settings = CollectorSettings {
            usage_index_rate: 0.0,
            ..CollectorSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("usage_index_rate"));
    }
}
