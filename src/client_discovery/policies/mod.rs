pub mod retry_policy;

pub use retry_policy::{retry_all, transient_only, Backoff, RetryPolicy, RetryPredicate};
