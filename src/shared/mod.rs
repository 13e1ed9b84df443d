/// Shared kernel - errors, result alias and cross-cutting utilities
pub mod error;
pub mod rate_limiter;
pub mod result;
pub mod security;
pub mod working_context;

pub use rate_limiter::RateLimiter;
pub use result::Result;
pub use working_context::WorkingContext;
