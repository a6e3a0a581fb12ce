//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`WatchParams`]: polling intervals of the watch loop
//! - [`RetryPolicy`]: attempts and backoff around a participant invocation

pub mod retry_policy;
pub mod watch_params;

pub use retry_policy::RetryPolicy;
pub use watch_params::WatchParams;
