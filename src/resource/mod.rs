//! Async resources - tracked state for one remote operation
//!
//! This module provides:
//! - `AsyncState` / `Outcome` snapshot types
//! - `Resource`, an explicitly triggered wrapper around one async operation
//! - `AsyncResource`, the capability set shared by resource implementations
//! - `RetryPolicy`, a pure backoff decision for transient failures
//! - `RetryingResource`, a resource that re-runs transient failures on a timer

pub mod hook;
pub mod retry;
pub mod retrying;
pub mod state;
pub mod traits;

pub use hook::{Resolution, Resource};
pub use retry::{RetryDecision, RetryPhase, RetryPolicy, RetryState};
pub use retrying::RetryingResource;
pub use state::{AsyncState, FALLBACK_ERROR_MESSAGE, Outcome, Phase, error_message};
pub use traits::AsyncResource;
