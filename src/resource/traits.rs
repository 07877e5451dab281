//! Capability set shared by async resource implementations.

use async_trait::async_trait;

use crate::resource::state::{AsyncState, Outcome};

/// Anything that tracks one async operation and can be triggered and reset.
///
/// Pages hold resources through this trait so a plain `Resource` and a
/// `RetryingResource` are interchangeable.
#[async_trait]
pub trait AsyncResource<P, T>: Send + Sync
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Current snapshot of the tracked state
    fn state(&self) -> AsyncState<T>;

    /// Run the operation with `params`; failures become state, never errors
    async fn execute(&self, params: P) -> Outcome<T>;

    /// Return to rest without cancelling anything already in flight
    fn reset(&self);

    fn is_loading(&self) -> bool {
        self.state().loading
    }

    fn data(&self) -> Option<T> {
        self.state().data
    }

    fn error(&self) -> Option<String> {
        self.state().error
    }
}
