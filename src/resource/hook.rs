//! Explicitly triggered wrapper around one async operation.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::resource::state::{AsyncState, Outcome, error_message};
use crate::resource::traits::AsyncResource;

type Operation<P, T> = Arc<dyn Fn(P) -> BoxFuture<'static, Result<T, String>> + Send + Sync>;

/// Which resolution is shown when several invocations overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Whichever invocation resolves last overwrites the state
    #[default]
    LastResolved,
    /// Results of invocations superseded by a newer `execute` are discarded
    LatestInvocation,
}

struct Tracking<T> {
    state: AsyncState<T>,
    in_flight: usize,
    issued: u64,
}

struct Inner<P, T> {
    operation: Operation<P, T>,
    resolution: Resolution,
    tracking: Mutex<Tracking<T>>,
    tx: watch::Sender<AsyncState<T>>,
}

/// Tracked state for one async operation bound at construction.
///
/// Nothing runs until `execute` is called. Clones share the same state.
pub struct Resource<P, T> {
    inner: Arc<Inner<P, T>>,
}

impl<P, T> Clone for Resource<P, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, T> Resource<P, T>
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut, E>(operation: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        Self::with_resolution(operation, Resolution::default())
    }

    pub fn with_resolution<F, Fut, E>(operation: F, resolution: Resolution) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let operation: Operation<P, T> = Arc::new(move |params| {
            let fut = operation(params);
            async move { fut.await.map_err(|e| error_message(&e)) }.boxed()
        });
        let (tx, _rx) = watch::channel(AsyncState::rest());

        Self {
            inner: Arc::new(Inner {
                operation,
                resolution,
                tracking: Mutex::new(Tracking {
                    state: AsyncState::rest(),
                    in_flight: 0,
                    issued: 0,
                }),
                tx,
            }),
        }
    }

    pub fn state(&self) -> AsyncState<T> {
        self.lock().state.clone()
    }

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<AsyncState<T>> {
        self.inner.tx.subscribe()
    }

    /// Run the operation and record its result.
    ///
    /// Prior `data` stays visible while the call is pending.
    pub async fn execute(&self, params: P) -> Outcome<T> {
        let ticket = self.begin();
        let mut guard = InFlight {
            resource: self,
            settled: false,
        };

        let result = (self.inner.operation)(params).await;

        guard.settled = true;
        self.settle(ticket, result)
    }

    /// Back to rest. In-flight calls still apply their result when they land.
    pub fn reset(&self) {
        let mut tracking = self.lock();
        tracking.state = AsyncState::rest();
        self.publish(&tracking);
    }

    fn begin(&self) -> u64 {
        let mut tracking = self.lock();
        tracking.issued += 1;
        tracking.in_flight += 1;
        tracking.state.loading = true;
        tracking.state.error = None;
        self.publish(&tracking);
        log::debug!("Resource invocation {} started ({} in flight)", tracking.issued, tracking.in_flight);
        tracking.issued
    }

    fn settle(&self, ticket: u64, result: Result<T, String>) -> Outcome<T> {
        let mut tracking = self.lock();
        tracking.in_flight = tracking.in_flight.saturating_sub(1);

        let stale = self.inner.resolution == Resolution::LatestInvocation && ticket < tracking.issued;
        if stale {
            log::debug!("Discarding result of superseded invocation {}", ticket);
        } else {
            match &result {
                Ok(data) => {
                    tracking.state.data = Some(data.clone());
                    tracking.state.error = None;
                }
                Err(message) => {
                    log::warn!("Resource invocation {} failed: {}", ticket, message);
                    tracking.state.data = None;
                    tracking.state.error = Some(message.clone());
                }
            }
        }
        tracking.state.loading = tracking.in_flight > 0;
        self.publish(&tracking);

        match result {
            Ok(data) => Outcome::success(data),
            Err(message) => Outcome::failure(message),
        }
    }

    fn abandon(&self) {
        let mut tracking = self.lock();
        tracking.in_flight = tracking.in_flight.saturating_sub(1);
        tracking.state.loading = tracking.in_flight > 0;
        self.publish(&tracking);
    }

    fn publish(&self, tracking: &Tracking<T>) {
        self.inner.tx.send_replace(tracking.state.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Tracking<T>> {
        self.inner.tracking.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Keeps the in-flight count honest if an `execute` future is dropped early.
struct InFlight<'a, P, T>
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    resource: &'a Resource<P, T>,
    settled: bool,
}

impl<P, T> Drop for InFlight<'_, P, T>
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.settled {
            self.resource.abandon();
        }
    }
}

#[async_trait]
impl<P, T> AsyncResource<P, T> for Resource<P, T>
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn state(&self) -> AsyncState<T> {
        Resource::state(self)
    }

    async fn execute(&self, params: P) -> Outcome<T> {
        Resource::execute(self, params).await
    }

    fn reset(&self) {
        Resource::reset(self)
    }
}

impl<P, T: std::fmt::Debug + Clone> std::fmt::Debug for Resource<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tracking = self.inner.tracking.lock().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("Resource")
            .field("state", &tracking.state)
            .field("in_flight", &tracking.in_flight)
            .field("resolution", &self.inner.resolution)
            .finish()
    }
}
