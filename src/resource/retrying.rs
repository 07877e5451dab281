//! A resource that re-runs transient failures on a backoff timer.
//!
//! Each instance owns its retry bookkeeping. A manual `execute`, `reset`,
//! `cancel_retry` or dropping the instance releases any armed timer, and a
//! generation counter keeps a retry that is already running from scheduling
//! another one after it has been superseded.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::resource::hook::Resource;
use crate::resource::retry::{RetryPhase, RetryPolicy, RetryState};
use crate::resource::state::{AsyncState, Outcome};
use crate::resource::traits::AsyncResource;

struct RetryCell {
    state: RetryState,
    phase: RetryPhase,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    torn_down: bool,
}

impl RetryCell {
    /// Disarm the timer and start a fresh sequence
    fn supersede(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
        self.state.attempt = 0;
        self.phase = RetryPhase::Idle;
        self.generation
    }
}

struct Driver<P, T> {
    resource: Resource<P, T>,
    policy: RetryPolicy,
    cell: Mutex<RetryCell>,
}

impl<P, T> Driver<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn lock(&self) -> MutexGuard<'_, RetryCell> {
        self.cell.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn run(self: Arc<Self>, params: P, generation: u64) -> BoxFuture<'static, Outcome<T>> {
        async move {
            let outcome = self.resource.execute(params.clone()).await;
            self.after_attempt(&outcome, params, generation);
            outcome
        }
        .boxed()
    }

    fn after_attempt(self: &Arc<Self>, outcome: &Outcome<T>, params: P, generation: u64) {
        let mut cell = self.lock();
        if cell.generation != generation || cell.torn_down {
            return;
        }

        let Some(error) = outcome.error.as_deref() else {
            cell.state.attempt = 0;
            cell.phase = RetryPhase::Idle;
            return;
        };

        let decision = self.policy.decide(Some(error), cell.state.attempt);
        if !decision.should_retry {
            cell.phase = if self.policy.matches(error) {
                tracing::warn!(attempts = cell.state.attempt, error, "Giving up after transient failures");
                RetryPhase::GivenUp
            } else {
                RetryPhase::Idle
            };
            return;
        }

        cell.state.attempt += 1;
        let attempt = cell.state.attempt;
        cell.phase = RetryPhase::Scheduled {
            attempt,
            delay: decision.delay,
        };
        let delay_ms = u64::try_from(decision.delay.as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(attempt, delay_ms, "Scheduling retry");
        cell.pending = Some(self.schedule(params, generation, attempt, decision.delay));
    }

    fn schedule(self: &Arc<Self>, params: P, generation: u64, attempt: u32, delay: Duration) -> JoinHandle<()> {
        let driver = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut cell = driver.lock();
                if cell.generation != generation || cell.torn_down {
                    return;
                }
                cell.pending = None;
                cell.phase = RetryPhase::Invoking { attempt };
            }
            tracing::info!(attempt, "Retrying API call (attempt {})", attempt);
            driver.run(params, generation).await;
        })
    }
}

/// `Resource` plus automatic backoff retries for transient failures.
pub struct RetryingResource<P, T> {
    driver: Arc<Driver<P, T>>,
}

impl<P, T> RetryingResource<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(resource: Resource<P, T>, policy: RetryPolicy) -> Self {
        let max_attempts = policy.max_attempts;
        Self {
            driver: Arc::new(Driver {
                resource,
                policy,
                cell: Mutex::new(RetryCell {
                    state: RetryState::new(max_attempts),
                    phase: RetryPhase::Idle,
                    generation: 0,
                    pending: None,
                    torn_down: false,
                }),
            }),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.driver.policy
    }

    /// The wrapped resource; executing it directly bypasses retries
    pub fn resource(&self) -> &Resource<P, T> {
        &self.driver.resource
    }

    pub fn state(&self) -> AsyncState<T> {
        self.driver.resource.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<T>> {
        self.driver.resource.subscribe()
    }

    pub fn retry_state(&self) -> RetryState {
        self.driver.lock().state
    }

    pub fn retry_phase(&self) -> RetryPhase {
        self.driver.lock().phase
    }

    /// Manual trigger: cancels any armed retry and starts a new sequence
    pub async fn execute(&self, params: P) -> Outcome<T> {
        let generation = self.driver.lock().supersede();
        Arc::clone(&self.driver).run(params, generation).await
    }

    /// Release an armed retry timer without touching the resource state
    pub fn cancel_retry(&self) {
        let mut cell = self.driver.lock();
        if cell.pending.is_some() {
            log::debug!("Cancelling pending retry");
        }
        cell.supersede();
    }

    pub fn reset(&self) {
        self.cancel_retry();
        self.driver.resource.reset();
    }
}

impl<P, T> Drop for RetryingResource<P, T> {
    fn drop(&mut self) {
        let mut cell = self.driver.cell.lock().unwrap_or_else(|e| e.into_inner());
        cell.torn_down = true;
        if let Some(handle) = cell.pending.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl<P, T> AsyncResource<P, T> for RetryingResource<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn state(&self) -> AsyncState<T> {
        RetryingResource::state(self)
    }

    async fn execute(&self, params: P) -> Outcome<T> {
        RetryingResource::execute(self, params).await
    }

    fn reset(&self) {
        RetryingResource::reset(self)
    }
}
