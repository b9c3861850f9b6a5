//! Throttled persistence middleware.
//!
//! [`StorageMiddleware`] observes a store's transition broadcast and keeps
//! the tasks and filter regions of storage in sync with the latest state.
//! Writes are coalesced: the first transition after a write arms a single
//! pending timer (Idle → Pending), every further transition inside the
//! window is absorbed, and when the timer fires the middleware reads the
//! latest state and performs exactly one write per region (Pending → Idle).
//!
//! Dispatch is never blocked or delayed by persistence: the middleware runs
//! on its own task, strictly after transitions complete. A failed save is
//! reported and the timer slot still returns to Idle, so the next
//! transition schedules a fresh attempt.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use taskstore_core::reducer::Reducer;
use taskstore_runtime::Store;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::JoinHandle;

use crate::backend::StorageBackend;
use crate::gateway::{Region, StorageGateway};

/// Fixed delay between a transition and the durable write it schedules.
///
/// Transitions arriving within one window coalesce into a single write.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(300);

/// Middleware that persists store state through a [`StorageGateway`],
/// throttling bursts of transitions into one write per window.
pub struct StorageMiddleware<B> {
    gateway: Arc<StorageGateway<B>>,
    throttle: Duration,
}

impl<B> StorageMiddleware<B>
where
    B: StorageBackend + 'static,
{
    /// Create a middleware over `gateway` with [`DEFAULT_THROTTLE`].
    #[must_use]
    pub fn new(gateway: Arc<StorageGateway<B>>) -> Self {
        Self {
            gateway,
            throttle: DEFAULT_THROTTLE,
        }
    }

    /// Override the throttle window (mainly for tests).
    #[must_use]
    pub const fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Start observing `store` and persisting its state.
    ///
    /// `snapshot` projects the two persisted slices out of the state; it is
    /// called with the latest state each time the pending timer fires, so a
    /// burst of transitions is captured by its final state.
    ///
    /// The returned task runs until every handle to the store is dropped.
    /// If storage is unavailable when spawning, a warning is emitted and
    /// the application continues fully functional in memory; each write
    /// attempt still probes, so storage that becomes healthy later is
    /// picked up.
    pub fn spawn<S, A, E, R, T, F, Snap>(
        self,
        store: &Store<S, A, E, R>,
        snapshot: Snap,
    ) -> JoinHandle<()>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        S: Send + Sync + 'static,
        A: Send + Clone + 'static,
        E: Send + Sync + 'static,
        Snap: Fn(&S) -> (T, F) + Send + Sync + 'static,
        T: Serialize + Send + 'static,
        F: Serialize + Send + 'static,
    {
        if !self.gateway.is_available() {
            tracing::warn!("storage is not available - state persistence will not work");
        }

        let gateway = self.gateway;
        let throttle = self.throttle;
        let mut rx = store.subscribe();
        let reader = store.reader();

        tokio::spawn(async move {
            loop {
                // Idle: wait for the first transition since the last write.
                // A lagged receive still means "something changed".
                match rx.recv().await {
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }

                // Pending: let the window elapse, absorbing every
                // transition that lands inside it.
                tokio::time::sleep(throttle).await;
                let mut closed = false;
                loop {
                    match rx.try_recv() {
                        Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Closed) => {
                            closed = true;
                            break;
                        }
                    }
                }

                // The snapshot sees the latest state, not the state at the
                // moment the timer was armed.
                let (tasks, filter) = reader.read(|state| snapshot(state)).await;

                // Save the two slices independently; a failure in one does
                // not block the other, and either failure has already been
                // reported by the gateway.
                let tasks_saved = gateway.save(Region::Tasks, &tasks);
                let filter_saved = gateway.save(Region::Filter, &filter);
                if tasks_saved && filter_saved {
                    tracing::debug!("persisted state to storage");
                }

                if closed {
                    break;
                }
            }

            tracing::debug!("storage middleware stopped");
        })
    }
}
