//! # Taskstore Runtime
//!
//! Runtime implementation for the Taskstore architecture.
//!
//! This crate provides the [`Store`]: the authoritative, explicitly
//! constructible holder of application state. The store coordinates reducer
//! execution and broadcasts accepted transitions to observers (a persistence
//! middleware, a presentation layer, tests).
//!
//! ## Core Components
//!
//! - **Store**: owns state behind a lock and runs the reducer per action
//! - **Transition broadcast**: observers subscribe and are notified after
//!   every accepted transition
//!
//! ## Example
//!
//! ```ignore
//! use taskstore_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Dispatch an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;

use taskstore_core::reducer::Reducer;
use tokio::sync::{RwLock, broadcast};

/// Default capacity of the transition broadcast channel.
///
/// Observers that lag behind more than this many transitions will see
/// `RecvError::Lagged`; for coalescing observers (like the persistence
/// middleware) a lagged receive is just another "something changed" signal.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// The Store - runtime for reducer execution
///
/// The Store manages:
/// 1. State (behind `RwLock`, only ever mutated by the reducer)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Transition broadcasting (observer notification after accepted actions)
///
/// Dispatch is atomic: the reducer runs to completion under the write lock,
/// so no observer can see a transition mid-update. The broadcast happens
/// after the lock is released and never blocks the dispatch itself.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    /// Transition broadcast channel.
    ///
    /// Every accepted action is broadcast to observers after the state
    /// update completes. Rejected actions are not broadcast.
    transitions: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Uses [`DEFAULT_BROADCAST_CAPACITY`] for the transition channel;
    /// increase with [`Store::with_broadcast_capacity`] if observers
    /// frequently lag.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a new store with a custom transition broadcast capacity
    ///
    /// # Arguments
    ///
    /// - `initial_state`: The starting state for the store
    /// - `reducer`: The reducer implementation (business logic)
    /// - `environment`: Injected dependencies
    /// - `capacity`: Transition channel capacity (number of actions buffered)
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (transitions, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            transitions,
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. On acceptance, broadcasts the action to transition observers
    ///
    /// The reducer executes synchronously while holding the write lock, so
    /// concurrent `send` calls serialize at the reducer and every observer
    /// sees a consistent state after each notification.
    ///
    /// # Errors
    ///
    /// Returns the reducer's rejection (e.g. a validation failure) when the
    /// action is refused. State is unchanged and observers are not notified.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), R::Error> {
        tracing::debug!("Processing action");
        metrics::counter!("store.actions.total").increment(1);

        {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let start = std::time::Instant::now();
            let result = self
                .reducer
                .reduce(&mut state, action.clone(), self.environment.as_ref());
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            if let Err(rejection) = result {
                tracing::debug!("Action rejected by reducer");
                metrics::counter!("store.actions.rejected").increment(1);
                return Err(rejection);
            }
        }

        // Notify observers outside the lock. A send error just means there
        // are currently no subscribers, which is fine.
        let _ = self.transitions.send(action);

        tracing::trace!("Action accepted and broadcast");
        Ok(())
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure so the read lock is released promptly:
    ///
    /// ```ignore
    /// let task_count = store.state(|s| s.tasks.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to accepted transitions from this store
    ///
    /// Returns a receiver that gets a clone of every accepted action.
    /// Rejected actions are never delivered. If the receiver lags it will
    /// skip old actions and observe `RecvError::Lagged`; the channel closes
    /// when every clone of the store has been dropped.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<A> {
        self.transitions.subscribe()
    }

    /// Obtain a read-only handle to this store's state
    ///
    /// Unlike a store clone, a [`StateReader`] does not keep the transition
    /// channel alive, so background observers holding only a reader and a
    /// receiver terminate once every store handle is dropped.
    #[must_use]
    pub fn reader(&self) -> StateReader<S> {
        StateReader {
            state: Arc::clone(&self.state),
        }
    }
}

/// Read-only handle to a store's state.
///
/// Obtained from [`Store::reader`]. Shares the underlying state but holds
/// no sender half of the transition channel.
#[derive(Debug)]
pub struct StateReader<S> {
    state: Arc<RwLock<S>>,
}

impl<S> Clone for StateReader<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> StateReader<S> {
    /// Read current state via a closure, as [`Store::state`] does.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }
}

// Manual Clone: clones share state, reducer, environment, and the
// transition channel. Deriving would require S: Clone etc.
impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            transitions: self.transitions.clone(),
        }
    }
}
