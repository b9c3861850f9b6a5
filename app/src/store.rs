//! Store wiring: hydration from storage and middleware attachment.
//!
//! This is the composition root a presentation layer consumes. It mirrors
//! the persisted layout described in [`crate::types`]: the tasks and filter
//! regions hydrate the initial state independently, and the middleware keeps
//! them in sync afterwards.

use std::collections::HashSet;
use std::sync::Arc;

use taskstore_persistence::{Region, StorageBackend, StorageGateway, StorageMiddleware};
use taskstore_runtime::Store;
use tokio::task::JoinHandle;

use crate::reducer::{AppAction, AppEnvironment, AppReducer};
use crate::types::{AppState, FiltersState, TasksState};
use crate::validation::validate;

/// The application store type
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Build the initial state from persisted snapshots.
///
/// Each region degrades independently: a missing or corrupt tasks region
/// yields an empty collection, a missing or corrupt filter region yields
/// the default filter. Loaded task entries that no longer satisfy
/// validation, or that duplicate an earlier id, are dropped with a warning
/// so the hydrated state carries the same invariants as live state.
pub fn preloaded_state<B: StorageBackend>(gateway: &StorageGateway<B>) -> AppState {
    let tasks = gateway
        .load::<TasksState>(Region::Tasks)
        .map(sanitize)
        .unwrap_or_default();
    let filters = gateway
        .load::<FiltersState>(Region::Filter)
        .unwrap_or_default();

    AppState { tasks, filters }
}

fn sanitize(mut tasks: TasksState) -> TasksState {
    let mut seen = HashSet::new();
    tasks.entities.retain(|task| {
        if let Err(e) = validate(&task.text) {
            tracing::warn!(id = %task.id, error = %e, "dropping persisted task with invalid text");
            return false;
        }
        if !seen.insert(task.id.clone()) {
            tracing::warn!(id = %task.id, "dropping persisted task with duplicate id");
            return false;
        }
        true
    });
    tasks
}

/// Construct a hydrated store with the persistence middleware attached.
///
/// Returns the store together with the middleware task handle; the task
/// ends on its own once every handle to the store is dropped. When storage
/// is unavailable the store still works fully in memory.
pub fn build_store<B: StorageBackend + 'static>(
    gateway: Arc<StorageGateway<B>>,
    environment: AppEnvironment,
) -> (AppStore, JoinHandle<()>) {
    let initial = preloaded_state(&gateway);
    let store = Store::new(initial, AppReducer::new(), environment);

    let persistence = StorageMiddleware::new(gateway).spawn(&store, |state: &AppState| {
        (state.tasks.clone(), state.filters)
    });

    (store, persistence)
}

/// Write the combined root-region snapshot (`{ tasks, filter }`).
///
/// The middleware keeps the per-slice regions current; this exports the
/// whole state in one blob, e.g. before shutdown or for backup.
pub fn persist_snapshot<B: StorageBackend>(
    gateway: &StorageGateway<B>,
    state: &AppState,
) -> bool {
    gateway.save(Region::Root, state)
}
