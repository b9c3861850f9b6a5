//! Task list state container with throttled local persistence.
//!
//! A predictable state container for a todo task list: create, edit,
//! complete, delete, and filter short text tasks, with state persisted
//! across sessions through a key-value storage gateway. The presentation
//! layer (whatever renders the list) subscribes to the store, reads state
//! through selectors, and dispatches actions back into it.
//!
//! It demonstrates:
//!
//! - Two independent state slices (tasks, filter) with composed reducers
//! - Validation before mutation (invalid text never enters the collection)
//! - Throttled persistence middleware (bursts coalesce into one write)
//! - Hydration from persisted snapshots with graceful degradation
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskstore::{AppAction, AppEnvironment, FilterAction, TaskAction, build_store};
//! use taskstore::types::Filter;
//! use taskstore_persistence::{FileStorage, StorageGateway};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = FileStorage::new("/var/lib/taskstore")?;
//! let gateway = Arc::new(StorageGateway::new(backend));
//! let (store, _persistence) = build_store(gateway, AppEnvironment::default());
//!
//! // Create a task
//! store
//!     .send(AppAction::Tasks(TaskAction::Add {
//!         text: "Buy milk".to_string(),
//!     }))
//!     .await?;
//!
//! // Restrict the view
//! store
//!     .send(AppAction::Filters(FilterAction::Set(Filter::Active)))
//!     .await?;
//!
//! // Read state through selectors
//! let remaining = store.state(|s| s.active_count()).await;
//! println!("{remaining} items left");
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use reducer::{AppAction, AppEnvironment, AppReducer, FilterAction, TaskAction};
pub use store::{AppStore, build_store, persist_snapshot, preloaded_state};
pub use types::{AppState, Filter, FiltersState, Task, TaskId, TasksState};
pub use validation::{MAX_TASK_LENGTH, ValidationError, validate};
