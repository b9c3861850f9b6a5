//! Domain types for the task list.
//!
//! Two independent state slices make up the application state: the ordered
//! task collection and the active view filter. Both slices serialize to the
//! exact JSON layout the persistence gateway stores:
//!
//! - tasks region: `{"entities": [{"id", "text", "completed"}, ...]}`
//! - filter region: `{"status": "all" | "active" | "completed"}`
//! - root region: `{"tasks": ..., "filter": ...}` (the combined snapshot,
//!   which is [`AppState`]'s own serialized form)

use serde::{Deserialize, Serialize};

/// Opaque unique identifier for a task.
///
/// Assigned once at creation (from the environment's id generator) and
/// immutable afterwards. Serializes as a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap an identifier string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable after creation
    pub id: TaskId,
    /// Trimmed task text; always satisfies validation
    pub text: String,
    /// Whether the task is completed
    pub completed: bool,
}

impl Task {
    /// Creates a new, not-yet-completed task
    #[must_use]
    pub const fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// The active view restriction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Show all tasks regardless of completion status
    #[default]
    All,
    /// Show only incomplete tasks
    Active,
    /// Show only completed tasks
    Completed,
}

impl Filter {
    /// Whether `task` satisfies this filter's predicate
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

/// State of the task slice: an ordered collection of tasks.
///
/// Insertion order is preserved and ids are unique by construction (the
/// reducer only ever appends freshly generated ids; hydration drops
/// duplicates).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksState {
    /// Tasks in insertion order
    pub entities: Vec<Task>,
}

impl TasksState {
    /// Creates an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Number of tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up a task by id
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.entities.iter().find(|t| &t.id == id)
    }

    /// Whether a task with `id` exists
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// The full ordered sequence
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.entities
    }

    /// Tasks satisfying `filter`, in collection order
    #[must_use]
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.entities.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Count of incomplete tasks
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entities.iter().filter(|t| !t.completed).count()
    }

    /// Count of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.entities.iter().filter(|t| t.completed).count()
    }
}

/// State of the filter slice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersState {
    /// Current active filter
    pub status: Filter,
}

/// Root application state: both slices.
///
/// Serializes to the root-region snapshot layout (`tasks` / `filter`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Task collection slice
    pub tasks: TasksState,
    /// Filter slice
    #[serde(rename = "filter")]
    pub filters: FiltersState,
}

impl AppState {
    /// The full ordered task sequence
    #[must_use]
    pub fn all_tasks(&self) -> &[Task] {
        self.tasks.all()
    }

    /// Tasks satisfying the given filter, in collection order
    #[must_use]
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.filtered(filter)
    }

    /// Tasks satisfying the currently active filter
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks.filtered(self.filters.status)
    }

    /// Count of incomplete tasks
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks.active_count()
    }

    /// Count of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.completed_count()
    }

    /// The currently active filter
    #[must_use]
    pub const fn current_filter(&self) -> Filter {
        self.filters.status
    }
}
