//! Reducer logic for the task and filter slices.
//!
//! Each slice has its own reducer; [`AppReducer`] composes them over the
//! root state so a single store dispatches both kinds of action. All
//! reducers are pure: validation happens before mutation, a rejected action
//! leaves state untouched, and operations on unknown ids are silent no-ops
//! (a stale view referencing a deleted task must not crash anything).

use std::convert::Infallible;
use std::sync::Arc;

use taskstore_core::environment::{IdGenerator, UuidGenerator};
use taskstore_core::reducer::Reducer;

use crate::types::{AppState, Filter, FiltersState, Task, TaskId, TasksState};
use crate::validation::{ValidationError, validate};

/// Environment dependencies for the application reducers
#[derive(Clone)]
pub struct AppEnvironment {
    /// Generator for new task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl Default for AppEnvironment {
    /// Production environment: random UUID task ids
    fn default() -> Self {
        Self::new(Arc::new(UuidGenerator))
    }
}

/// Actions on the task collection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskAction {
    /// Append a new task with the given text (validated, then trimmed)
    Add {
        /// Raw text as entered; validation sees it untrimmed
        text: String,
    },
    /// Flip the completed flag of the task with `id`
    Toggle {
        /// Task to toggle
        id: TaskId,
    },
    /// Replace the text of the task with `id` (validated, then trimmed)
    Edit {
        /// Task to edit
        id: TaskId,
        /// Raw replacement text
        text: String,
    },
    /// Remove the task with `id`
    Delete {
        /// Task to remove
        id: TaskId,
    },
}

/// Actions on the filter slice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterAction {
    /// Replace the active filter unconditionally
    Set(Filter),
}

/// Root action type: either slice's actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Task slice action
    Tasks(TaskAction),
    /// Filter slice action
    Filters(FilterAction),
}

impl From<TaskAction> for AppAction {
    fn from(action: TaskAction) -> Self {
        Self::Tasks(action)
    }
}

impl From<FilterAction> for AppAction {
    fn from(action: FilterAction) -> Self {
        Self::Filters(action)
    }
}

/// Reducer for the task collection slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TasksReducer;

impl TasksReducer {
    /// Creates a new `TasksReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TasksReducer {
    type State = TasksState;
    type Action = TaskAction;
    type Environment = AppEnvironment;
    type Error = ValidationError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<(), Self::Error> {
        match action {
            TaskAction::Add { text } => {
                // Validate the untrimmed input first; only then trim.
                validate(&text)?;
                let id = TaskId::new(env.ids.generate());
                state.entities.push(Task::new(id, text.trim().to_string()));
                Ok(())
            }

            TaskAction::Toggle { id } => {
                if let Some(task) = state.entities.iter_mut().find(|t| t.id == id) {
                    task.completed = !task.completed;
                }
                Ok(())
            }

            TaskAction::Edit { id, text } => {
                validate(&text)?;
                if let Some(task) = state.entities.iter_mut().find(|t| t.id == id) {
                    task.text = text.trim().to_string();
                }
                Ok(())
            }

            TaskAction::Delete { id } => {
                state.entities.retain(|t| t.id != id);
                Ok(())
            }
        }
    }
}

/// Reducer for the filter slice
#[derive(Clone, Copy, Debug, Default)]
pub struct FiltersReducer;

impl FiltersReducer {
    /// Creates a new `FiltersReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for FiltersReducer {
    type State = FiltersState;
    type Action = FilterAction;
    type Environment = ();
    type Error = Infallible;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Result<(), Self::Error> {
        match action {
            FilterAction::Set(filter) => {
                state.status = filter;
                Ok(())
            }
        }
    }
}

/// Root reducer delegating to the slice reducers
#[derive(Clone, Copy, Debug, Default)]
pub struct AppReducer {
    tasks: TasksReducer,
    filters: FiltersReducer,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: TasksReducer::new(),
            filters: FiltersReducer::new(),
        }
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;
    type Error = ValidationError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<(), Self::Error> {
        match action {
            AppAction::Tasks(action) => self.tasks.reduce(&mut state.tasks, action, env),
            AppAction::Filters(action) => {
                match self.filters.reduce(&mut state.filters, action, &()) {
                    Ok(()) => Ok(()),
                    Err(never) => match never {},
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskstore_testing::{ReducerTest, SequentialIds};

    fn test_env() -> AppEnvironment {
        AppEnvironment::new(Arc::new(SequentialIds::new()))
    }

    fn existing(id: &str, text: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn add_appends_a_trimmed_uncompleted_task() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState::new())
            .when_action(TaskAction::Add {
                text: "  Buy milk  ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                let task = &state.entities[0];
                assert_eq!(task.id.as_str(), "task-1");
                assert_eq!(task.text, "Buy milk");
                assert!(!task.completed);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn add_preserves_prior_entries_and_order() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![existing("a", "First", false), existing("b", "Second", true)],
            })
            .when_action(TaskAction::Add {
                text: "Third".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 3);
                let ids: Vec<&str> = state.all().iter().map(|t| t.id.as_str()).collect();
                assert_eq!(ids, vec!["a", "b", "task-1"]);
                assert_eq!(state.entities[0].text, "First");
                assert!(state.entities[1].completed);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn add_rejects_whitespace_only_text_without_mutating() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![existing("a", "Buy milk", false)],
            })
            .when_action(TaskAction::Add {
                text: "  ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.entities[0].text, "Buy milk");
            })
            .then_error(|e| {
                assert_eq!(*e, ValidationError::WhitespaceOnly);
            })
            .run();
    }

    #[test]
    fn add_rejects_empty_text() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState::new())
            .when_action(TaskAction::Add {
                text: String::new(),
            })
            .then_state(|state| assert!(state.is_empty()))
            .then_error(|e| assert_eq!(*e, ValidationError::Empty))
            .run();
    }

    #[test]
    fn toggle_flips_completed() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![existing("1", "A", false)],
            })
            .when_action(TaskAction::Toggle {
                id: TaskId::from("1"),
            })
            .then_state(|state| {
                assert!(state.entities[0].completed);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn toggle_is_self_inverse() {
        let env = test_env();
        let reducer = TasksReducer::new();
        let mut state = TasksState {
            entities: vec![existing("1", "A", false)],
        };

        let action = TaskAction::Toggle {
            id: TaskId::from("1"),
        };
        reducer.reduce(&mut state, action.clone(), &env).unwrap();
        reducer.reduce(&mut state, action, &env).unwrap();

        assert!(!state.entities[0].completed);
    }

    #[test]
    fn toggle_unknown_id_is_a_silent_noop() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![existing("1", "A", false)],
            })
            .when_action(TaskAction::Toggle {
                id: TaskId::from("missing"),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert!(!state.entities[0].completed);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn edit_replaces_text_trimmed() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![existing("1", "A", true)],
            })
            .when_action(TaskAction::Edit {
                id: TaskId::from("1"),
                text: "  New text  ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.entities[0].text, "New text");
                // Editing does not touch the completed flag.
                assert!(state.entities[0].completed);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn edit_validates_before_looking_up_the_id() {
        // Invalid text is rejected even when the id does not exist.
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState::new())
            .when_action(TaskAction::Edit {
                id: TaskId::from("missing"),
                text: " ".to_string(),
            })
            .then_error(|e| assert_eq!(*e, ValidationError::WhitespaceOnly))
            .run();
    }

    #[test]
    fn edit_unknown_id_is_a_silent_noop() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![existing("1", "A", false)],
            })
            .when_action(TaskAction::Edit {
                id: TaskId::from("missing"),
                text: "Valid".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.entities[0].text, "A");
            })
            .then_ok()
            .run();
    }

    #[test]
    fn delete_removes_exactly_one_entry() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![
                    existing("1", "A", false),
                    existing("2", "B", true),
                    existing("3", "C", false),
                ],
            })
            .when_action(TaskAction::Delete {
                id: TaskId::from("2"),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                let ids: Vec<&str> = state.all().iter().map(|t| t.id.as_str()).collect();
                assert_eq!(ids, vec!["1", "3"]);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn delete_unknown_id_is_a_silent_noop() {
        ReducerTest::new(TasksReducer::new())
            .with_env(test_env())
            .given_state(TasksState {
                entities: vec![existing("1", "A", false)],
            })
            .when_action(TaskAction::Delete {
                id: TaskId::from("missing"),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.entities[0].id.as_str(), "1");
            })
            .then_ok()
            .run();
    }

    #[test]
    fn set_filter_replaces_unconditionally() {
        ReducerTest::new(FiltersReducer::new())
            .with_env(())
            .given_state(FiltersState::default())
            .when_action(FilterAction::Set(Filter::Completed))
            .then_state(|state| {
                assert_eq!(state.status, Filter::Completed);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn app_reducer_routes_to_both_slices() {
        let env = test_env();
        let reducer = AppReducer::new();
        let mut state = AppState::default();

        reducer
            .reduce(
                &mut state,
                AppAction::Tasks(TaskAction::Add {
                    text: "Buy milk".to_string(),
                }),
                &env,
            )
            .unwrap();
        reducer
            .reduce(
                &mut state,
                AppAction::Filters(FilterAction::Set(Filter::Active)),
                &env,
            )
            .unwrap();

        assert_eq!(state.all_tasks().len(), 1);
        assert_eq!(state.current_filter(), Filter::Active);
    }

    #[test]
    fn toggled_task_moves_between_filtered_views() {
        let env = test_env();
        let reducer = AppReducer::new();
        let mut state = AppState {
            tasks: TasksState {
                entities: vec![existing("1", "A", false)],
            },
            filters: FiltersState::default(),
        };

        reducer
            .reduce(
                &mut state,
                AppAction::Tasks(TaskAction::Toggle {
                    id: TaskId::from("1"),
                }),
                &env,
            )
            .unwrap();

        let completed: Vec<&str> = state
            .filtered(Filter::Completed)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(completed, vec!["1"]);
        assert!(state.filtered(Filter::Active).is_empty());
    }
}
