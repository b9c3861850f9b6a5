//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable
//! Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use taskstore_core::reducer::Reducer;

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for result assertion functions
type ResultAssertion<E> = Box<dyn FnOnce(&Result<(), E>)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use taskstore_testing::ReducerTest;
///
/// ReducerTest::new(TasksReducer::new())
///     .with_env(test_environment())
///     .given_state(TasksState::default())
///     .when_action(TaskAction::Add { text: "Buy milk".to_string() })
///     .then_state(|state| {
///         assert_eq!(state.len(), 1);
///     })
///     .then_ok()
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E, Err>
where
    R: Reducer<State = S, Action = A, Environment = E, Error = Err>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    result_assertions: Vec<ResultAssertion<Err>>,
}

impl<R, S, A, E, Err> ReducerTest<R, S, A, E, Err>
where
    R: Reducer<State = S, Action = A, Environment = E, Error = Err>,
    Err: std::fmt::Debug + 'static,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            result_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the reducer's result (Then)
    #[must_use]
    pub fn then_result<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Result<(), Err>) + 'static,
    {
        self.result_assertions.push(Box::new(assertion));
        self
    }

    /// Assert that the action was accepted (Then)
    #[must_use]
    pub fn then_ok(self) -> Self {
        self.then_result(|result| {
            assert!(result.is_ok(), "expected action to be accepted, got {result:?}");
        })
    }

    /// Assert that the action was rejected, inspecting the error (Then)
    #[must_use]
    #[allow(clippy::panic)] // Test assertion
    pub fn then_error<F>(self, assertion: F) -> Self
    where
        F: FnOnce(&Err) + 'static,
    {
        self.then_result(move |result| match result {
            Ok(()) => panic!("expected action to be rejected, but it was accepted"),
            Err(e) => assertion(e),
        })
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        // Execute reducer
        let result = self.reducer.reduce(&mut state, action, &env);

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run result assertions
        for assertion in self.result_assertions {
            assertion(&result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Reject,
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();
        type Error = String;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Result<(), String> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    Ok(())
                }
                TestAction::Reject => Err("rejected".to_string()),
            }
        }
    }

    #[test]
    fn accepted_action_runs_state_assertions() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_ok()
            .run();
    }

    #[test]
    fn rejected_action_exposes_the_error() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Reject)
            .then_state(|state| {
                assert_eq!(state.count, 5);
            })
            .then_error(|e| {
                assert_eq!(e, "rejected");
            })
            .run();
    }
}
