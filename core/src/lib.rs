//! # Taskstore Core
//!
//! Core traits and types for the Taskstore architecture.
//!
//! This crate provides the fundamental abstractions for building a
//! predictable state container: state lives in one place, every change goes
//! through a pure reducer, and side effects stay outside the reducer.
//!
//! ## Core Concepts
//!
//! - **State**: owned, `Clone`-able domain state for a feature slice
//! - **Action**: all possible inputs to a reducer
//! - **Reducer**: pure function `(State, Action, Environment) → Result<(), Error>`
//! - **Environment**: injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use taskstore_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!     type Error = std::convert::Infallible;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> Result<(), Self::Error> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!             CounterAction::Decrement => state.count -= 1,
//!         }
//!         Ok(())
//!     }
//! }
//! ```

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → Result`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Error`: The rejection type returned when an action is refused
    ///
    /// # Contract
    ///
    /// `reduce` either applies the action to `state` and returns `Ok(())`,
    /// or rejects the action and returns `Err` with `state` untouched.
    /// A rejected action must leave no partial mutation behind: callers
    /// (and the store runtime) treat `Err` as "nothing happened".
    ///
    /// Reducers perform no I/O. Anything non-deterministic (id generation,
    /// time) comes in through the environment so tests can substitute it.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The rejection type for refused actions
        type Error;

        /// Reduce an action into a state change
        ///
        /// # Errors
        ///
        /// Returns the reducer's rejection type when the action is refused
        /// (e.g. a validation failure). State is unchanged on error.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<(), Self::Error>;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter, so reducers stay pure and tests can
/// substitute deterministic implementations.
pub mod environment {
    /// Generates opaque, session-unique identifiers for new entities.
    ///
    /// Production code uses [`UuidGenerator`]; tests typically substitute a
    /// sequential generator so ids are predictable.
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier, unique within the session
        fn generate(&self) -> String;
    }

    /// Production id generator backed by random UUID v4
    ///
    /// Collision probability within a session is negligible, which satisfies
    /// the uniqueness-by-construction requirement for entity ids.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn generate(&self) -> String {
            uuid::Uuid::new_v4().to_string()
        }
    }
}
