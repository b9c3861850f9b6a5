//! # Taskstore Testing
//!
//! Testing utilities and helpers for the Taskstore architecture:
//!
//! - [`ReducerTest`]: fluent Given-When-Then harness for reducers
//! - [`storage_mocks`]: storage backends with controllable failure modes
//! - [`SequentialIds`]: deterministic id generator for reducer tests
//! - [`init_logging`]: opt-in tracing output for integration tests

pub mod reducer_test;
pub mod storage_mocks;

pub use reducer_test::ReducerTest;
pub use storage_mocks::{CountingStorage, QuotaStorage, UnavailableStorage};

use std::sync::atomic::{AtomicU64, Ordering};

use taskstore_core::environment::IdGenerator;

/// Deterministic id generator producing `"task-1"`, `"task-2"`, ...
///
/// Substitutes [`taskstore_core::environment::UuidGenerator`] in tests so
/// generated ids can be asserted against.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    /// Create a generator starting at `task-1`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("task-{n}")
    }
}

/// Initialize tracing output for a test binary.
///
/// Respects `RUST_LOG`; safe to call from multiple tests (subsequent calls
/// are no-ops).
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
