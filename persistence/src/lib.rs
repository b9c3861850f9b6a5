//! # Taskstore Persistence
//!
//! Durable key-value persistence for the Taskstore architecture.
//!
//! Three layers, outermost first:
//!
//! - [`middleware::StorageMiddleware`] observes store transitions and
//!   schedules throttled writes (bursts of transitions coalesce into one
//!   write per throttle window).
//! - [`gateway::StorageGateway`] serializes values to JSON under namespaced
//!   region keys, probes storage availability, and converts every underlying
//!   failure into a reported non-fatal result.
//! - [`backend::StorageBackend`] is the raw string key-value substrate, with
//!   [`backend::MemoryStorage`] (session-only) and [`backend::FileStorage`]
//!   (durable across sessions) implementations.
//!
//! Nothing in this crate panics or propagates a storage failure upward: the
//! worst case of any persistence problem is a missed write, reported via
//! `tracing`, and retried on the next transition.

pub mod backend;
pub mod gateway;
pub mod middleware;

pub use backend::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use gateway::{PROBE_KEY, Region, StorageGateway};
pub use middleware::{DEFAULT_THROTTLE, StorageMiddleware};
