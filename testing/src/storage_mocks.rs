//! Storage backends with controllable failure modes.
//!
//! These mocks plug into [`StorageGateway`](taskstore_persistence::StorageGateway)
//! wherever a test needs to observe or break persistence: an always-failing
//! substrate, a quota-limited substrate, and a call-counting wrapper for
//! asserting throttle behavior.

use std::collections::HashMap;
use std::sync::Mutex;

use taskstore_persistence::{PROBE_KEY, StorageBackend, StorageError};

/// Backend that refuses every operation.
///
/// Simulates storage being disabled entirely (the availability probe fails,
/// so the gateway short-circuits everything).
#[derive(Debug, Default)]
pub struct UnavailableStorage;

impl StorageBackend for UnavailableStorage {
    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// Backend whose real writes fail with [`StorageError::QuotaExceeded`].
///
/// The availability probe key still succeeds, so the gateway attempts the
/// write and hits the quota error, exercising the save-failure path rather
/// than the unavailable path.
#[derive(Debug, Default)]
pub struct QuotaStorage {
    probe: Mutex<Option<String>>,
}

impl QuotaStorage {
    /// Create a quota-limited backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for QuotaStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == PROBE_KEY {
            if let Ok(mut probe) = self.probe.lock() {
                *probe = Some(value.to_string());
            }
            return Ok(());
        }
        Err(StorageError::QuotaExceeded)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if key == PROBE_KEY {
            if let Ok(probe) = self.probe.lock() {
                return Ok(probe.clone());
            }
        }
        Ok(None)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if key == PROBE_KEY {
            if let Ok(mut probe) = self.probe.lock() {
                *probe = None;
            }
        }
        Ok(())
    }
}

/// Wrapper that counts `set_item` calls per key, delegating to `inner`.
///
/// Counts every attempt, including ones the inner backend rejects, which is
/// what throttle and retry tests need to observe.
#[derive(Debug)]
pub struct CountingStorage<B> {
    inner: B,
    writes: Mutex<HashMap<String, usize>>,
}

impl<B: StorageBackend> CountingStorage<B> {
    /// Wrap `inner`, counting its writes
    #[must_use]
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            writes: Mutex::new(HashMap::new()),
        }
    }

    /// Number of `set_item` attempts for `key` (probe writes included if
    /// the gateway probed with `key`)
    #[must_use]
    pub fn writes(&self, key: &str) -> usize {
        self.writes
            .lock()
            .map(|w| w.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl<B: StorageBackend> StorageBackend for CountingStorage<B> {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Ok(mut writes) = self.writes.lock() {
            *writes.entry(key.to_string()).or_insert(0) += 1;
        }
        self.inner.set_item(key, value)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key)
    }
}
