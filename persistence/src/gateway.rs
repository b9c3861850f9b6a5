//! Storage gateway: serialization, namespacing, and failure containment.
//!
//! The gateway sits between typed application state and the raw
//! [`StorageBackend`]. It owns the key layout (three namespaced regions),
//! probes substrate availability before touching it, and converts every
//! failure into an explicit non-fatal result reported via `tracing`.
//! Nothing the gateway does can interrupt a state transition.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::StorageBackend;

/// Default namespace prefix for all region keys.
pub const DEFAULT_NAMESPACE: &str = "todoApp";

/// Key used by the availability probe. Written and removed immediately.
///
/// Public so backend mocks can recognize probe writes without duplicating
/// the string.
pub const PROBE_KEY: &str = "__storage_test__";

/// One of the three independently keyed persisted blobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Combined snapshot: `{ tasks, filter }` under the bare namespace key
    Root,
    /// Task collection only, under `<namespace>.tasks`
    Tasks,
    /// Active filter only, under `<namespace>.filter`
    Filter,
}

impl Region {
    /// All regions, in the order `clear` removes them.
    pub const ALL: [Region; 3] = [Region::Root, Region::Tasks, Region::Filter];

    fn key(self, namespace: &str) -> String {
        match self {
            Region::Root => namespace.to_string(),
            Region::Tasks => format!("{namespace}.tasks"),
            Region::Filter => format!("{namespace}.filter"),
        }
    }
}

/// Gateway over a [`StorageBackend`].
///
/// All operations return explicit success/failure values (`bool` for writes,
/// `Option` for reads) and short-circuit to the no-op result when the
/// availability probe fails. Failures are reported with `tracing::warn!` or
/// `tracing::error!` and never propagate.
#[derive(Debug)]
pub struct StorageGateway<B> {
    backend: B,
    namespace: String,
}

impl<B: StorageBackend> StorageGateway<B> {
    /// Create a gateway over `backend` using [`DEFAULT_NAMESPACE`].
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_namespace(backend, DEFAULT_NAMESPACE)
    }

    /// Create a gateway with a custom namespace prefix.
    ///
    /// Useful in tests and when several applications share one substrate.
    #[must_use]
    pub fn with_namespace(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    /// Probe whether the substrate is usable.
    ///
    /// Attempts a harmless write-and-remove cycle; returns `true` only when
    /// both succeed. Safe and cheap to call before every operation, which is
    /// exactly what the other gateway methods do.
    #[must_use]
    pub fn is_available(&self) -> bool {
        let wrote = self.backend.set_item(PROBE_KEY, PROBE_KEY);
        if let Err(e) = wrote {
            tracing::warn!(error = %e, "storage is not available");
            return false;
        }
        if let Err(e) = self.backend.remove_item(PROBE_KEY) {
            tracing::warn!(error = %e, "storage is not available");
            return false;
        }
        true
    }

    /// Serialize `value` and store it under `region`'s key.
    ///
    /// Returns `false` (after reporting) when storage is unavailable, the
    /// value cannot be serialized, or the underlying write fails.
    pub fn save<T: Serialize>(&self, region: Region, value: &T) -> bool {
        if !self.is_available() {
            return false;
        }

        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(?region, error = %e, "failed to serialize state for storage");
                return false;
            }
        };

        let key = region.key(&self.namespace);
        match self.backend.set_item(&key, &serialized) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(%key, error = %e, "failed to save state to storage");
                false
            }
        }
    }

    /// Load and deserialize the value stored under `region`'s key.
    ///
    /// Returns `None` when storage is unavailable, the key is absent, the
    /// read fails, or the stored content does not parse. Parse failures are
    /// reported, then treated as "no value" so a corrupt snapshot degrades
    /// to the default state instead of crashing the application.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, region: Region) -> Option<T> {
        if !self.is_available() {
            return None;
        }

        let key = region.key(&self.namespace);
        let raw = match self.backend.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(%key, error = %e, "failed to load state from storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(
                    %key,
                    error = %e,
                    "stored state is corrupted, falling back to default state"
                );
                None
            }
        }
    }

    /// Remove all three regions.
    ///
    /// Best-effort: a failed removal is reported but does not abort the
    /// removal attempts for the remaining regions. Returns `true` only when
    /// every removal succeeded.
    pub fn clear(&self) -> bool {
        if !self.is_available() {
            return false;
        }

        let mut all_ok = true;
        for region in Region::ALL {
            let key = region.key(&self.namespace);
            if let Err(e) = self.backend.remove_item(&key) {
                tracing::error!(%key, error = %e, "failed to clear storage region");
                all_ok = false;
            }
        }
        all_ok
    }
}
