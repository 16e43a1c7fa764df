use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use course_core::model::PersistedState;

use crate::repository::{KeyValueStore, StorageError};

/// Slot key the course snapshot is stored under.
pub const STORAGE_KEY: &str = "approvedCourses";

/// Load/save contract for the persisted course snapshot.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the last saved snapshot.
    ///
    /// Never fails: a missing, unreadable or malformed value yields an empty
    /// snapshot.
    async fn load(&self) -> PersistedState;

    /// Overwrite the stored snapshot with `state`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be encoded or written.
    async fn save(&self, state: &PersistedState) -> Result<(), StorageError>;
}

/// `StateStore` that keeps the snapshot as JSON text in one slot.
#[derive(Clone)]
pub struct LocalStateStore {
    slots: Arc<dyn KeyValueStore>,
    key: String,
}

impl LocalStateStore {
    #[must_use]
    pub fn new(slots: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(slots, STORAGE_KEY)
    }

    #[must_use]
    pub fn with_key(slots: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl StateStore for LocalStateStore {
    async fn load(&self) -> PersistedState {
        let raw = match self.slots.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored course state");
                return PersistedState::new();
            }
            Err(error) => {
                warn!(key = %self.key, %error, "failed to read course state; starting empty");
                return PersistedState::new();
            }
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) => {
                debug!(key = %self.key, courses = state.len(), "loaded course state");
                state
            }
            Err(error) => {
                warn!(key = %self.key, %error, "stored course state is malformed; starting empty");
                PersistedState::new()
            }
        }
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.slots.set_item(&self.key, &raw).await?;
        debug!(key = %self.key, courses = state.len(), "saved course state");
        Ok(())
    }
}
