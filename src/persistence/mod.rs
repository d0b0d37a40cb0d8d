//! Persistence adapter.
//!
//! Maps the wizard's records onto a [`KeyValueStore`] under three keys: the
//! in-progress draft, the locked order, and the session checkpoint. Values
//! are JSON. The adapter is driven only by the single wizard controller, so
//! there are no read-modify-write races to guard against.

mod error;
mod store;

pub use error::StoreError;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::checkpoint::SessionCheckpoint;
use crate::config::StorageKeys;
use crate::model::{CustomerRecord, LockedOrder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

#[derive(Debug)]
pub struct Persistence<St> {
    store: St,
    keys: StorageKeys,
}

impl<St: KeyValueStore> Persistence<St> {
    pub fn new(store: St, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn save_draft(&self, record: &CustomerRecord) -> Result<(), StoreError> {
        self.write(&self.keys.draft_key, record)
    }

    pub fn load_draft(&self) -> Result<Option<CustomerRecord>, StoreError> {
        self.read(&self.keys.draft_key)
    }

    pub fn save_locked_order(&self, order: &LockedOrder) -> Result<(), StoreError> {
        self.write(&self.keys.locked_order_key, order)
    }

    pub fn load_locked_order(&self) -> Result<Option<LockedOrder>, StoreError> {
        self.read(&self.keys.locked_order_key)
    }

    /// Forget the locked order, for a session that starts over.
    pub fn clear_locked_order(&self) -> Result<(), StoreError> {
        self.store.remove(&self.keys.locked_order_key)
    }

    pub fn save_checkpoint(&self, checkpoint: &SessionCheckpoint) -> Result<(), StoreError> {
        self.write(&self.keys.session_key, checkpoint)
    }

    /// Load the session checkpoint. One that cannot be decoded or has an
    /// unsupported version is discarded with a warning.
    pub fn load_checkpoint(&self) -> Result<Option<SessionCheckpoint>, StoreError> {
        let Some(raw) = self.store.get(&self.keys.session_key)? else {
            return Ok(None);
        };
        match SessionCheckpoint::from_json(&raw) {
            Ok(checkpoint) => Ok(Some(checkpoint)),
            Err(err) => {
                warn!(key = %self.keys.session_key, error = %err, "discarding unusable checkpoint");
                Ok(None)
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
    }
}
