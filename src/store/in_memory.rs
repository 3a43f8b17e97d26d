//! InMemoryCacheStore - Vec-backed query cache for tests and single-process clients.

use std::sync::{Arc, RwLock};

#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use serde::Serialize;

use super::CacheStore;
use crate::error::CacheError;
use crate::key::CacheKey;
use crate::model::CachedValue;

/// Event name emitted once per invalidated entry, with the JSON-encoded key as payload.
#[cfg(feature = "emitter")]
pub const INVALIDATED_EVENT: &str = "CacheInvalidated";

#[derive(Debug, Clone, Serialize)]
struct StoredEntry<T> {
    key: CacheKey,
    value: CachedValue<T>,
    stale: bool,
}

/// In-memory cache store preserving insertion order.
///
/// Clone-friendly via Arc: clones share the same entries.
pub struct InMemoryCacheStore<T> {
    entries: Arc<RwLock<Vec<StoredEntry<T>>>>,
    #[cfg(feature = "emitter")]
    emitter: Option<Arc<Mutex<EventEmitter>>>,
}

impl<T> Clone for InMemoryCacheStore<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            #[cfg(feature = "emitter")]
            emitter: self.emitter.clone(),
        }
    }
}

impl<T> Default for InMemoryCacheStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryCacheStore<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            #[cfg(feature = "emitter")]
            emitter: None,
        }
    }

    /// Announce invalidations on `emitter` under [`INVALIDATED_EVENT`].
    #[cfg(feature = "emitter")]
    pub fn with_emitter(mut self, emitter: EventEmitter) -> Self {
        self.emitter = Some(Arc::new(Mutex::new(emitter)));
        self
    }

    /// Store a freshly fetched value at exactly `key`, clearing any stale mark.
    pub fn insert(&self, key: CacheKey, value: CachedValue<T>) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::LockPoisoned("insert"))?;

        match entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                entry.value = value;
                entry.stale = false;
            }
            None => entries.push(StoredEntry {
                key,
                value,
                stale: false,
            }),
        }
        Ok(())
    }

    /// Whether the entry at exactly `key` has been invalidated. `None` if absent.
    pub fn is_stale(&self, key: &CacheKey) -> Result<Option<bool>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheError::LockPoisoned("read"))?;
        Ok(entries
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| entry.stale))
    }

    pub fn len(&self) -> Result<usize, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheError::LockPoisoned("read"))?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }

    /// Bitcode encoding of every entry, stale marks included. Two equal
    /// fingerprints mean the store contents are byte-for-byte identical.
    pub fn fingerprint(&self) -> Result<Vec<u8>, CacheError>
    where
        T: Serialize,
    {
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheError::LockPoisoned("read"))?;
        bitcode::serialize(&*entries).map_err(|e| CacheError::Encode(e.to_string()))
    }

    #[cfg(feature = "emitter")]
    fn announce(&self, keys: &[CacheKey]) -> Result<(), CacheError> {
        let Some(emitter) = &self.emitter else {
            return Ok(());
        };
        let mut emitter = emitter
            .lock()
            .map_err(|_| CacheError::LockPoisoned("emitter"))?;
        for key in keys {
            let payload =
                serde_json::to_string(key).map_err(|e| CacheError::Encode(e.to_string()))?;
            emitter.emit(INVALIDATED_EVENT, payload);
        }
        Ok(())
    }
}

impl<T> CacheStore<T> for InMemoryCacheStore<T>
where
    T: Clone + Send + Sync,
{
    fn keys(&self) -> Result<Vec<CacheKey>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheError::LockPoisoned("read"))?;
        Ok(entries.iter().map(|entry| entry.key.clone()).collect())
    }

    fn get(&self, key: &CacheKey) -> Result<Option<CachedValue<T>>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheError::LockPoisoned("read"))?;
        Ok(entries
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| entry.value.clone()))
    }

    fn set_all(
        &self,
        key: &CacheKey,
        updater: &dyn Fn(&CachedValue<T>) -> CachedValue<T>,
    ) -> Result<usize, CacheError> {
        if key.is_empty() {
            return Ok(0);
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::LockPoisoned("write"))?;

        let mut updated = 0;
        for entry in entries.iter_mut().filter(|entry| key.matches(&entry.key)) {
            entry.value = updater(&entry.value);
            updated += 1;
        }
        Ok(updated)
    }

    fn invalidate(&self, key: &CacheKey) -> Result<usize, CacheError> {
        if key.is_empty() {
            return Ok(0);
        }
        let invalidated: Vec<CacheKey> = {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| CacheError::LockPoisoned("invalidate"))?;
            entries
                .iter_mut()
                .filter(|entry| key.matches(&entry.key))
                .map(|entry| {
                    entry.stale = true;
                    entry.key.clone()
                })
                .collect()
        };

        #[cfg(feature = "emitter")]
        self.announce(&invalidated)?;

        Ok(invalidated.len())
    }
}
