//! Cache store - the key/value collaborator the engine patches.
//!
//! Hosts plug their own query cache in behind [`CacheStore`]; the bundled
//! [`InMemoryCacheStore`] backs tests and single-process clients.

mod in_memory;

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::model::CachedValue;

pub use in_memory::InMemoryCacheStore;
#[cfg(feature = "emitter")]
pub use in_memory::INVALIDATED_EVENT;

/// Abstract query cache.
///
/// Mutating methods address entries by prefix (see [`CacheKey::matches`]) and
/// must treat an empty key as addressing nothing.
pub trait CacheStore<T>: Send + Sync {
    /// Every key currently cached, in store iteration order.
    fn keys(&self) -> Result<Vec<CacheKey>, CacheError>;

    /// The value stored at exactly `key`.
    fn get(&self, key: &CacheKey) -> Result<Option<CachedValue<T>>, CacheError>;

    /// Replace every matched value with `updater(old)`. Returns how many entries
    /// were rewritten.
    fn set_all(
        &self,
        key: &CacheKey,
        updater: &dyn Fn(&CachedValue<T>) -> CachedValue<T>,
    ) -> Result<usize, CacheError>;

    /// Mark every matched entry stale so the next read refetches it. Returns how
    /// many entries were marked.
    fn invalidate(&self, key: &CacheKey) -> Result<usize, CacheError>;

    /// Replace every matched value with `value`.
    fn replace_all(&self, key: &CacheKey, value: CachedValue<T>) -> Result<usize, CacheError>
    where
        T: Clone,
    {
        self.set_all(key, &|_: &CachedValue<T>| value.clone())
    }
}
