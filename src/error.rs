use thiserror::Error;

/// Infrastructure failures surfaced by cache stores and configuration loading.
///
/// Domain-level misses (absent entries, empty key sets, nothing to roll back)
/// are never errors; they degrade to no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("cache store encode error: {0}")]
    Encode(String),
    #[error("engine configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Config(err.to_string())
    }
}
