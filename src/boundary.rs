//! BEST listing promotion rule.
//!
//! A comment enters or leaves the BEST listing when its like count crosses
//! [`BEST_THRESHOLD`]. A cached BEST listing can't be patched into that shape, so
//! it is invalidated and refetched instead.

use tracing::debug;

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::store::CacheStore;

pub const BEST_THRESHOLD: i64 = 100;

/// Direction of a threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryCrossing {
    Promoted,
    Demoted,
}

/// Classify a single-step count change from `before` to `after`.
pub fn crossing(before: i64, after: i64) -> Option<BoundaryCrossing> {
    if before == BEST_THRESHOLD - 1 && after == BEST_THRESHOLD {
        Some(BoundaryCrossing::Promoted)
    } else if before == BEST_THRESHOLD && after == BEST_THRESHOLD - 1 {
        Some(BoundaryCrossing::Demoted)
    } else {
        None
    }
}

/// Invalidate every cached BEST key. Returns the keys that were actually marked.
pub fn invalidate_best<T, S>(store: &S, best: &[CacheKey]) -> Result<Vec<CacheKey>, CacheError>
where
    S: CacheStore<T> + ?Sized,
{
    let mut invalidated = Vec::new();
    for key in best {
        if store.invalidate(key)? > 0 {
            debug!(?key, "invalidated best listing");
            invalidated.push(key.clone());
        }
    }
    Ok(invalidated)
}
