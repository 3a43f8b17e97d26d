use crate::boundary::BoundaryCrossing;
use crate::key::CacheKey;
use crate::resolver::ViewName;

use super::UndoToken;

/// What an optimistic apply touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Canonical detail keys toggled in place.
    pub canonical: Vec<CacheKey>,
    /// Listing keys toggled in place, with the view they were resolved for.
    pub patched: Vec<(ViewName, CacheKey)>,
    /// BEST listing keys invalidated because of a threshold crossing.
    pub invalidated: Vec<CacheKey>,
    pub crossing: Option<BoundaryCrossing>,
}

impl ApplyReport {
    pub fn is_patched(&self, key: &CacheKey) -> bool {
        self.canonical.contains(key) || self.patched.iter().any(|(_, patched)| patched == key)
    }

    pub fn is_invalidated(&self, key: &CacheKey) -> bool {
        self.invalidated.contains(key)
    }
}

/// Result of
/// [`LikeToggleController::apply_like_toggle`](super::LikeToggleController::apply_like_toggle).
///
/// `token` is `None` when nothing was cached for the entity or when an earlier
/// toggle of the same entity is still awaiting confirmation.
#[derive(Debug)]
pub struct LikeToggle<T> {
    pub token: Option<UndoToken<T>>,
    pub report: ApplyReport,
}

/// What a rollback restored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackReport {
    pub canonical: Vec<CacheKey>,
    pub restored: Vec<(ViewName, CacheKey)>,
}

impl RollbackReport {
    pub fn is_noop(&self) -> bool {
        self.canonical.is_empty() && self.restored.is_empty()
    }
}
