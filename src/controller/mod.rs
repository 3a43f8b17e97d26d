//! Speculative like toggles across the canonical record and every listing view.
//!
//! `apply_like_toggle` runs before the request is sent; `rollback` runs only if
//! the server rejects it. Keeping the returned token until the response arrives
//! is what makes a rollback possible.
//!
//! ```ignore
//! let controller = LikeToggleController::new(store.clone());
//! let toggle = controller.apply_like_toggle(reply_id, Some(parent_id), book)?;
//! match send_like(reply_id) {
//!     Ok(_) => drop(toggle),
//!     Err(_) => {
//!         controller.rollback_like_toggle(toggle)?;
//!     }
//! }
//! ```

mod report;
mod token;

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::boundary::{self, invalidate_best};
use crate::config::EngineConfig;
use crate::error::CacheError;
use crate::key::CacheKey;
use crate::model::Likeable;
use crate::patch::{find_item, patch_paginated, patch_scalar};
use crate::resolver::{detail_keys, ViewKeySet, ViewName};
use crate::store::CacheStore;

pub use report::{ApplyReport, LikeToggle, RollbackReport};
pub use token::UndoToken;

/// Observable lifecycle of one entity's optimistic toggle.
///
/// `Applied` lasts while an [`UndoToken`] for the entity is alive; confirming
/// (dropping the token) or rolling back returns it to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Idle,
    Applied,
}

/// Applies and undoes like toggles for one screen's worth of cached queries.
///
/// Holds at most one outstanding undo token per entity. Scope an instance per
/// screen or entity group rather than sharing one globally.
pub struct LikeToggleController<S, T> {
    store: S,
    config: EngineConfig,
    pending: Arc<Mutex<HashSet<u64>>>,
    _marker: PhantomData<fn() -> T>,
}

impl<S, T> LikeToggleController<S, T>
where
    S: CacheStore<T>,
    T: Likeable,
{
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: S, config: EngineConfig) -> Self {
        LikeToggleController {
            store,
            config,
            pending: Arc::new(Mutex::new(HashSet::new())),
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self, entity_id: u64) -> Result<MutationState, CacheError> {
        let pending = self
            .pending
            .lock()
            .map_err(|_| CacheError::LockPoisoned("pending read"))?;
        Ok(if pending.contains(&entity_id) {
            MutationState::Applied
        } else {
            MutationState::Idle
        })
    }

    /// Optimistically flip the like on `entity_id` everywhere it is cached.
    ///
    /// The prior value is captured only when no earlier toggle of this entity is
    /// outstanding; a second apply still flips the cache but returns no token.
    ///
    /// The token is issued only after every patch succeeded. If the store fails
    /// partway, entries already toggled stay toggled, no token is returned and
    /// the entity is left unclaimed; the caller should refetch the affected
    /// queries.
    pub fn apply_like_toggle(
        &self,
        entity_id: u64,
        parent_id: Option<u64>,
        group_key: &str,
    ) -> Result<LikeToggle<T>, CacheError> {
        let canonical = detail_keys(&self.store, &self.config, entity_id)?;
        let views = ViewKeySet::resolve(&self.store, &self.config, parent_id, group_key)?;
        let mut report = ApplyReport::default();

        let Some(current) = self.current_value(entity_id, &canonical, &views)? else {
            debug!(entity_id, "entity not cached; nothing to toggle");
            return Ok(LikeToggle { token: None, report });
        };
        let next = current.toggled();
        report.crossing = boundary::crossing(current.like_count(), next.like_count());

        for key in &canonical {
            if patch_scalar(&self.store, key, |record: &T| record.toggled())? > 0 {
                report.canonical.push(key.clone());
            }
        }

        for (view, key) in root_keys(&views) {
            if view == ViewName::Best && report.crossing.is_some() {
                report
                    .invalidated
                    .extend(invalidate_best(&self.store, std::slice::from_ref(&key))?);
                continue;
            }
            let is_target = |item: &T| item.entity_id() == entity_id;
            if patch_paginated(&self.store, &key, is_target, |item: &T| item.toggled())? > 0 {
                report.patched.push((view, key));
            }
        }

        let token = if self.claim(entity_id)? {
            Some(UndoToken::new(
                entity_id,
                parent_id,
                group_key,
                current,
                Arc::clone(&self.pending),
            ))
        } else {
            debug!(entity_id, "toggle already outstanding; keeping earlier snapshot");
            None
        };

        debug!(
            entity_id,
            canonical = report.canonical.len(),
            patched = report.patched.len(),
            invalidated = report.invalidated.len(),
            crossing = ?report.crossing,
            "applied like toggle"
        );
        Ok(LikeToggle { token, report })
    }

    /// Restore the token's prior value into the canonical record and every
    /// listing item for its entity. Full replacement, not a second toggle.
    pub fn rollback(&self, token: UndoToken<T>) -> Result<RollbackReport, CacheError> {
        let entity_id = token.entity_id();
        let canonical = detail_keys(&self.store, &self.config, entity_id)?;
        let views =
            ViewKeySet::resolve(&self.store, &self.config, token.parent_id(), token.group_key())?;
        let prior = token.prior();
        let mut report = RollbackReport::default();

        for key in &canonical {
            if patch_scalar(&self.store, key, |_: &T| prior.clone())? > 0 {
                report.canonical.push(key.clone());
            }
        }

        for (view, key) in root_keys(&views) {
            let is_target = |item: &T| item.entity_id() == entity_id;
            if patch_paginated(&self.store, &key, is_target, |_: &T| prior.clone())? > 0 {
                report.restored.push((view, key));
            }
        }

        debug!(
            entity_id,
            canonical = report.canonical.len(),
            restored = report.restored.len(),
            "rolled back like toggle"
        );
        drop(token);
        Ok(report)
    }

    /// Roll back `toggle` if it captured a snapshot; otherwise do nothing.
    pub fn rollback_like_toggle(
        &self,
        toggle: LikeToggle<T>,
    ) -> Result<RollbackReport, CacheError> {
        match toggle.token {
            Some(token) => self.rollback(token),
            None => Ok(RollbackReport::default()),
        }
    }

    /// Flip the like on `entity_id` inside one listing, without snapshotting or
    /// threshold checks.
    pub fn toggle_in_view(&self, key: &CacheKey, entity_id: u64) -> Result<usize, CacheError> {
        patch_paginated(
            &self.store,
            key,
            |item: &T| item.entity_id() == entity_id,
            |item: &T| item.toggled(),
        )
    }

    /// The canonical record if cached, else the first listing copy.
    fn current_value(
        &self,
        entity_id: u64,
        canonical: &[CacheKey],
        views: &ViewKeySet,
    ) -> Result<Option<T>, CacheError> {
        for key in canonical {
            if let Some(record) = self.store.get(key)?.and_then(|v| v.as_scalar().cloned()) {
                return Ok(Some(record));
            }
        }
        for (_, keys) in views.iter() {
            for key in keys {
                let is_target = |item: &T| item.entity_id() == entity_id;
                if let Some(item) = find_item(&self.store, key, is_target)? {
                    return Ok(Some(item));
                }
            }
        }
        Ok(None)
    }

    fn claim(&self, entity_id: u64) -> Result<bool, CacheError> {
        let mut pending = self
            .pending
            .lock()
            .map_err(|_| CacheError::LockPoisoned("pending write"))?;
        Ok(pending.insert(entity_id))
    }
}

/// Listing keys with duplicates and prefix-covered keys removed, so no cached
/// entry is patched twice by one call.
fn root_keys(views: &ViewKeySet) -> Vec<(ViewName, CacheKey)> {
    let mut roots: Vec<(ViewName, CacheKey)> = Vec::new();
    for (view, keys) in views.iter() {
        for key in keys {
            if roots.iter().any(|(_, root)| root.matches(key)) {
                continue;
            }
            roots.retain(|(_, root)| !key.matches(root));
            roots.push((view, key.clone()));
        }
    }
    roots
}
