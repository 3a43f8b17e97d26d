use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Proof that an optimistic toggle was applied, carrying the value to restore.
///
/// Consumed by [`LikeToggleController::rollback`](super::LikeToggleController::rollback).
/// Dropping it without rolling back confirms the mutation and frees the entity
/// for the next cycle.
#[derive(Debug)]
pub struct UndoToken<T> {
    entity_id: u64,
    parent_id: Option<u64>,
    group_key: String,
    prior: T,
    pending: Arc<Mutex<HashSet<u64>>>,
}

impl<T> UndoToken<T> {
    pub(crate) fn new(
        entity_id: u64,
        parent_id: Option<u64>,
        group_key: &str,
        prior: T,
        pending: Arc<Mutex<HashSet<u64>>>,
    ) -> Self {
        UndoToken {
            entity_id,
            parent_id,
            group_key: group_key.to_string(),
            prior,
            pending,
        }
    }

    pub fn entity_id(&self) -> u64 {
        self.entity_id
    }

    pub fn parent_id(&self) -> Option<u64> {
        self.parent_id
    }

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    /// The record as it was before the first toggle.
    pub fn prior(&self) -> &T {
        &self.prior
    }
}

impl<T> Drop for UndoToken<T> {
    fn drop(&mut self) {
        // A poisoned set can't be trusted for the next claim either; leave it.
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(&self.entity_id);
        }
    }
}
