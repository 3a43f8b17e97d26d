//! Record patching - pure rewrites of scalar and paginated cache values.

use std::cell::Cell;

use tracing::debug;

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::model::{CachedValue, InfiniteData, Page};
use crate::store::CacheStore;

/// Replace the scalar record at `key` with `updater(old)`.
///
/// No-op for an empty key, an absent entry, or a paginated value. Returns the
/// number of scalar entries rewritten.
pub fn patch_scalar<T, S>(
    store: &S,
    key: &CacheKey,
    updater: impl Fn(&T) -> T,
) -> Result<usize, CacheError>
where
    T: Clone,
    S: CacheStore<T> + ?Sized,
{
    if key.is_empty() || store.get(key)?.is_none() {
        return Ok(0);
    }
    let updated = Cell::new(0);
    store.set_all(key, &|value: &CachedValue<T>| match value {
        CachedValue::Scalar(record) => {
            updated.set(updated.get() + 1);
            CachedValue::Scalar(updater(record))
        }
        other => other.clone(),
    })?;
    debug!(?key, updated = updated.get(), "patched scalar record");
    Ok(updated.get())
}

/// Rewrite the target items inside the paginated value at `key`.
///
/// Only the first page holding a target is touched. No-op for an empty key, an
/// absent entry, or a scalar value. Returns the number of entries that held a
/// target and were rewritten.
pub fn patch_paginated<T, S>(
    store: &S,
    key: &CacheKey,
    is_target: impl Fn(&T) -> bool,
    updater: impl Fn(&T) -> T,
) -> Result<usize, CacheError>
where
    T: Clone,
    S: CacheStore<T> + ?Sized,
{
    if key.is_empty() || store.get(key)?.is_none() {
        return Ok(0);
    }
    let updated = Cell::new(0);
    store.set_all(key, &|value: &CachedValue<T>| match value {
        CachedValue::Paginated(data) => match patch_pages(data, &is_target, &updater) {
            Some(patched) => {
                updated.set(updated.get() + 1);
                CachedValue::Paginated(patched)
            }
            None => value.clone(),
        },
        other => other.clone(),
    })?;
    debug!(?key, updated = updated.get(), "patched paginated record");
    Ok(updated.get())
}

/// Rebuild `data` with every target item in the first matching page replaced.
///
/// Returns `None` when no page holds a target. Pages after the first match are
/// carried over unchanged even if they also contain a target.
pub fn patch_pages<T: Clone>(
    data: &InfiniteData<T>,
    is_target: &impl Fn(&T) -> bool,
    updater: &impl Fn(&T) -> T,
) -> Option<InfiniteData<T>> {
    let target_page = data
        .pages
        .iter()
        .position(|page| page.results.iter().any(is_target))?;

    if data.pages[target_page + 1..]
        .iter()
        .any(|page| page.results.iter().any(is_target))
    {
        debug!(target_page, "target also present on a later page; left untouched");
    }

    let pages = data
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            if index != target_page {
                return page.clone();
            }
            Page {
                results: page
                    .results
                    .iter()
                    .map(|item| if is_target(item) { updater(item) } else { item.clone() })
                    .collect(),
                ..page.clone()
            }
        })
        .collect();

    Some(InfiniteData {
        pages,
        page_params: data.page_params.clone(),
    })
}

/// First item satisfying `is_target` in the paginated value at `key`.
pub fn find_item<T, S>(
    store: &S,
    key: &CacheKey,
    is_target: impl Fn(&T) -> bool,
) -> Result<Option<T>, CacheError>
where
    T: Clone,
    S: CacheStore<T> + ?Sized,
{
    if key.is_empty() {
        return Ok(None);
    }
    let Some(CachedValue::Paginated(data)) = store.get(key)? else {
        return Ok(None);
    };
    let found = data.items().find(|item| is_target(*item)).cloned();
    Ok(found)
}
