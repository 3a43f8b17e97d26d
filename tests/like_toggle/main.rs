//! Integration tests for optimistic like toggles across cached comment views.

mod fixtures;
mod properties;

use fixtures::*;
use optimistic_cache::{
    patch_paginated, patch_scalar, BoundaryCrossing, CacheKey, CacheStore, CachedValue,
    EngineConfig, InMemoryCacheStore, Likeable, LikeToggleController, MutationState, Reply,
    ViewName,
};

#[test]
fn like_then_rollback_across_detail_and_listing() {
    let store = detail_and_all(1, 5, false);
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert_eq!(like_state(&scalar(&store, &detail_key(1))), (true, 6));
    assert_eq!(like_state(&item(&store, &all_key(), 1)), (true, 6));
    assert!(toggle.report.invalidated.is_empty());
    assert_eq!(toggle.report.crossing, None);
    assert_eq!(controller.state(1).unwrap(), MutationState::Applied);

    // Server rejected the like
    controller.rollback_like_toggle(toggle).unwrap();
    assert_eq!(like_state(&scalar(&store, &detail_key(1))), (false, 5));
    assert_eq!(like_state(&item(&store, &all_key(), 1)), (false, 5));
    assert_eq!(controller.state(1).unwrap(), MutationState::Idle);
}

#[test]
fn neighbours_in_listing_are_untouched() {
    let store = detail_and_all(1, 5, false);
    let controller = LikeToggleController::new(store.clone());

    controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert_eq!(item(&store, &all_key(), 101), reply(101, 0, false));
}

#[test]
fn confirmed_toggle_stays_and_frees_the_entity() {
    let store = detail_and_all(1, 5, false);
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    drop(toggle);
    assert_eq!(controller.state(1).unwrap(), MutationState::Idle);
    assert_eq!(like_state(&scalar(&store, &detail_key(1))), (true, 6));

    // Unlike is a fresh cycle with its own snapshot
    let unlike = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert_eq!(
        unlike.token.as_ref().map(|t| like_state(t.prior())),
        Some((true, 6))
    );
    controller.rollback_like_toggle(unlike).unwrap();
    assert_eq!(like_state(&scalar(&store, &detail_key(1))), (true, 6));
}

#[test]
fn every_cached_view_is_patched() {
    let store = detail_and_all(1, 10, false);
    store
        .insert(best_key(), listing(vec![vec![reply(1, 10, false)]]))
        .unwrap();
    store
        .insert(my_key(), listing(vec![vec![reply(1, 10, false)]]))
        .unwrap();
    store
        .insert(reply_key(42), listing(vec![vec![reply(1, 10, false)]]))
        .unwrap();
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(42), BOOK).unwrap();
    let views: Vec<ViewName> = toggle.report.patched.iter().map(|(view, _)| *view).collect();
    assert_eq!(
        views,
        vec![ViewName::All, ViewName::Best, ViewName::My, ViewName::Reply]
    );
    for key in [all_key(), best_key(), my_key(), reply_key(42)] {
        assert_eq!(like_state(&item(&store, &key, 1)), (true, 11));
    }

    controller.rollback_like_toggle(toggle).unwrap();
    for key in [all_key(), best_key(), my_key(), reply_key(42)] {
        assert_eq!(like_state(&item(&store, &key, 1)), (false, 10));
    }
}

#[test]
fn reply_listing_of_another_parent_is_ignored() {
    let store = detail_and_all(1, 3, false);
    store
        .insert(reply_key(8), listing(vec![vec![reply(1, 3, false)]]))
        .unwrap();
    let controller = LikeToggleController::new(store.clone());

    controller.apply_like_toggle(1, Some(9), BOOK).unwrap();
    assert_eq!(like_state(&item(&store, &reply_key(8), 1)), (false, 3));
}

#[test]
fn duplicate_across_pages_patches_first_page_only() {
    let store = InMemoryCacheStore::new();
    store
        .insert(
            all_key(),
            listing(vec![vec![reply(1, 5, false)], vec![reply(1, 5, false)]]),
        )
        .unwrap();
    let controller = LikeToggleController::new(store.clone());

    controller.apply_like_toggle(1, Some(0), BOOK).unwrap();

    let value = store.get(&all_key()).unwrap().unwrap();
    let data = value.as_paginated().unwrap();
    assert_eq!(like_state(&data.pages[0].results[0]), (true, 6));
    assert_eq!(like_state(&data.pages[1].results[0]), (false, 5));
}

#[test]
fn reaching_one_hundred_invalidates_best() {
    let store = detail_and_all(1, 99, false);
    store
        .insert(best_key(), listing(vec![vec![reply(7, 300, false)]]))
        .unwrap();
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert_eq!(toggle.report.crossing, Some(BoundaryCrossing::Promoted));
    assert!(toggle.report.is_invalidated(&best_key()));
    assert!(!toggle.report.is_patched(&best_key()));
    assert!(toggle.report.is_patched(&all_key()));
    assert_eq!(store.is_stale(&best_key()).unwrap(), Some(true));
    assert_eq!(store.is_stale(&all_key()).unwrap(), Some(false));
    assert_eq!(like_state(&scalar(&store, &detail_key(1))), (true, 100));
}

#[test]
fn dropping_below_one_hundred_invalidates_best() {
    let store = detail_and_all(1, 100, true);
    store
        .insert(best_key(), listing(vec![vec![reply(1, 100, true)]]))
        .unwrap();
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert_eq!(toggle.report.crossing, Some(BoundaryCrossing::Demoted));
    assert_eq!(toggle.report.invalidated, vec![best_key()]);
    assert!(!toggle.report.is_patched(&best_key()));
    // Invalidated, not patched: the stale copy still shows the old count
    assert_eq!(like_state(&item(&store, &best_key(), 1)), (true, 100));
    assert_eq!(like_state(&scalar(&store, &detail_key(1))), (false, 99));
}

#[test]
fn crossing_without_cached_best_invalidates_nothing() {
    let store = detail_and_all(1, 99, false);
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert_eq!(toggle.report.crossing, Some(BoundaryCrossing::Promoted));
    assert!(toggle.report.invalidated.is_empty());
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn away_from_threshold_best_is_patched_in_place() {
    let store = detail_and_all(1, 150, false);
    store
        .insert(best_key(), listing(vec![vec![reply(1, 150, false)]]))
        .unwrap();
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert!(toggle.report.is_patched(&best_key()));
    assert_eq!(store.is_stale(&best_key()).unwrap(), Some(false));
    assert_eq!(like_state(&item(&store, &best_key(), 1)), (true, 151));
}

#[test]
fn absent_views_are_never_created() {
    let store = InMemoryCacheStore::new();
    store
        .insert(detail_key(1), CachedValue::Scalar(reply(1, 2, false)))
        .unwrap();
    let controller = LikeToggleController::new(store.clone());

    let toggle = controller.apply_like_toggle(1, Some(5), BOOK).unwrap();
    assert_eq!(store.keys().unwrap(), vec![detail_key(1)]);
    assert!(toggle.report.patched.is_empty());
    assert_eq!(toggle.report.canonical, vec![detail_key(1)]);
}

#[test]
fn entity_missing_from_listing_leaves_it_unchanged() {
    let store = detail_and_all(1, 2, false);
    store
        .insert(my_key(), listing(vec![vec![reply(50, 1, true)]]))
        .unwrap();
    let controller = LikeToggleController::new(store.clone());
    let my_before = store.get(&my_key()).unwrap();

    let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
    assert_eq!(store.get(&my_key()).unwrap(), my_before);
    assert_eq!(like_state(&scalar(&store, &detail_key(1))), (true, 3));
    assert!(!toggle.report.is_patched(&my_key()));
    assert_eq!(toggle.report.patched, vec![(ViewName::All, all_key())]);

    let rollback = controller.rollback_like_toggle(toggle).unwrap();
    assert_eq!(rollback.restored, vec![(ViewName::All, all_key())]);
    assert_eq!(rollback.canonical, vec![detail_key(1)]);
}

#[test]
fn empty_keys_leave_store_byte_identical() {
    let store = detail_and_all(1, 5, false);
    let before = store.fingerprint().unwrap();

    patch_scalar(&store, &CacheKey::empty(), |r: &Reply| r.toggled()).unwrap();
    patch_paginated(&store, &CacheKey::empty(), |_: &Reply| true, |r: &Reply| r.toggled())
        .unwrap();
    store.invalidate(&CacheKey::empty()).unwrap();

    assert_eq!(store.fingerprint().unwrap(), before);
}

#[test]
fn custom_families_from_config() {
    let config = EngineConfig::from_json(r#"{"detail_family":"comment_detail"}"#).unwrap();
    let key = CacheKey::new(
        "comment_detail",
        optimistic_cache::Descriptor::Detail(optimistic_cache::DetailQuery { reply_id: 1 }),
    );
    let store = InMemoryCacheStore::new();
    store
        .insert(key.clone(), CachedValue::Scalar(reply(1, 0, false)))
        .unwrap();
    let controller = LikeToggleController::with_config(store.clone(), config);

    controller.apply_like_toggle(1, None, BOOK).unwrap();
    assert_eq!(like_state(&scalar(&store, &key)), (true, 1));
}
