mod boundary;
mod config;
mod controller;
mod error;
mod key;
mod model;
mod patch;
mod resolver;
mod store;

pub use boundary::{crossing, invalidate_best, BoundaryCrossing, BEST_THRESHOLD};
pub use config::EngineConfig;
pub use controller::{
    ApplyReport, LikeToggle, LikeToggleController, MutationState, RollbackReport, UndoToken,
};
pub use error::CacheError;
pub use key::{CacheKey, DetailQuery, Descriptor, KeySegment, ListQuery, Visibility};
pub use model::{CachedValue, InfiniteData, Likeable, Page, Reply};
pub use patch::{find_item, patch_pages, patch_paginated, patch_scalar};
pub use resolver::{detail_keys, resolve_keys, ViewKeySet, ViewName};
pub use store::{CacheStore, InMemoryCacheStore};
#[cfg(feature = "emitter")]
pub use store::INVALIDATED_EVENT;

// Re-export the EventEmitter used for invalidation announcements
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
