//! Key resolution - find which cached queries hold a given entity.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::CacheError;
use crate::key::{CacheKey, Descriptor, ListQuery, Visibility};
use crate::store::CacheStore;

/// Every cached key whose family and descriptor satisfy both predicates, in
/// store order. Keys missing either segment never match.
pub fn resolve_keys<T, S>(
    store: &S,
    family: impl Fn(&str) -> bool,
    descriptor: impl Fn(&Descriptor) -> bool,
) -> Result<Vec<CacheKey>, CacheError>
where
    S: CacheStore<T> + ?Sized,
{
    Ok(store
        .keys()?
        .into_iter()
        .filter(|key| match (key.family(), key.descriptor()) {
            (Some(f), Some(d)) => family(f) && descriptor(d),
            _ => false,
        })
        .collect())
}

/// Keys of the canonical detail record for `entity_id`.
pub fn detail_keys<T, S>(
    store: &S,
    config: &EngineConfig,
    entity_id: u64,
) -> Result<Vec<CacheKey>, CacheError>
where
    S: CacheStore<T> + ?Sized,
{
    resolve_keys(
        store,
        |family| family == config.detail_family,
        |descriptor| descriptor.as_detail().is_some_and(|d| d.reply_id == entity_id),
    )
}

/// The listing views a comment can appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    All,
    Best,
    My,
    Reply,
}

impl ViewName {
    pub const ALL_VIEWS: [ViewName; 4] =
        [ViewName::All, ViewName::Best, ViewName::My, ViewName::Reply];

    /// Whether a listing query belongs to this view for the given context.
    pub fn selects(self, query: &ListQuery, parent_id: Option<u64>, group_key: &str) -> bool {
        match self {
            ViewName::All => {
                query.visibility == Some(Visibility::BookDetail)
                    && query.parent == Some(0)
                    && query.in_book(group_key)
                    && query.is_ordered()
            }
            ViewName::Best => {
                query.visibility == Some(Visibility::Best)
                    && query.in_book(group_key)
                    && query.is_ordered()
            }
            ViewName::My => query.visibility == Some(Visibility::Me) && query.is_ordered(),
            ViewName::Reply => match (query.parent, parent_id) {
                (Some(parent), Some(wanted)) => parent != 0 && parent == wanted,
                _ => false,
            },
        }
    }
}

/// Resolved listing keys per view. An empty entry means the view is not cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewKeySet {
    pub all: Vec<CacheKey>,
    pub best: Vec<CacheKey>,
    pub my: Vec<CacheKey>,
    pub reply: Vec<CacheKey>,
}

impl ViewKeySet {
    pub fn resolve<T, S>(
        store: &S,
        config: &EngineConfig,
        parent_id: Option<u64>,
        group_key: &str,
    ) -> Result<Self, CacheError>
    where
        S: CacheStore<T> + ?Sized,
    {
        let view = |name: ViewName| {
            resolve_keys(
                store,
                |family| family == config.list_family,
                |descriptor| {
                    descriptor
                        .as_list()
                        .is_some_and(|query| name.selects(query, parent_id, group_key))
                },
            )
        };

        let keys = ViewKeySet {
            all: view(ViewName::All)?,
            best: view(ViewName::Best)?,
            my: view(ViewName::My)?,
            reply: view(ViewName::Reply)?,
        };
        debug!(
            group_key,
            ?parent_id,
            all = keys.all.len(),
            best = keys.best.len(),
            my = keys.my.len(),
            reply = keys.reply.len(),
            "resolved view keys"
        );
        Ok(keys)
    }

    pub fn get(&self, name: ViewName) -> &[CacheKey] {
        match name {
            ViewName::All => &self.all,
            ViewName::Best => &self.best,
            ViewName::My => &self.my,
            ViewName::Reply => &self.reply,
        }
    }

    /// Views in ALL, BEST, MY, REPLY order with their keys.
    pub fn iter(&self) -> impl Iterator<Item = (ViewName, &[CacheKey])> {
        ViewName::ALL_VIEWS.into_iter().map(move |name| (name, self.get(name)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, keys)| keys.is_empty())
    }
}
