//! Cached record shapes: scalar records, paginated records, and the like fields
//! shared by both.

use serde::{Deserialize, Serialize};

/// Records carrying a like flag and counter that can be toggled optimistically.
pub trait Likeable: Clone {
    fn entity_id(&self) -> u64;

    fn is_liked(&self) -> bool;

    fn like_count(&self) -> i64;

    /// The record with its like flag flipped and the count moved by exactly one.
    fn toggled(&self) -> Self;
}

/// A comment as the reply API returns it, both in detail and in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub reply_id: u64,
    pub parent: Option<u64>,
    pub content: String,
    pub nickname: String,
    pub is_like: bool,
    pub like_cnt: i64,
}

impl Reply {
    pub fn new(reply_id: u64, like_cnt: i64, is_like: bool) -> Self {
        Reply {
            reply_id,
            parent: None,
            content: String::new(),
            nickname: String::new(),
            is_like,
            like_cnt,
        }
    }
}

impl Likeable for Reply {
    fn entity_id(&self) -> u64 {
        self.reply_id
    }

    fn is_liked(&self) -> bool {
        self.is_like
    }

    fn like_count(&self) -> i64 {
        self.like_cnt
    }

    fn toggled(&self) -> Self {
        let like_cnt = if self.is_like {
            self.like_cnt.saturating_sub(1)
        } else {
            self.like_cnt.saturating_add(1)
        };
        Reply {
            is_like: !self.is_like,
            like_cnt,
            ..self.clone()
        }
    }
}

/// One fetched page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next: Option<String>,
    pub count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>) -> Self {
        Page {
            results,
            next: None,
            count: None,
        }
    }
}

/// Incrementally loaded listing: pages in fetch order, with their page params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfiniteData<T> {
    pub pages: Vec<Page<T>>,
    pub page_params: Vec<Option<u32>>,
}

impl<T> InfiniteData<T> {
    pub fn new(pages: Vec<Page<T>>) -> Self {
        let page_params = (0..pages.len())
            .map(|i| if i == 0 { None } else { Some(i as u32 + 1) })
            .collect();
        InfiniteData { pages, page_params }
    }

    /// All items across pages, in order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|page| page.results.iter())
    }
}

/// A cached value: either a single record or a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachedValue<T> {
    Scalar(T),
    Paginated(InfiniteData<T>),
}

impl<T> CachedValue<T> {
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            CachedValue::Scalar(record) => Some(record),
            CachedValue::Paginated(_) => None,
        }
    }

    pub fn as_paginated(&self) -> Option<&InfiniteData<T>> {
        match self {
            CachedValue::Paginated(data) => Some(data),
            CachedValue::Scalar(_) => None,
        }
    }
}
