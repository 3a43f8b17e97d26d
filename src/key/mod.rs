//! Cache keys - ordered segments identifying one cached query result.
//!
//! By convention segment 0 names the query family and segment 1 carries a typed
//! [`Descriptor`]. Any further segments are opaque to this crate.
//!
//! ```ignore
//! use optimistic_cache::{CacheKey, Descriptor, ListQuery, Visibility};
//!
//! let key = CacheKey::new("reply_list_infinite", Descriptor::List(
//!     ListQuery::new(Visibility::Best).book("book-1").ordering("-like_cnt"),
//! ));
//! assert_eq!(key.family(), Some("reply_list_infinite"));
//! ```

mod descriptor;

use serde::{Deserialize, Serialize};

pub use descriptor::{DetailQuery, Descriptor, ListQuery, Visibility};

/// One segment of a [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySegment {
    Text(String),
    Number(i64),
    Descriptor(Descriptor),
}

impl From<&str> for KeySegment {
    fn from(value: &str) -> Self {
        KeySegment::Text(value.to_string())
    }
}

impl From<String> for KeySegment {
    fn from(value: String) -> Self {
        KeySegment::Text(value)
    }
}

impl From<i64> for KeySegment {
    fn from(value: i64) -> Self {
        KeySegment::Number(value)
    }
}

impl From<Descriptor> for KeySegment {
    fn from(value: Descriptor) -> Self {
        KeySegment::Descriptor(value)
    }
}

/// Composite key locating a cached value.
///
/// The empty key is valid and affects nothing when handed to a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    segments: Vec<KeySegment>,
}

impl CacheKey {
    /// Build a `[family, descriptor]` key.
    pub fn new(family: impl Into<String>, descriptor: Descriptor) -> Self {
        CacheKey {
            segments: vec![
                KeySegment::Text(family.into()),
                KeySegment::Descriptor(descriptor),
            ],
        }
    }

    pub fn empty() -> Self {
        CacheKey::default()
    }

    pub fn from_segments(segments: Vec<KeySegment>) -> Self {
        CacheKey { segments }
    }

    /// Append an opaque trailing segment.
    pub fn with_segment(mut self, segment: impl Into<KeySegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The query family named by segment 0, if it is text.
    pub fn family(&self) -> Option<&str> {
        match self.segments.first() {
            Some(KeySegment::Text(family)) => Some(family),
            _ => None,
        }
    }

    /// The structured descriptor at segment 1, if present.
    pub fn descriptor(&self) -> Option<&Descriptor> {
        match self.segments.get(1) {
            Some(KeySegment::Descriptor(descriptor)) => Some(descriptor),
            _ => None,
        }
    }

    /// Prefix match used by stores to find every entry a key addresses.
    ///
    /// The empty key matches nothing.
    pub fn matches(&self, other: &CacheKey) -> bool {
        !self.is_empty()
            && self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a == b)
    }
}
