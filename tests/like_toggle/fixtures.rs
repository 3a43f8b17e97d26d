//! Cached query shapes for one book's comment screen.

use optimistic_cache::{
    CacheKey, CacheStore, CachedValue, DetailQuery, Descriptor, InMemoryCacheStore, InfiniteData,
    ListQuery, Page, Reply, Visibility,
};

pub const BOOK: &str = "book-1";
pub const LIST: &str = "reply_list_infinite";
pub const DETAIL: &str = "reply_retrieve";

pub fn detail_key(id: u64) -> CacheKey {
    CacheKey::new(DETAIL, Descriptor::Detail(DetailQuery { reply_id: id }))
}

pub fn all_key() -> CacheKey {
    CacheKey::new(
        LIST,
        Descriptor::List(
            ListQuery::new(Visibility::BookDetail)
                .parent(0)
                .book(BOOK)
                .ordering("-created"),
        ),
    )
}

pub fn best_key() -> CacheKey {
    CacheKey::new(
        LIST,
        Descriptor::List(ListQuery::new(Visibility::Best).book(BOOK).ordering("-like_cnt")),
    )
}

pub fn my_key() -> CacheKey {
    CacheKey::new(
        LIST,
        Descriptor::List(ListQuery::new(Visibility::Me).ordering("-created")),
    )
}

pub fn reply_key(parent: u64) -> CacheKey {
    CacheKey::new(
        LIST,
        Descriptor::List(ListQuery::replies_of(parent).ordering("created")),
    )
}

pub fn reply(id: u64, like_cnt: i64, is_like: bool) -> Reply {
    Reply {
        reply_id: id,
        parent: None,
        content: format!("comment {}", id),
        nickname: "reader".into(),
        is_like,
        like_cnt,
    }
}

pub fn listing(pages: Vec<Vec<Reply>>) -> CachedValue<Reply> {
    CachedValue::Paginated(InfiniteData::new(pages.into_iter().map(Page::new).collect()))
}

/// A store with the detail record and the ALL listing for `id`.
pub fn detail_and_all(id: u64, like_cnt: i64, is_like: bool) -> InMemoryCacheStore<Reply> {
    let store = InMemoryCacheStore::new();
    store
        .insert(detail_key(id), CachedValue::Scalar(reply(id, like_cnt, is_like)))
        .unwrap();
    store
        .insert(
            all_key(),
            listing(vec![vec![reply(id + 100, 0, false), reply(id, like_cnt, is_like)]]),
        )
        .unwrap();
    store
}

pub fn scalar(store: &InMemoryCacheStore<Reply>, key: &CacheKey) -> Reply {
    store
        .get(key)
        .unwrap()
        .and_then(|value| value.as_scalar().cloned())
        .expect("scalar record cached")
}

pub fn item(store: &InMemoryCacheStore<Reply>, key: &CacheKey, id: u64) -> Reply {
    optimistic_cache::find_item(store, key, |r: &Reply| r.reply_id == id)
        .unwrap()
        .expect("item cached")
}

pub fn like_state(r: &Reply) -> (bool, i64) {
    (r.is_like, r.like_cnt)
}
