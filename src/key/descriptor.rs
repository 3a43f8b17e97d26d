use serde::{Deserialize, Serialize};

/// Who a listing query is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    BookDetail,
    Best,
    Me,
}

/// Parameters of a paginated listing query.
///
/// `parent == Some(0)` means top-level comments; any other value scopes the
/// listing to replies of that comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub visibility: Option<Visibility>,
    pub parent: Option<u64>,
    pub book: Option<String>,
    pub ordering: Option<String>,
}

impl ListQuery {
    pub fn new(visibility: Visibility) -> Self {
        ListQuery {
            visibility: Some(visibility),
            ..ListQuery::default()
        }
    }

    /// A listing of replies under `parent`, with no visibility scope.
    pub fn replies_of(parent: u64) -> Self {
        ListQuery {
            parent: Some(parent),
            ..ListQuery::default()
        }
    }

    pub fn parent(mut self, parent: u64) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn book(mut self, book: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    pub fn is_ordered(&self) -> bool {
        self.ordering.is_some()
    }

    pub fn in_book(&self, book: &str) -> bool {
        self.book.as_deref() == Some(book)
    }
}

/// Parameters of a single-record detail query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailQuery {
    pub reply_id: u64,
}

/// Typed segment-1 descriptor, one variant per query family shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Descriptor {
    List(ListQuery),
    Detail(DetailQuery),
}

impl Descriptor {
    pub fn as_list(&self) -> Option<&ListQuery> {
        match self {
            Descriptor::List(query) => Some(query),
            Descriptor::Detail(_) => None,
        }
    }

    pub fn as_detail(&self) -> Option<&DetailQuery> {
        match self {
            Descriptor::Detail(query) => Some(query),
            Descriptor::List(_) => None,
        }
    }
}
