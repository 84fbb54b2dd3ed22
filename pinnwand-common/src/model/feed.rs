use crate::model::{
    Id,
    post::Post,
    user::{UserHandle, UserMarker},
};
use serde::{Deserialize, Serialize};

/// Token identifying the next page of feed content to fetch.
///
/// Consumers must only pass cursors previously returned by the source (or
/// [`PageCursor::FIRST`]); the inner value is an implementation detail of
/// the backend.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PageCursor(u64);

impl PageCursor {
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub fn new(inner: u64) -> Self {
        Self(inner)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::FIRST
    }
}

/// One page of feed content. A `None` cursor marks the end of the feed.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub next_cursor: Option<PageCursor>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct TrendingTopic {
    pub name: String,
    pub post_count: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct SuggestedUser {
    pub id: Id<UserMarker>,
    pub name: String,
    pub handle: UserHandle,
    pub bio: String,
    pub initials: String,
}
