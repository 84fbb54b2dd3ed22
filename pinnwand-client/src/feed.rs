//! Infinite-scroll feed session.
//!
//! One session owns the flattened post list for one feed view: pages are
//! appended strictly in request order, posts are deduplicated by id across
//! pages, and a single in-flight guard keeps page fetches sequential. A
//! `None` cursor is terminal for the rest of the session.

use crate::mutate::{self, Applied, Reversal, ToggleKind};
use pinnwand_common::model::{
    Id,
    feed::PageCursor,
    post::{Post, PostMarker},
};
use pinnwand_source::{FeedSource, SourceError};
use std::collections::HashSet;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The session was closed while the page was in flight; the result was
    /// discarded without being applied.
    #[error("The feed session is closed.")]
    SessionClosed,
    #[error(transparent)]
    Source(#[from] SourceError),
}

pub struct FeedSession {
    posts: Vec<Post>,
    seen: HashSet<Id<PostMarker>>,
    next_cursor: Option<PageCursor>,
    fetching: bool,
    cancel: CancellationToken,
}

impl Default for FeedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            seen: HashSet::new(),
            next_cursor: Some(PageCursor::FIRST),
            fetching: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Whether a next-page fetch should be issued: the viewport is near the
    /// end of the loaded list, a next cursor exists, and no fetch is in
    /// flight. Pure; holds for any combination of inputs.
    #[must_use]
    pub fn should_fetch_next(near_end: bool, has_next_cursor: bool, is_fetching: bool) -> bool {
        near_end && has_next_cursor && !is_fetching
    }

    #[must_use]
    pub fn wants_next_page(&self, near_end: bool) -> bool {
        Self::should_fetch_next(near_end, self.next_cursor.is_some(), self.fetching)
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Marks the session as torn down. An in-flight page resolution after
    /// this point is discarded instead of applied.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetches the page for the current cursor and appends its posts.
    ///
    /// Returns the number of posts actually appended (duplicates by id are
    /// skipped). A terminal cursor makes this a no-op returning 0. On
    /// failure the loaded list and the cursor are left untouched, so the
    /// same cursor is retried by the next call.
    pub async fn fetch_next_page(&mut self, source: &impl FeedSource) -> Result<usize> {
        if self.cancel.is_cancelled() {
            return Err(FeedError::SessionClosed);
        }
        let Some(cursor) = self.next_cursor else {
            return Ok(0);
        };
        if self.fetching {
            return Ok(0);
        }

        self.fetching = true;
        let cancel = self.cancel.clone();
        let outcome = tokio::select! {
            () = cancel.cancelled() => None,
            page = source.list_page(cursor) => Some(page),
        };
        self.fetching = false;

        let Some(page) = outcome else {
            debug!(cursor = cursor.get(), "Session closed mid-fetch, discarding page");
            return Err(FeedError::SessionClosed);
        };
        let page = page?;

        let mut appended = 0;
        for post in page.posts {
            if self.seen.insert(post.id.clone()) {
                self.posts.push(post);
                appended += 1;
            } else {
                debug!(id = %post.id, "Skipping duplicate post from page");
            }
        }
        self.next_cursor = page.next_cursor;

        debug!(
            cursor = cursor.get(),
            appended,
            total = self.posts.len(),
            has_next = self.next_cursor.is_some(),
            "Applied feed page"
        );
        Ok(appended)
    }

    /// Combines the [`Self::should_fetch_next`] guard with the fetch; the
    /// entry point for "viewport reached the sentinel" events.
    pub async fn maybe_fetch_next(
        &mut self,
        near_end: bool,
        source: &impl FeedSource,
    ) -> Result<usize> {
        if !self.wants_next_page(near_end) {
            return Ok(0);
        }
        self.fetch_next_page(source).await
    }

    /// Inserts a freshly created post at the head of the feed.
    pub fn prepend(&mut self, post: Post) {
        if self.seen.insert(post.id.clone()) {
            self.posts.insert(0, post);
        } else {
            debug!(id = %post.id, "Post already in feed, not prepending");
        }
    }

    /// Applies a like/repost/bookmark toggle to a post in the feed list.
    pub fn toggle(&mut self, id: &Id<PostMarker>, kind: ToggleKind) -> Option<Reversal> {
        let post = self.posts.iter_mut().find(|post| post.id == *id)?;
        mutate::toggle(post, kind);
        Some(Reversal {
            post: id.clone(),
            action: Applied::Toggle(kind),
        })
    }

    /// Compensates a toggle after the server rejected it.
    pub fn revert(&mut self, reversal: Reversal) {
        let Some(post) = self.posts.iter_mut().find(|post| post.id == reversal.post) else {
            debug!(post = %reversal.post, "Revert target no longer in feed, skipping");
            return;
        };
        mutate::apply(post, &reversal.action);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        feed::{FeedError, FeedSession},
        mutate::ToggleKind,
    };
    use pinnwand_common::model::{
        Id,
        feed::{FeedPage, PageCursor},
        post::{Post, PostBody, PostStats},
        user::{User, UserHandle},
    };
    use pinnwand_source::{FeedSource, Result as SourceResult, SourceError, mock::MockBackend};
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };
    use time::macros::utc_datetime;

    fn post(id: &str) -> Post {
        Post {
            id: Id::from(id),
            author: User {
                id: Id::from("user-0"),
                name: "Creator 0".to_owned(),
                handle: UserHandle::new_unchecked("creator0"),
                initials: "C0".to_owned(),
                avatar_url: None,
                verified: false,
            },
            body: PostBody::new_unchecked("a post"),
            media_url: None,
            created_at: utc_datetime!(2025-10-24 10:00),
            stats: PostStats {
                likes: 10,
                comments: 0,
                reposts: 0,
            },
            liked: false,
            reposted: false,
            bookmarked: false,
            comments: Vec::new(),
        }
    }

    fn backend(total: u64, page_size: u64) -> MockBackend {
        MockBackend::new()
            .latency(Duration::ZERO)
            .feed_size(total, page_size)
    }

    /// Serves two fixed pages whose ids overlap.
    struct OverlappingSource;

    impl FeedSource for OverlappingSource {
        async fn list_page(&self, cursor: PageCursor) -> SourceResult<FeedPage> {
            let page = if cursor == PageCursor::FIRST {
                FeedPage {
                    posts: vec![post("a"), post("b")],
                    next_cursor: Some(cursor.next()),
                }
            } else {
                FeedPage {
                    posts: vec![post("b"), post("c")],
                    next_cursor: None,
                }
            };
            Ok(page)
        }

        async fn list_posts(&self) -> SourceResult<Vec<Post>> {
            Ok(Vec::new())
        }
    }

    /// Fails the first second-page call, then delegates to the mock backend.
    struct FlakySource {
        inner: MockBackend,
        failed: AtomicBool,
    }

    impl FeedSource for FlakySource {
        async fn list_page(&self, cursor: PageCursor) -> SourceResult<FeedPage> {
            if cursor != PageCursor::FIRST && !self.failed.swap(true, Ordering::Relaxed) {
                return Err(SourceError::Unavailable("flaky".to_owned()));
            }
            self.inner.list_page(cursor).await
        }

        async fn list_posts(&self) -> SourceResult<Vec<Post>> {
            self.inner.list_posts().await
        }
    }

    #[tokio::test]
    async fn two_page_walk_flattens_in_order() {
        let source = backend(20, 10);
        let mut session = FeedSession::new();

        assert!(session.wants_next_page(true));
        assert_eq!(session.fetch_next_page(&source).await.unwrap(), 10);
        assert_eq!(session.len(), 10);
        assert!(session.has_next_page());

        assert_eq!(session.fetch_next_page(&source).await.unwrap(), 10);
        assert_eq!(session.len(), 20);
        assert!(!session.has_next_page());

        let ids: Vec<_> = session
            .posts()
            .iter()
            .map(|post| post.id.get().to_owned())
            .collect();
        let expected: Vec<_> = (0..20).map(|index| format!("post-{index}")).collect();
        assert_eq!(ids, expected);

        // Terminal cursor: permanently false, and further fetches no-op.
        assert!(!session.wants_next_page(true));
        assert_eq!(session.fetch_next_page(&source).await.unwrap(), 0);
        assert_eq!(session.len(), 20);
    }

    #[test]
    fn guard_is_false_whenever_a_fetch_is_in_flight() {
        for near_end in [false, true] {
            for has_next in [false, true] {
                assert!(!FeedSession::should_fetch_next(near_end, has_next, true));
            }
        }
        assert!(FeedSession::should_fetch_next(true, true, false));
        assert!(!FeedSession::should_fetch_next(false, true, false));
        assert!(!FeedSession::should_fetch_next(true, false, false));
    }

    #[tokio::test]
    async fn failed_page_leaves_state_intact_and_is_retryable() {
        let source = FlakySource {
            inner: backend(20, 10),
            failed: AtomicBool::new(false),
        };
        let mut session = FeedSession::new();

        assert_eq!(session.fetch_next_page(&source).await.unwrap(), 10);

        let failed = session.fetch_next_page(&source).await;
        assert!(matches!(failed, Err(FeedError::Source(_))));
        assert_eq!(session.len(), 10);
        assert!(session.has_next_page());
        assert!(!session.is_fetching());

        // Same cursor again, this time it lands.
        assert_eq!(session.fetch_next_page(&source).await.unwrap(), 10);
        assert_eq!(session.len(), 20);
    }

    #[tokio::test]
    async fn duplicate_ids_across_pages_are_dropped() {
        let source = OverlappingSource;
        let mut session = FeedSession::new();

        assert_eq!(session.fetch_next_page(&source).await.unwrap(), 2);
        assert_eq!(session.fetch_next_page(&source).await.unwrap(), 1);

        let ids: Vec<_> = session.posts().iter().map(|post| post.id.get()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn closed_session_discards_fetches() {
        let source = backend(20, 10);
        let mut session = FeedSession::new();
        session.close();

        let result = session.fetch_next_page(&source).await;
        assert!(matches!(result, Err(FeedError::SessionClosed)));
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn prepend_puts_new_posts_first_without_duplicating() {
        let source = backend(10, 10);
        let mut session = FeedSession::new();
        session.fetch_next_page(&source).await.unwrap();

        session.prepend(post("post-new-0"));
        assert_eq!(session.len(), 11);
        assert_eq!(session.posts()[0].id, Id::from("post-new-0"));

        session.prepend(post("post-new-0"));
        assert_eq!(session.len(), 11);
    }

    #[tokio::test]
    async fn feed_toggle_round_trips() {
        let source = backend(10, 10);
        let mut session = FeedSession::new();
        session.fetch_next_page(&source).await.unwrap();

        let id = session.posts()[0].id.clone();
        let before = session.posts()[0].clone();

        let reversal = session.toggle(&id, ToggleKind::Like).unwrap();
        assert_ne!(session.posts()[0], before);

        session.revert(reversal);
        assert_eq!(session.posts()[0], before);
    }
}
