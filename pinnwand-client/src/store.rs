//! Post detail cache with optimistic mutations.
//!
//! A [`PostStore`] is owned by the view session that created it and passed
//! around explicitly. Mutations targeting an id that is not cached are
//! silent no-ops; they never fail and never touch unrelated entries.

use crate::mutate::{self, Applied, Reversal, ToggleKind};
use pinnwand_common::model::{
    EmptyBodyError, Id,
    comment::{Comment, CommentBody, CommentMarker},
    post::{Post, PostMarker},
    user::User,
};
use std::collections::HashMap;
use time::UtcDateTime;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct PostStore {
    posts: HashMap<Id<PostMarker>, Post>,
    next_local_id: u64,
}

/// Handle to an optimistically inserted comment, awaiting the server's
/// version. Resolve it with [`PostStore::confirm_comment`] or
/// [`PostStore::reject_comment`].
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct PendingComment {
    post: Id<PostMarker>,
    placeholder: Id<CommentMarker>,
}

impl PendingComment {
    #[must_use]
    pub fn post(&self) -> &Id<PostMarker> {
        &self.post
    }

    #[must_use]
    pub fn placeholder(&self) -> &Id<CommentMarker> {
        &self.placeholder
    }
}

impl PostStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, post: Post) {
        self.posts.insert(post.id.clone(), post);
    }

    #[must_use]
    pub fn get(&self, id: &Id<PostMarker>) -> Option<&Post> {
        self.posts.get(id)
    }

    pub fn remove(&mut self, id: &Id<PostMarker>) -> Option<Post> {
        self.posts.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Applies a like/repost/bookmark toggle to the cached post. `None`
    /// means the post is not cached and nothing happened.
    pub fn toggle(&mut self, id: &Id<PostMarker>, kind: ToggleKind) -> Option<Reversal> {
        let Some(post) = self.posts.get_mut(id) else {
            debug!(%id, ?kind, "Toggle target not cached, skipping");
            return None;
        };

        mutate::toggle(post, kind);
        Some(Reversal {
            post: id.clone(),
            action: Applied::Toggle(kind),
        })
    }

    /// Toggles a comment like anywhere in the post's comment tree.
    pub fn toggle_comment_like(
        &mut self,
        post_id: &Id<PostMarker>,
        comment_id: &Id<CommentMarker>,
    ) -> Option<Reversal> {
        let Some(post) = self.posts.get_mut(post_id) else {
            debug!(%post_id, "Comment-like target post not cached, skipping");
            return None;
        };

        if !mutate::toggle_comment_like(&mut post.comments, comment_id) {
            debug!(%post_id, %comment_id, "Comment not found, skipping");
            return None;
        }

        Some(Reversal {
            post: post_id.clone(),
            action: Applied::CommentToggle(comment_id.clone()),
        })
    }

    /// Compensates a previously applied mutation after the server rejected
    /// it, restoring the prior counters and flags.
    pub fn revert(&mut self, reversal: Reversal) {
        let Some(post) = self.posts.get_mut(&reversal.post) else {
            debug!(post = %reversal.post, "Revert target evicted, skipping");
            return;
        };

        mutate::apply(post, &reversal.action);
    }

    /// Optimistically prepends a comment with a locally generated
    /// placeholder id and bumps the post's comment counter.
    ///
    /// Returns `Ok(None)` when the post is not cached. The text is
    /// validated before any state is touched.
    pub fn add_comment(
        &mut self,
        post_id: &Id<PostMarker>,
        author: User,
        text: &str,
    ) -> Result<Option<PendingComment>, EmptyBodyError> {
        let body = CommentBody::new(text)?;

        let Some(post) = self.posts.get_mut(post_id) else {
            debug!(%post_id, "Comment target post not cached, skipping");
            return Ok(None);
        };

        let placeholder: Id<CommentMarker> =
            Id::from(format!("local-comment-{}", self.next_local_id));
        self.next_local_id += 1;

        post.comments.insert(
            0,
            Comment {
                id: placeholder.clone(),
                post: post_id.clone(),
                author,
                body,
                created_at: UtcDateTime::now(),
                likes: 0,
                liked: false,
                replies: Vec::new(),
            },
        );
        post.stats.comments += 1;

        Ok(Some(PendingComment {
            post: post_id.clone(),
            placeholder,
        }))
    }

    /// Swaps the placeholder comment for the server-assigned one.
    pub fn confirm_comment(&mut self, pending: PendingComment, confirmed: Comment) {
        let Some(post) = self.posts.get_mut(&pending.post) else {
            debug!(post = %pending.post, "Pending comment's post evicted, dropping confirmation");
            return;
        };

        match post
            .comments
            .iter_mut()
            .find(|comment| comment.id == pending.placeholder)
        {
            Some(slot) => *slot = confirmed,
            None => debug!(
                placeholder = %pending.placeholder,
                "Placeholder comment gone, dropping confirmation"
            ),
        }
    }

    /// Removes the placeholder comment after a confirmed failure and
    /// restores the comment counter.
    pub fn reject_comment(&mut self, pending: PendingComment) {
        let Some(post) = self.posts.get_mut(&pending.post) else {
            debug!(post = %pending.post, "Pending comment's post evicted, nothing to reject");
            return;
        };

        let before = post.comments.len();
        post.comments
            .retain(|comment| comment.id != pending.placeholder);

        if post.comments.len() < before {
            post.stats.comments = post.stats.comments.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{mutate::ToggleKind, store::PostStore};
    use pinnwand_common::model::{
        Id,
        comment::{Comment, CommentBody},
        post::{Post, PostBody, PostStats},
        user::{User, UserHandle},
    };
    use time::macros::utc_datetime;

    fn author(handle: &str) -> User {
        User {
            id: Id::from(format!("user-{handle}")),
            name: handle.to_owned(),
            handle: UserHandle::new_unchecked(handle),
            initials: "XX".to_owned(),
            avatar_url: None,
            verified: false,
        }
    }

    fn cached_post(id: &str, comment_count: u32) -> Post {
        let comments = (0..comment_count.min(3))
            .map(|index| Comment {
                id: Id::from(format!("{id}-c{index}")),
                post: Id::from(id),
                author: author("commenter"),
                body: CommentBody::new_unchecked("existing comment"),
                created_at: utc_datetime!(2025-10-24 11:00),
                likes: index,
                liked: false,
                replies: Vec::new(),
            })
            .collect();

        Post {
            id: Id::from(id),
            author: author("poster"),
            body: PostBody::new_unchecked("hello world"),
            media_url: None,
            created_at: utc_datetime!(2025-10-24 10:00),
            stats: PostStats {
                likes: 10,
                comments: comment_count,
                reposts: 3,
            },
            liked: false,
            reposted: false,
            bookmarked: false,
            comments,
        }
    }

    fn store_with(post: Post) -> PostStore {
        let mut store = PostStore::new();
        store.insert(post);
        store
    }

    #[test]
    fn toggle_like_round_trips_through_revert() {
        let mut store = store_with(cached_post("p1", 2));
        let original = store.get(&Id::from("p1")).unwrap().clone();

        let reversal = store.toggle(&Id::from("p1"), ToggleKind::Like).unwrap();
        let toggled = store.get(&Id::from("p1")).unwrap();
        assert_eq!(toggled.stats.likes, 11);
        assert!(toggled.liked);

        store.revert(reversal);
        assert_eq!(store.get(&Id::from("p1")).unwrap(), &original);
    }

    #[test]
    fn toggle_on_unknown_post_is_a_no_op() {
        let mut store = store_with(cached_post("p1", 2));
        let before = store.get(&Id::from("p1")).unwrap().clone();

        assert!(store.toggle(&Id::from("p2"), ToggleKind::Like).is_none());
        assert_eq!(store.get(&Id::from("p1")).unwrap(), &before);
    }

    #[test]
    fn add_comment_rejects_empty_text_without_mutating() {
        let mut store = store_with(cached_post("p1", 5));
        let before = store.get(&Id::from("p1")).unwrap().clone();

        assert!(store.add_comment(&Id::from("p1"), author("me"), "").is_err());
        assert!(
            store
                .add_comment(&Id::from("p1"), author("me"), "   ")
                .is_err()
        );
        assert_eq!(store.get(&Id::from("p1")).unwrap(), &before);
    }

    #[test]
    fn add_comment_prepends_and_bumps_the_counter() {
        let mut store = store_with(cached_post("p1", 5));

        let pending = store
            .add_comment(&Id::from("p1"), author("me"), "hello")
            .unwrap()
            .unwrap();

        let post = store.get(&Id::from("p1")).unwrap();
        assert_eq!(post.stats.comments, 6);
        assert_eq!(&post.comments[0].id, pending.placeholder());
        assert_eq!(post.comments[0].body.get(), "hello");
    }

    #[test]
    fn add_comment_on_unknown_post_is_a_no_op() {
        let mut store = store_with(cached_post("p1", 5));
        let before = store.get(&Id::from("p1")).unwrap().clone();

        let pending = store
            .add_comment(&Id::from("p2"), author("me"), "hello")
            .unwrap();
        assert!(pending.is_none());
        assert_eq!(store.get(&Id::from("p1")).unwrap(), &before);
    }

    #[test]
    fn confirm_swaps_the_placeholder_for_the_server_comment() {
        let mut store = store_with(cached_post("p1", 0));

        let pending = store
            .add_comment(&Id::from("p1"), author("me"), "hello")
            .unwrap()
            .unwrap();

        let confirmed = Comment {
            id: Id::from("comment-srv-0"),
            post: Id::from("p1"),
            author: author("me"),
            body: CommentBody::new_unchecked("hello"),
            created_at: utc_datetime!(2025-10-24 12:00),
            likes: 0,
            liked: false,
            replies: Vec::new(),
        };
        store.confirm_comment(pending, confirmed.clone());

        let post = store.get(&Id::from("p1")).unwrap();
        assert_eq!(post.stats.comments, 1);
        assert_eq!(post.comments, vec![confirmed]);
    }

    #[test]
    fn reject_removes_the_placeholder_and_restores_the_counter() {
        let mut store = store_with(cached_post("p1", 2));
        let before = store.get(&Id::from("p1")).unwrap().clone();

        let pending = store
            .add_comment(&Id::from("p1"), author("me"), "hello")
            .unwrap()
            .unwrap();
        store.reject_comment(pending);

        let post = store.get(&Id::from("p1")).unwrap();
        assert_eq!(post.stats.comments, 2);
        assert_eq!(post.comments, before.comments);
    }

    #[test]
    fn comment_like_reversal_restores_the_comment() {
        let mut store = store_with(cached_post("p1", 3));
        let original = store.get(&Id::from("p1")).unwrap().clone();

        let reversal = store
            .toggle_comment_like(&Id::from("p1"), &Id::from("p1-c1"))
            .unwrap();
        let liked = store.get(&Id::from("p1")).unwrap();
        assert!(liked.comments[1].liked);
        assert_eq!(liked.comments[1].likes, 2);

        store.revert(reversal);
        assert_eq!(store.get(&Id::from("p1")).unwrap(), &original);
    }

    #[test]
    fn placeholder_ids_are_unique_per_store() {
        let mut store = store_with(cached_post("p1", 0));

        let first = store
            .add_comment(&Id::from("p1"), author("me"), "one")
            .unwrap()
            .unwrap();
        let second = store
            .add_comment(&Id::from("p1"), author("me"), "two")
            .unwrap()
            .unwrap();

        assert_ne!(first.placeholder(), second.placeholder());
    }
}
