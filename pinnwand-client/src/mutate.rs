//! Optimistic mutation reducers.
//!
//! These run synchronously against cached state, before any server
//! confirmation is awaited. Each toggle is a two-state transition: turning
//! an attribute on bumps its counter and sets the flag, turning it off does
//! the reverse, keeping counter and flag in lockstep. Applying the same
//! toggle again is the exact inverse, which is what [`Reversal`] relies on
//! to compensate a confirmed failure.

use pinnwand_common::model::{
    Id,
    comment::{Comment, CommentMarker},
    post::{Post, PostMarker},
};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum ToggleKind {
    Like,
    Repost,
    /// Bookmarks carry no counter; only the flag flips.
    Bookmark,
}

/// Undo handle for an applied mutation. Feeding it back to the owning
/// session/store restores the pre-mutation counters and flags.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Reversal {
    pub(crate) post: Id<PostMarker>,
    pub(crate) action: Applied,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub(crate) enum Applied {
    Toggle(ToggleKind),
    CommentToggle(Id<CommentMarker>),
}

impl Reversal {
    #[must_use]
    pub fn post(&self) -> &Id<PostMarker> {
        &self.post
    }
}

pub fn toggle(post: &mut Post, kind: ToggleKind) {
    match kind {
        ToggleKind::Like => {
            if post.liked {
                post.stats.likes = post.stats.likes.saturating_sub(1);
            } else {
                post.stats.likes += 1;
            }
            post.liked = !post.liked;
        }
        ToggleKind::Repost => {
            if post.reposted {
                post.stats.reposts = post.stats.reposts.saturating_sub(1);
            } else {
                post.stats.reposts += 1;
            }
            post.reposted = !post.reposted;
        }
        ToggleKind::Bookmark => {
            post.bookmarked = !post.bookmarked;
        }
    }
}

/// Toggles the like state of one comment in the tree. Returns false when no
/// comment has the given id; nothing else in the tree is touched either way.
pub fn toggle_comment_like(comments: &mut [Comment], id: &Id<CommentMarker>) -> bool {
    let Some(comment) = find_comment_mut(comments, id) else {
        return false;
    };

    if comment.liked {
        comment.likes = comment.likes.saturating_sub(1);
    } else {
        comment.likes += 1;
    }
    comment.liked = !comment.liked;
    true
}

/// Worklist traversal of the comment tree; handles any nesting depth
/// without recursing.
pub(crate) fn find_comment_mut<'a>(
    comments: &'a mut [Comment],
    id: &Id<CommentMarker>,
) -> Option<&'a mut Comment> {
    let mut work: Vec<&'a mut Comment> = comments.iter_mut().collect();

    while let Some(comment) = work.pop() {
        if comment.id == *id {
            return Some(comment);
        }
        work.extend(comment.replies.iter_mut());
    }

    None
}

pub(crate) fn apply(post: &mut Post, action: &Applied) -> bool {
    match action {
        Applied::Toggle(kind) => {
            toggle(post, *kind);
            true
        }
        Applied::CommentToggle(comment) => toggle_comment_like(&mut post.comments, comment),
    }
}
