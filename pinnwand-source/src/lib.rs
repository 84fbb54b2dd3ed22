//! Data-source contracts for the client core, plus the mock in-memory
//! backend standing in for a real API.
//!
//! Every operation resolves exactly once; there is no streaming. The client
//! only depends on these trait shapes, so the mock can be swapped for a real
//! transport without touching session state handling.

pub mod mock;

use pinnwand_common::model::{
    Id,
    comment::{Comment, CommentBody},
    dashboard::Dashboard,
    feed::{FeedPage, PageCursor},
    notification::Notification,
    post::{CreatePost, Post, PostMarker},
    profile::Profile,
};
use std::future::Future;
use thiserror::Error;

pub type Result<T, E = SourceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Transient failure; the caller may retry the same request.
    #[error("The backend is unavailable: {0}")]
    Unavailable(String),
}

/// Paginated feed content.
pub trait FeedSource {
    /// Fetches one page. `cursor` must be [`PageCursor::FIRST`] or the
    /// `next_cursor` of the previously returned page.
    fn list_page(&self, cursor: PageCursor) -> impl Future<Output = Result<FeedPage>> + Send;

    /// The unpaginated "top posts" feed used by the simple feed view.
    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>>> + Send;
}

/// Single-post detail and mutations.
pub trait PostSource {
    fn get_post(&self, id: Id<PostMarker>) -> impl Future<Output = Result<Post>> + Send;

    fn create_post(&self, post: CreatePost) -> impl Future<Output = Result<Post>> + Send;

    /// Submits a comment; the returned [`Comment`] carries the
    /// server-assigned id and timestamp.
    fn add_comment(
        &self,
        post: Id<PostMarker>,
        body: CommentBody,
    ) -> impl Future<Output = Result<Comment>> + Send;
}

pub trait ProfileSource {
    fn get_profile(&self) -> impl Future<Output = Result<Profile>> + Send;
}

pub trait NotificationSource {
    fn list_notifications(&self) -> impl Future<Output = Result<Vec<Notification>>> + Send;
}

pub trait DashboardSource {
    fn get_dashboard(&self) -> impl Future<Output = Result<Dashboard>> + Send;
}
