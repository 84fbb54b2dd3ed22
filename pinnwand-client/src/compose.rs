//! Draft state for the post composer.
//!
//! A [`ComposeSession`] holds the draft text and an in-flight guard.
//! Submission validates the draft before anything leaves the client and
//! clears it only once the server has accepted the post, so a failed
//! submission keeps the draft editable.

use pinnwand_common::model::{
    EmptyBodyError,
    post::{CreatePost, Post, PostBody},
};
use pinnwand_source::{PostSource, SourceError};
use thiserror::Error;
use tracing::debug;

pub type Result<T, E = ComposeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    EmptyContent(#[from] EmptyBodyError),
    /// A previous submission of this draft has not resolved yet.
    #[error("The draft is already being submitted.")]
    AlreadySubmitting,
    #[error(transparent)]
    Source(#[from] SourceError),
}

#[derive(Clone, Debug, Default)]
pub struct ComposeSession {
    content: String,
    media_url: Option<String>,
    submitting: bool,
}

impl ComposeSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.content.trim().is_empty()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_media_url(&mut self, media_url: Option<String>) {
        self.media_url = media_url;
    }

    /// Submits the draft and returns the server-created post.
    ///
    /// The draft is validated before the request is issued, so a
    /// whitespace-only draft never reaches the source. On success the draft
    /// is cleared; on failure it stays untouched for the user to retry.
    pub async fn submit(&mut self, source: &impl PostSource) -> Result<Post> {
        if self.submitting {
            return Err(ComposeError::AlreadySubmitting);
        }
        let body = PostBody::new(&self.content)?;

        self.submitting = true;
        let result = source
            .create_post(CreatePost {
                body,
                media_url: self.media_url.clone(),
            })
            .await;
        self.submitting = false;

        let post = result?;
        debug!(id = %post.id, "Draft accepted, clearing composer");
        self.content.clear();
        self.media_url = None;
        Ok(post)
    }
}
