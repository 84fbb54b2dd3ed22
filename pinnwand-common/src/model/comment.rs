use crate::model::{EmptyBodyError, Id, post::PostMarker, user::User};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

/// A comment in a post's comment tree.
///
/// Top-level comments sit directly in [`Post::comments`]; replies nest one
/// level below in practice, though nothing bounds the depth here. The
/// `likes`/`liked` pair follows the same lockstep rule as posts.
///
/// [`Post::comments`]: crate::model::post::Post
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub post: Id<PostMarker>,
    pub author: User,
    pub body: CommentBody,
    pub created_at: UtcDateTime,
    pub likes: u32,
    pub liked: bool,
    pub replies: Vec<Comment>,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentBody(String);

impl CommentBody {
    pub fn new(body: impl Into<String>) -> Result<Self, EmptyBodyError> {
        let body = body.into();
        if body.trim().is_empty() {
            Err(EmptyBodyError)
        } else {
            Ok(Self(body))
        }
    }

    #[must_use]
    pub fn new_unchecked(body: impl Into<String>) -> Self {
        Self::new(body).expect("Comment body was empty.")
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for CommentBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        CommentBody::new(inner)
            .map_err(|_| Error::invalid_value(Unexpected::Str(""), &"non-empty CommentBody"))
    }
}
