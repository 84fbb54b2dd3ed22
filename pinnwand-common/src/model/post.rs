use crate::model::{EmptyBodyError, Id, comment::Comment, user::User};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// A fully loaded post as held in the client cache.
///
/// The counter/flag pairs move in lockstep: `liked` is true exactly when
/// `stats.likes` includes the current user's like, and likewise for
/// `reposted`/`stats.reposts`. Bookmarks carry no counter.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub author: User,
    pub body: PostBody,
    pub media_url: Option<String>,
    pub created_at: UtcDateTime,
    pub stats: PostStats,
    pub liked: bool,
    pub reposted: bool,
    pub bookmarked: bool,
    /// Top-level comments, newest first.
    pub comments: Vec<Comment>,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostStats {
    pub likes: u32,
    pub comments: u32,
    pub reposts: u32,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct CreatePost {
    pub body: PostBody,
    pub media_url: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct PostBody(String);

impl PostBody {
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
        Self::new(body).expect("Post body was empty.")
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

impl<'de> Deserialize<'de> for PostBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        PostBody::new(inner)
            .map_err(|_| Error::invalid_value(Unexpected::Str(""), &"non-empty PostBody"))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::post::PostBody;

    #[test]
    fn body_rejects_whitespace_only_content() {
        assert!(PostBody::new("hello").is_ok());
        assert!(PostBody::new("").is_err());
        assert!(PostBody::new("   \n\t").is_err());
    }
}
