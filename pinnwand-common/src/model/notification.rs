use crate::model::{Id, post::PostMarker, user::User};
use serde::{Deserialize, Serialize};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct NotificationMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
    Repost,
    Reaction,
    Achievement,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Notification {
    pub id: Id<NotificationMarker>,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: UtcDateTime,
    /// The user whose action triggered the notification.
    pub actor: User,
    /// Further users grouped into the same notification ("and 2 others").
    pub also_from: Vec<User>,
    pub post: Option<Id<PostMarker>>,
    pub post_excerpt: Option<String>,
    pub text: Option<String>,
}
