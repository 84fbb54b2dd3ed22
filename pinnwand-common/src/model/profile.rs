use crate::model::{post::Post, user::User};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
pub struct ProfileCounts {
    pub posts: u32,
    pub followers: u32,
    pub following: u32,
    pub likes: u32,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Badge {
    pub name: String,
    pub icon: String,
}

/// The current user's profile page data.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Profile {
    pub user: User,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub work: String,
    /// Opaque display string, e.g. "Joined March 2019".
    pub join_date: String,
    pub header_image_url: Option<String>,
    pub counts: ProfileCounts,
    pub badges: Vec<Badge>,
    pub posts: Vec<Post>,
}
