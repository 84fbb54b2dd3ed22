//! Content-performance dashboard types. Pure presentation data; the client
//! fetches these and renders them without further logic.

use crate::model::{Id, post::PostMarker};
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
pub struct DailyMetric {
    pub date: Date,
    pub views: u32,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct PostAnalytics {
    pub post: Id<PostMarker>,
    pub title: String,
    pub media_type: MediaType,
    pub thumbnail_url: String,
    pub created_at: Date,
    pub views: u32,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
    pub saves: u32,
    /// Interactions per view, as a percentage rounded to one decimal.
    pub engagement_rate: f32,
    pub trending: bool,
}

/// A named slice of a breakdown chart (traffic sources, audience age).
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct SourceMetric {
    pub name: String,
    pub value: u32,
    pub color: String,
}

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct Dashboard {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_posts: u32,
    pub total_followers: u32,
    pub follower_growth: f32,
    pub views_growth: f32,
    pub average_engagement_rate: f32,
    pub top_post: PostAnalytics,
    pub recent_posts: Vec<PostAnalytics>,
    pub daily_metrics: Vec<DailyMetric>,
    pub traffic_sources: Vec<SourceMetric>,
    pub audience_age: Vec<SourceMetric>,
    pub recommended_actions: Vec<String>,
}
