//! Mock in-memory backend.
//!
//! Stands in for a real API: every call sleeps for a fixed artificial
//! latency and then returns hard-coded or seeded-random content. Generation
//! is deterministic for a given seed so tests can rely on exact ids and
//! page shapes.

use crate::{
    DashboardSource, FeedSource, NotificationSource, PostSource, ProfileSource, Result,
    SourceError,
};
use pinnwand_common::model::{
    Id,
    comment::{Comment, CommentBody},
    dashboard::{DailyMetric, Dashboard, MediaType, PostAnalytics, SourceMetric},
    feed::{FeedPage, PageCursor, SuggestedUser, TrendingTopic},
    notification::{Notification, NotificationKind},
    post::{CreatePost, Post, PostBody, PostMarker, PostStats},
    profile::{Badge, Profile, ProfileCounts},
    user::{User, UserHandle},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};
use time::{Date, UtcDateTime};
use tokio::time::sleep;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(600);
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_TOTAL_POSTS: u64 = 100;

const FEED_CAPTIONS: [&str; 3] = [
    "Just finished this new piece! What do you think? #creativework #process #artistlife",
    "Exploring new techniques and pushing boundaries with this project. Always learning, always growing.",
    "Behind the scenes look at my latest work in progress. Can't wait to share the final result!",
];

pub struct MockBackend {
    latency: Duration,
    seed: u64,
    page_size: u64,
    total_posts: u64,
    next_server_id: AtomicU64,
    fail_next_page: AtomicBool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            seed: 0x5EED,
            page_size: DEFAULT_PAGE_SIZE,
            total_posts: DEFAULT_TOTAL_POSTS,
            next_server_id: AtomicU64::new(0),
            fail_next_page: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn feed_size(mut self, total_posts: u64, page_size: u64) -> Self {
        self.total_posts = total_posts;
        self.page_size = page_size;
        self
    }

    /// Makes the next `list_page` call fail with a transient error. The
    /// failure is consumed; the call after it succeeds again.
    pub fn inject_page_failure(&self) {
        self.fail_next_page.store(true, Ordering::Relaxed);
    }

    /// The signed-in user all mutations are attributed to.
    #[must_use]
    pub fn current_user() -> User {
        User {
            id: Id::from("user-current"),
            name: "Mike Edwards".to_owned(),
            handle: UserHandle::new_unchecked("mike_dev"),
            initials: "ME".to_owned(),
            avatar_url: None,
            verified: false,
        }
    }

    fn detail_author() -> User {
        User {
            id: Id::from("user-456"),
            name: "Ryan Chen".to_owned(),
            handle: UserHandle::new_unchecked("ryanchen"),
            initials: "RC".to_owned(),
            avatar_url: None,
            verified: true,
        }
    }

    fn feed_author(index: u64) -> User {
        User {
            id: Id::from(format!("user-{index}")),
            name: format!("Creator {index}"),
            handle: UserHandle::new_unchecked(format!("creator{index}")),
            initials: format!("C{index}"),
            avatar_url: Some(format!("https://picsum.photos/seed/avatar{index}/200/200")),
            verified: index % 3 == 0,
        }
    }

    fn showcase_author(name: &str, handle: &str, initials: &str, verified: bool) -> User {
        User {
            id: Id::from(format!("user-{handle}")),
            name: name.to_owned(),
            handle: UserHandle::new_unchecked(handle),
            initials: initials.to_owned(),
            avatar_url: None,
            verified,
        }
    }

    fn feed_post(index: u64, now: UtcDateTime, rng: &mut StdRng) -> Post {
        let id: Id<PostMarker> = Id::from(format!("post-{index}"));
        let author_index = index % 15;
        let caption = match index % 3 {
            0 => FEED_CAPTIONS[0],
            1 => FEED_CAPTIONS[1],
            _ => FEED_CAPTIONS[2],
        };
        let hours_ago: i64 = rng.random_range(1..=72);
        let created_at = now - time::Duration::hours(hours_ago);
        let likes: u32 = rng.random_range(50..1000);
        let comment_count: u32 = rng.random_range(5..100);
        let reposts: u32 = rng.random_range(5..80);
        let comment_likes: u32 = rng.random_range(5..30);

        // Every other post ships with its top comment inlined.
        let comments = if index % 2 == 0 {
            vec![Comment {
                id: Id::from(format!("comment-{index}-1")),
                post: id.clone(),
                author: Self::feed_author((author_index + 1) % 15),
                body: CommentBody::new_unchecked(
                    "This is absolutely stunning work! Love the details.",
                ),
                created_at: created_at + time::Duration::hours(1),
                likes: comment_likes,
                liked: false,
                replies: Vec::new(),
            }]
        } else {
            Vec::new()
        };

        Post {
            id,
            author: Self::feed_author(author_index),
            body: PostBody::new_unchecked(caption),
            media_url: Some(format!("https://picsum.photos/seed/post{index}/600/600")),
            created_at,
            stats: PostStats {
                likes,
                comments: comment_count,
                reposts,
            },
            liked: index % 4 == 0,
            reposted: false,
            bookmarked: index % 7 == 0,
            comments,
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scale(views: u32, factor: f32) -> u32 {
        (views as f32 * factor) as u32
    }

    #[allow(clippy::cast_precision_loss)]
    fn post_analytics(index: u32, trending: bool, today: Date, rng: &mut StdRng) -> PostAnalytics {
        let views: u32 = 500 + rng.random_range(0..4500);
        let likes = Self::scale(views, 0.10 + rng.random::<f32>() * 0.20);
        let comments = Self::scale(views, 0.02 + rng.random::<f32>() * 0.06);
        let shares = Self::scale(views, 0.01 + rng.random::<f32>() * 0.04);
        let saves = Self::scale(views, 0.005 + rng.random::<f32>() * 0.03);
        let interactions = likes + comments + shares + saves;
        let engagement_rate = (interactions as f32 / views as f32 * 1000.0).round() / 10.0;
        let days_ago: i64 = rng.random_range(0..30);

        PostAnalytics {
            post: Id::from(format!("post-{index}")),
            title: format!("Project {index}"),
            media_type: if rng.random_bool(0.7) {
                MediaType::Image
            } else {
                MediaType::Video
            },
            thumbnail_url: format!("https://picsum.photos/seed/{index}/200/200"),
            created_at: today - time::Duration::days(days_ago),
            views,
            likes,
            comments,
            shares,
            saves,
            engagement_rate,
            trending,
        }
    }
}

impl FeedSource for MockBackend {
    async fn list_page(&self, cursor: PageCursor) -> Result<FeedPage> {
        sleep(self.latency).await;

        if self.fail_next_page.swap(false, Ordering::Relaxed) {
            return Err(SourceError::Unavailable(
                "injected page failure".to_owned(),
            ));
        }

        let start = cursor.get().saturating_sub(1) * self.page_size;
        let end = (start + self.page_size).min(self.total_posts);
        let now = UtcDateTime::now();
        let mut rng = StdRng::seed_from_u64(self.seed ^ cursor.get());

        let posts = (start..end)
            .map(|index| Self::feed_post(index, now, &mut rng))
            .collect();
        let next_cursor = (end < self.total_posts).then(|| cursor.next());

        Ok(FeedPage { posts, next_cursor })
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        sleep(self.latency).await;
        let now = UtcDateTime::now();

        let fixture = [
            (
                "post-top-1",
                Self::showcase_author("Alex Rivera", "alexdesign", "AR", true),
                "Just launched our new product design system! It's been months in the making, \
                 but I'm thrilled with how it turned out. Check out the case study on my \
                 portfolio site.",
                Some("https://picsum.photos/seed/picsum/600/400"),
                2_i64,
                PostStats { likes: 248, comments: 42, reposts: 18 },
                Some(("Sarah Chen", "sarahc", "SC", "This looks amazing! Love the attention to detail.")),
            ),
            (
                "post-top-2",
                Self::showcase_author("Priya Sharma", "priyacode", "PS", true),
                "🚀 Just released v2.0 of my React component library with full TypeScript \
                 support and improved accessibility. Open source and ready for your projects!",
                None,
                4,
                PostStats { likes: 587, comments: 93, reposts: 146 },
                Some(("Marco Dev", "marco_dev", "MD", "Been waiting for this! The TypeScript types are perfect 👌")),
            ),
            (
                "post-top-3",
                Self::showcase_author("Jordan Taylor", "jordanux", "JT", false),
                "User research session today revealed some fascinating insights about how \
                 people navigate complex dashboards. Key finding: users prefer progressive \
                 disclosure of features rather than seeing everything at once.",
                Some("https://picsum.photos/seed/picsum/600/400"),
                6,
                PostStats { likes: 156, comments: 37, reposts: 24 },
                Some(("UX Collective", "uxcollective", "UX", "Great insight. We've noticed similar patterns in our research.")),
            ),
            (
                "post-top-4",
                Self::showcase_author("Dev Community", "devcom", "DC", true),
                "📊 Poll: What's your preferred state management solution in 2025?\n\
                 Interesting to see how preferences have shifted over the years!",
                None,
                12,
                PostStats { likes: 892, comments: 241, reposts: 77 },
                Some(("TypeScript Fan", "ts_dev", "TD", "Zustand's TypeScript integration is what won me over. So simple yet powerful!")),
            ),
        ];

        let posts = fixture
            .into_iter()
            .map(|(id, author, content, media, hours_ago, stats, top_comment)| {
                let id: Id<PostMarker> = Id::from(id);
                let created_at = now - time::Duration::hours(hours_ago);
                let comments = top_comment
                    .map(|(name, handle, initials, text)| Comment {
                        id: Id::from(format!("{id}-c1")),
                        post: id.clone(),
                        author: Self::showcase_author(name, handle, initials, false),
                        body: CommentBody::new_unchecked(text),
                        created_at: created_at + time::Duration::hours(1),
                        likes: 0,
                        liked: false,
                        replies: Vec::new(),
                    })
                    .into_iter()
                    .collect();

                Post {
                    id,
                    author,
                    body: PostBody::new_unchecked(content),
                    media_url: media.map(str::to_owned),
                    created_at,
                    stats,
                    liked: false,
                    reposted: false,
                    bookmarked: false,
                    comments,
                }
            })
            .collect();

        Ok(posts)
    }
}

impl PostSource for MockBackend {
    async fn get_post(&self, id: Id<PostMarker>) -> Result<Post> {
        sleep(self.latency).await;
        let now = UtcDateTime::now();
        let author = Self::detail_author();

        let comments = vec![
            Comment {
                id: Id::from("comment-1"),
                post: id.clone(),
                author: Self::showcase_author("Sarah Chen", "sarahc", "SC", false),
                body: CommentBody::new_unchecked(
                    "This looks amazing! I've been looking for a library like this. The \
                     accessibility hooks will be super helpful for a project I'm working on \
                     right now.",
                ),
                created_at: now - time::Duration::hours(2),
                likes: 18,
                liked: false,
                replies: Vec::new(),
            },
            Comment {
                id: Id::from("comment-2"),
                post: id.clone(),
                author: Self::showcase_author("Marco Dev", "marco_dev", "MD", true),
                body: CommentBody::new_unchecked(
                    "Just checked it out - the code is so clean and well-documented. Great \
                     job! Question: are you planning to add any form validation hooks in the \
                     future?",
                ),
                created_at: now - time::Duration::hours(1),
                likes: 9,
                liked: false,
                replies: Vec::new(),
            },
            Comment {
                id: Id::from("comment-3"),
                post: id.clone(),
                author: Self::showcase_author("Emma Johnson", "emmaj", "EJ", false),
                body: CommentBody::new_unchecked(
                    "I've been using this library for a few hours now and it's already saving \
                     me so much time. The useDebouncedSearch hook is particularly useful. \
                     Thanks for making this open source!",
                ),
                created_at: now - time::Duration::minutes(45),
                likes: 7,
                liked: false,
                replies: vec![Comment {
                    id: Id::from("reply-1"),
                    post: id.clone(),
                    author: author.clone(),
                    body: CommentBody::new_unchecked(
                        "Thanks Emma! I'm glad you're finding it useful. The search hook was \
                         one of the first ones I built, so it's great to hear it's working \
                         well for you.",
                    ),
                    created_at: now - time::Duration::minutes(30),
                    likes: 4,
                    liked: false,
                    replies: Vec::new(),
                }],
            },
        ];

        Ok(Post {
            media_url: Some(format!("https://picsum.photos/seed/{id}/600/400")),
            id,
            author,
            body: PostBody::new_unchecked(
                "Just released my new open-source React hooks library! It includes \
                 performance-optimized state management solutions and \
                 accessibility-enhanced interaction hooks. Check it out at \
                 github.com/ryanchendev/react-power-hooks. #React #OpenSource #WebDev",
            ),
            created_at: now - time::Duration::hours(3),
            stats: PostStats {
                likes: 243,
                comments: 42,
                reposts: 78,
            },
            liked: false,
            reposted: false,
            bookmarked: false,
            comments,
        })
    }

    async fn create_post(&self, post: CreatePost) -> Result<Post> {
        sleep(self.latency).await;
        let serial = self.next_server_id.fetch_add(1, Ordering::Relaxed);

        Ok(Post {
            id: Id::from(format!("post-new-{serial}")),
            author: Self::current_user(),
            body: post.body,
            media_url: post.media_url,
            created_at: UtcDateTime::now(),
            stats: PostStats::default(),
            liked: false,
            reposted: false,
            bookmarked: false,
            comments: Vec::new(),
        })
    }

    async fn add_comment(&self, post: Id<PostMarker>, body: CommentBody) -> Result<Comment> {
        sleep(self.latency).await;
        let serial = self.next_server_id.fetch_add(1, Ordering::Relaxed);

        Ok(Comment {
            id: Id::from(format!("comment-srv-{serial}")),
            post,
            author: Self::current_user(),
            body,
            created_at: UtcDateTime::now(),
            likes: 0,
            liked: false,
            replies: Vec::new(),
        })
    }
}

impl ProfileSource for MockBackend {
    async fn get_profile(&self) -> Result<Profile> {
        sleep(self.latency).await;
        let now = UtcDateTime::now();
        let user = Self::detail_author();

        let post_fixture = [
            (
                "profile-post-1",
                "Just released my new open-source React hooks library! Check it out at \
                 github.com/ryanchendev/react-power-hooks. #React #OpenSource #WebDev",
                None,
                2_i64,
                PostStats { likes: 243, comments: 42, reposts: 78 },
            ),
            (
                "profile-post-2",
                "Conference talk on 'Building Accessible Web Apps' went great today! Thanks \
                 to everyone who attended. Slides are now available on my website.",
                Some("https://picsum.photos/seed/picsum/600/400"),
                24,
                PostStats { likes: 512, comments: 64, reposts: 112 },
            ),
            (
                "profile-post-3",
                "TypeScript tip of the day: Use discriminated unions for more precise type \
                 checking in your components. This prevents invalid prop combinations! \
                 #TypeScript #WebDevTips",
                None,
                48,
                PostStats { likes: 378, comments: 52, reposts: 91 },
            ),
        ];

        let posts = post_fixture
            .into_iter()
            .map(|(id, content, media, hours_ago, stats)| Post {
                id: Id::from(id),
                author: user.clone(),
                body: PostBody::new_unchecked(content),
                media_url: media.map(str::to_owned),
                created_at: now - time::Duration::hours(hours_ago),
                stats,
                liked: false,
                reposted: false,
                bookmarked: false,
                comments: Vec::new(),
            })
            .collect();

        Ok(Profile {
            user,
            bio: "Senior Frontend Engineer | TypeScript enthusiast | Building user-friendly \
                  interfaces with React & modern web tech | Open source contributor"
                .to_owned(),
            location: "San Francisco, CA".to_owned(),
            website: "ryanchen.dev".to_owned(),
            work: "Frontend Lead at TechSolutions Inc.".to_owned(),
            join_date: "Joined March 2019".to_owned(),
            header_image_url: Some("https://picsum.photos/seed/avatar/1200/300".to_owned()),
            counts: ProfileCounts {
                posts: 482,
                followers: 8754,
                following: 325,
                likes: 2103,
            },
            badges: vec![
                Badge {
                    name: "Certified React Developer".to_owned(),
                    icon: "🏆".to_owned(),
                },
                Badge {
                    name: "Open Source Contributor".to_owned(),
                    icon: "⭐".to_owned(),
                },
                Badge {
                    name: "TypeScript Expert".to_owned(),
                    icon: "🔷".to_owned(),
                },
            ],
            posts,
        })
    }
}

impl NotificationSource for MockBackend {
    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        sleep(self.latency).await;
        let now = UtcDateTime::now();

        Ok(vec![
            Notification {
                id: Id::from("notification-1"),
                kind: NotificationKind::Like,
                read: false,
                created_at: now - time::Duration::minutes(2),
                actor: Self::showcase_author("Sarah Chen", "sarahc", "SC", true),
                also_from: vec![
                    Self::showcase_author("Alex Rivera", "alexdesign", "AR", true),
                    Self::showcase_author("Jordan Lee", "jordanlee", "JL", false),
                ],
                post: Some(Id::from("post-1")),
                post_excerpt: Some(
                    "Just released my new open-source React hooks library!".to_owned(),
                ),
                text: None,
            },
            Notification {
                id: Id::from("notification-2"),
                kind: NotificationKind::Follow,
                read: false,
                created_at: now - time::Duration::minutes(45),
                actor: Self::showcase_author("Emma Johnson", "emmaj", "EJ", false),
                also_from: Vec::new(),
                post: None,
                post_excerpt: None,
                text: None,
            },
            Notification {
                id: Id::from("notification-3"),
                kind: NotificationKind::Comment,
                read: false,
                created_at: now - time::Duration::hours(1),
                actor: Self::showcase_author("Priya Sharma", "priyacode", "PS", true),
                also_from: Vec::new(),
                post: Some(Id::from("post-2")),
                post_excerpt: Some(
                    "Conference talk on 'Building Accessible Web Apps' went great today!"
                        .to_owned(),
                ),
                text: Some(
                    "Your slides were incredibly helpful! Would you mind sharing your \
                     presentation template?"
                        .to_owned(),
                ),
            },
            Notification {
                id: Id::from("notification-4"),
                kind: NotificationKind::Repost,
                read: true,
                created_at: now - time::Duration::hours(3),
                actor: Self::showcase_author("Marco Dev", "marco_dev", "MD", true),
                also_from: Vec::new(),
                post: Some(Id::from("post-1")),
                post_excerpt: Some(
                    "Just released my new open-source React hooks library!".to_owned(),
                ),
                text: None,
            },
            Notification {
                id: Id::from("notification-5"),
                kind: NotificationKind::Achievement,
                read: true,
                created_at: now - time::Duration::days(1),
                actor: Self::current_user(),
                also_from: Vec::new(),
                post: None,
                post_excerpt: None,
                text: Some("You earned the Open Source Contributor badge!".to_owned()),
            },
        ])
    }
}

impl DashboardSource for MockBackend {
    #[allow(clippy::cast_precision_loss)]
    async fn get_dashboard(&self) -> Result<Dashboard> {
        sleep(self.latency).await;
        let mut rng = StdRng::seed_from_u64(self.seed ^ 0xDA5B);
        let today = UtcDateTime::now().date();

        let daily_metrics: Vec<DailyMetric> = (0..14)
            .map(|day| {
                let views: u32 = 500 + rng.random_range(0..1000);
                DailyMetric {
                    date: today - time::Duration::days(13 - day),
                    views,
                    likes: Self::scale(views, 0.10 + rng.random::<f32>() * 0.15),
                    comments: Self::scale(views, 0.02 + rng.random::<f32>() * 0.05),
                    shares: Self::scale(views, 0.01 + rng.random::<f32>() * 0.03),
                }
            })
            .collect();

        let total_views: u64 = daily_metrics.iter().map(|day| u64::from(day.views)).sum();
        let total_likes: u64 = daily_metrics.iter().map(|day| u64::from(day.likes)).sum();
        let total_comments: u64 = daily_metrics
            .iter()
            .map(|day| u64::from(day.comments))
            .sum();
        let total_shares: u64 = daily_metrics.iter().map(|day| u64::from(day.shares)).sum();

        let mut top_post = Self::post_analytics(1, true, today, &mut rng);
        let mut recent_posts = vec![top_post.clone()];
        for index in 2..=10 {
            let post = Self::post_analytics(index, false, today, &mut rng);
            if post.views > top_post.views {
                top_post = post.clone();
            }
            recent_posts.push(post);
        }

        let rate_sum: f32 = recent_posts.iter().map(|post| post.engagement_rate).sum();
        let average_engagement_rate =
            (rate_sum / recent_posts.len() as f32 * 10.0).round() / 10.0;

        Ok(Dashboard {
            total_views,
            total_likes,
            total_comments,
            total_shares,
            total_posts: 10,
            total_followers: 2547 + rng.random_range(0..100),
            follower_growth: (5 + rng.random_range(0..10)) as f32,
            views_growth: (12 + rng.random_range(0..18)) as f32,
            average_engagement_rate,
            top_post,
            recent_posts,
            daily_metrics,
            traffic_sources: vec![
                source_metric("Discover", 45, "#8884d8"),
                source_metric("Search", 25, "#82ca9d"),
                source_metric("Profile", 15, "#ffc658"),
                source_metric("Direct", 10, "#ff8042"),
                source_metric("External", 5, "#0088fe"),
            ],
            audience_age: vec![
                source_metric("18-24", 35, "#8884d8"),
                source_metric("25-34", 40, "#82ca9d"),
                source_metric("35-44", 15, "#ffc658"),
                source_metric("45+", 10, "#ff8042"),
            ],
            recommended_actions: vec![
                "Post more frequently during peak hours (5-7 PM)".to_owned(),
                "Engage with comments within first hour of posting".to_owned(),
                "Try carousel posts for higher engagement".to_owned(),
                "Collaborate with creators in similar niche".to_owned(),
            ],
        })
    }
}

fn source_metric(name: &str, value: u32, color: &str) -> SourceMetric {
    SourceMetric {
        name: name.to_owned(),
        value,
        color: color.to_owned(),
    }
}

/// Sidebar trending topics fixture.
#[must_use]
pub fn trending_topics() -> Vec<TrendingTopic> {
    [
        ("ReactDevSummit", "5.2K posts"),
        ("TypeScriptUpdate", "3.8K posts"),
        ("AccessibilityMatters", "2.9K posts"),
        ("DesignSystems", "6.1K posts"),
        ("AIForDevelopers", "8.7K posts"),
    ]
    .into_iter()
    .map(|(name, post_count)| TrendingTopic {
        name: name.to_owned(),
        post_count: post_count.to_owned(),
    })
    .collect()
}

/// Sidebar "who to follow" fixture.
#[must_use]
pub fn suggested_users() -> Vec<SuggestedUser> {
    [
        ("Emma Johnson", "emmaj", "Senior UI Engineer at Netflix", "EJ"),
        ("Kai Zhang", "kaiz", "Design Systems Architect", "KZ"),
        ("Tech Weekly", "techweekly", "Latest news in web development", "TW"),
    ]
    .into_iter()
    .map(|(name, handle, bio, initials)| SuggestedUser {
        id: Id::from(format!("user-{handle}")),
        name: name.to_owned(),
        handle: UserHandle::new_unchecked(handle),
        bio: bio.to_owned(),
        initials: initials.to_owned(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        DashboardSource, FeedSource, PostSource, SourceError,
        mock::MockBackend,
    };
    use pinnwand_common::model::{
        Id,
        comment::CommentBody,
        feed::PageCursor,
        post::{CreatePost, PostBody},
    };
    use std::time::Duration;

    fn backend() -> MockBackend {
        MockBackend::new().latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn pages_cover_the_feed_in_order() {
        let backend = backend().feed_size(20, 10);

        let first = backend.list_page(PageCursor::FIRST).await.unwrap();
        assert_eq!(first.posts.len(), 10);
        assert_eq!(first.posts[0].id, Id::from("post-0"));
        assert_eq!(first.posts[9].id, Id::from("post-9"));
        let second_cursor = first.next_cursor.unwrap();
        assert_eq!(second_cursor, PageCursor::new(2));

        let second = backend.list_page(second_cursor).await.unwrap();
        assert_eq!(second.posts.len(), 10);
        assert_eq!(second.posts[0].id, Id::from("post-10"));
        assert_eq!(second.posts[9].id, Id::from("post-19"));
        assert_eq!(second.next_cursor, None);
    }

    #[tokio::test]
    async fn cursor_past_the_end_yields_an_empty_terminal_page() {
        let backend = backend().feed_size(20, 10);

        let page = backend.list_page(PageCursor::new(40)).await.unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn generation_is_deterministic_per_seed() {
        let a = backend().seed(7);
        let b = backend().seed(7);

        let page_a = a.list_page(PageCursor::FIRST).await.unwrap();
        let page_b = b.list_page(PageCursor::FIRST).await.unwrap();

        let ids_a: Vec<_> = page_a.posts.iter().map(|post| post.id.clone()).collect();
        let ids_b: Vec<_> = page_b.posts.iter().map(|post| post.id.clone()).collect();
        assert_eq!(ids_a, ids_b);

        let stats_a: Vec<_> = page_a.posts.iter().map(|post| post.stats).collect();
        let stats_b: Vec<_> = page_b.posts.iter().map(|post| post.stats).collect();
        assert_eq!(stats_a, stats_b);
    }

    #[tokio::test]
    async fn injected_failure_is_consumed_by_one_call() {
        let backend = backend();

        backend.inject_page_failure();
        let failed = backend.list_page(PageCursor::FIRST).await;
        assert!(matches!(failed, Err(SourceError::Unavailable(_))));

        let retried = backend.list_page(PageCursor::FIRST).await;
        assert!(retried.is_ok());
    }

    #[tokio::test]
    async fn server_assigned_ids_are_sequential() {
        let backend = backend();

        let post = backend
            .create_post(CreatePost {
                body: PostBody::new_unchecked("first!"),
                media_url: None,
            })
            .await
            .unwrap();
        assert_eq!(post.id, Id::from("post-new-0"));
        assert_eq!(post.stats.likes, 0);
        assert!(post.comments.is_empty());

        let comment = backend
            .add_comment(Id::from("post-1"), CommentBody::new_unchecked("hello"))
            .await
            .unwrap();
        assert_eq!(comment.id, Id::from("comment-srv-1"));
        assert_eq!(comment.likes, 0);
        assert!(!comment.liked);
    }

    #[tokio::test]
    async fn detail_post_carries_a_nested_reply() {
        let backend = backend();

        let post = backend.get_post(Id::from("post-123")).await.unwrap();
        assert_eq!(post.id, Id::from("post-123"));
        assert_eq!(post.comments.len(), 3);
        assert_eq!(post.comments[2].replies.len(), 1);
        assert_eq!(post.comments[2].replies[0].id, Id::from("reply-1"));
    }

    #[tokio::test]
    async fn dashboard_totals_match_the_daily_series() {
        let backend = backend();

        let dashboard = backend.get_dashboard().await.unwrap();
        assert_eq!(dashboard.daily_metrics.len(), 14);

        let views: u64 = dashboard
            .daily_metrics
            .iter()
            .map(|day| u64::from(day.views))
            .sum();
        assert_eq!(dashboard.total_views, views);

        assert!(dashboard.recent_posts.len() == 10);
        assert!(
            dashboard
                .recent_posts
                .iter()
                .all(|post| post.views <= dashboard.top_post.views)
        );
    }
}
