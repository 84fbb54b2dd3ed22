//! Scripted walkthrough of the client core against the mock backend:
//! paginate the feed, open a post, toggle and comment, compose a post, then
//! print the secondary views.

use pinnwand_client::{
    compose::{ComposeError, ComposeSession},
    feed::{FeedError, FeedSession},
    mutate::ToggleKind,
    notifications::NotificationCenter,
    store::PostStore,
};
use pinnwand_common::{
    model::{EmptyBodyError, Id},
    timestamp,
};
use pinnwand_source::{
    DashboardSource, FeedSource, NotificationSource, PostSource, ProfileSource, SourceError,
    mock::{self, MockBackend},
};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use time::UtcDateTime;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error loading the feed: {0}")]
    Feed(#[from] FeedError),
    #[error("Error submitting the draft: {0}")]
    Compose(#[from] ComposeError),
    #[error("Error validating the comment text: {0}")]
    CommentText(#[from] EmptyBodyError),
    #[error("Error talking to the backend: {0}")]
    Source(#[from] SourceError),
    #[error("Error rendering output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    mock_latency_ms: Option<u64>,
    mock_seed: Option<u64>,
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pinnwand_client=debug,pinnwand_source=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let mut backend = MockBackend::new();
    if let Some(latency) = env.mock_latency_ms {
        backend = backend.latency(Duration::from_millis(latency));
    }
    if let Some(seed) = env.mock_seed {
        backend = backend.seed(seed);
    }

    // The unpaginated "top posts" view.
    let top_posts = backend.list_posts().await?;
    info!(posts = top_posts.len(), "Top posts loaded");

    // Feed: two pages of infinite scroll, then a like on the first post.
    let mut feed = FeedSession::new();
    feed.fetch_next_page(&backend).await?;
    feed.maybe_fetch_next(true, &backend).await?;
    info!(
        posts = feed.len(),
        has_next = feed.has_next_page(),
        "Feed loaded"
    );
    if let Some(first) = feed.posts().first().map(|post| post.id.clone()) {
        feed.toggle(&first, ToggleKind::Like);
        info!(id = %first, "Liked the first feed post");
    }

    // Post detail: cache it, toggle, comment, confirm against the server.
    let mut store = PostStore::new();
    let detail = backend.get_post(Id::from("post-detail-1")).await?;
    let detail_id = detail.id.clone();
    store.insert(detail);

    store.toggle(&detail_id, ToggleKind::Repost);
    if let Some(pending) = store.add_comment(
        &detail_id,
        MockBackend::current_user(),
        "This is exactly what I needed, thanks!",
    )? {
        let body = store
            .get(&detail_id)
            .and_then(|post| post.comments.first())
            .map(|comment| comment.body.clone());
        if let Some(body) = body {
            let confirmed = backend.add_comment(detail_id.clone(), body).await?;
            store.confirm_comment(pending, confirmed);
        }
    }
    if let Some(post) = store.get(&detail_id) {
        info!(
            id = %post.id,
            comments = post.stats.comments,
            posted = timestamp::relative(post.created_at, UtcDateTime::now()),
            "Post detail after mutations"
        );
    }

    // Compose: submit a draft and prepend the server's post to the feed.
    let mut composer = ComposeSession::new();
    composer.set_content("Just set up my corner of the pinboard. Hello!");
    let created = composer.submit(&backend).await?;
    feed.prepend(created);
    info!(posts = feed.len(), "Feed after composing");

    // Sidebar content next to the feed.
    for topic in mock::trending_topics() {
        debug!(topic = topic.name, posts = topic.post_count, "Trending");
    }
    for user in mock::suggested_users() {
        debug!(handle = user.handle.get(), "Suggested follow");
    }

    // Secondary views.
    let mut center = NotificationCenter::new();
    center.refresh(&backend).await?;
    info!(unread = center.unread_count(), "Notifications");
    center.mark_all_read();

    let profile = backend.get_profile().await?;
    info!(
        handle = profile.user.handle.get(),
        followers = profile.counts.followers,
        "Profile"
    );

    let dashboard = backend.get_dashboard().await?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    feed.close();
    Ok(())
}
