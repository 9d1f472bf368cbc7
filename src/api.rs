use serde::{Deserialize, Serialize};

use feed_ranker::feed::FeedPage;
use feed_ranker::interaction::InteractionKind;
use feed_ranker::{FilterSelection, Post, PreferenceProfile};

#[derive(Debug, Deserialize)]
pub struct ApiFeedRequest {
    pub username: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub preferred_mood: Option<String>,
    pub category: Option<String>,
    pub mood: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

pub struct FeedRequestParts {
    pub username: String,
    pub prefs: PreferenceProfile,
    pub filters: FilterSelection,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ApiFeedRequest {
    pub fn into_parts(self) -> Result<FeedRequestParts, String> {
        let username = self.username.unwrap_or_default().trim().to_string();
        if username.is_empty() {
            return Err("username is required".to_string());
        }

        let prefs = PreferenceProfile::from_parts(
            self.categories,
            self.topics,
            self.preferred_mood.as_deref().unwrap_or("energetic"),
        )
        .map_err(|err| err.to_string())?;

        let filters = FilterSelection::parse(
            self.category.as_deref().unwrap_or("all"),
            self.mood.as_deref().unwrap_or("all"),
            self.sort_by.as_deref().unwrap_or("recommended"),
        )
        .map_err(|err| err.to_string())?;

        Ok(FeedRequestParts {
            username,
            prefs,
            filters,
            page: self.page,
            page_size: self.page_size,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiInteractionRequest {
    pub username: String,
    pub post_id: u64,
    pub interaction_type: String,
    pub interaction_value: Option<f64>,
}

impl ApiInteractionRequest {
    pub fn kind(&self) -> Result<InteractionKind, String> {
        InteractionKind::parse(&self.interaction_type)
            .ok_or_else(|| format!("invalid interaction type: {}", self.interaction_type))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiFeedResponse {
    pub status: String,
    pub post: Vec<Post>,
    pub algorithm_used: String,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub source: String,
}

impl ApiFeedResponse {
    pub fn from_feed(feed: FeedPage, algorithm: &str) -> Self {
        Self {
            status: "success".to_string(),
            post: feed.posts,
            algorithm_used: algorithm.to_string(),
            total_count: feed.total_count,
            page: feed.page,
            page_size: feed.page_size,
            source: feed.source.to_string(),
        }
    }

    pub fn from_posts(posts: Vec<Post>, algorithm: &str, source: &str) -> Self {
        let total_count = posts.len();
        Self {
            status: "success".to_string(),
            post: posts,
            algorithm_used: algorithm.to_string(),
            total_count,
            page: 1,
            page_size: total_count,
            source: source.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiStatusResponse {
    pub status: String,
    pub message: String,
}
