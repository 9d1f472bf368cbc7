use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::catalog::{CatalogQuery, CatalogSource};
use crate::config::SourceConfig;
use crate::interaction::{Interaction, InteractionTransport};
use crate::{Mood, Post, TransportError};

#[derive(Clone)]
pub struct PersonalizationClient {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiFeedResponse {
    pub status: String,
    #[serde(default)]
    pub post: Vec<ApiPost>,
    #[serde(default)]
    pub algorithm_used: Option<String>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPost {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub owner: Option<ApiOwner>,
    pub category: ApiNamed,
    pub topic: ApiNamed,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub upvote_count: u64,
    #[serde(default)]
    pub share_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub rating_count: u64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub video_link: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiOwner {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiNamed {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiStatusResponse {
    status: String,
    #[serde(default)]
    message: String,
}

impl From<ApiPost> for Post {
    fn from(api: ApiPost) -> Self {
        Post {
            id: api.id,
            title: api.title,
            owner: api.owner.map(|owner| owner.username).unwrap_or_default(),
            category: api.category.name,
            topic: api.topic.name,
            // Moods outside the enumeration are treated as absent.
            mood: api.mood.as_deref().and_then(Mood::parse),
            view_count: api.view_count,
            upvote_count: api.upvote_count,
            share_count: api.share_count,
            comment_count: api.comment_count,
            rating_count: api.rating_count,
            average_rating: api.average_rating.clamp(0.0, 100.0),
            created_at: api.created_at,
            tags: api.tags,
            video_link: api.video_link,
            thumbnail_url: api.thumbnail_url,
        }
    }
}

impl PersonalizationClient {
    pub fn from_config(config: &SourceConfig) -> Result<Self, String> {
        let timeout = Duration::from_millis(config.timeout_ms);
        PersonalizationClient::new(config.endpoint.clone(), timeout)
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build personalization client: {}", err))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<reqwest::Url, TransportError> {
        let base = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);
        reqwest::Url::parse_with_params(&base, params)
            .map_err(|err| TransportError::InvalidEndpoint(format!("{}: {}", base, err)))
    }

    async fn get_posts(
        &self,
        path: &str,
        params: Vec<(&str, String)>,
    ) -> Result<Vec<Post>, TransportError> {
        let url = self.url(path, &params)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let payload = response.json::<ApiFeedResponse>().await?;
        if payload.status != "success" {
            return Err(TransportError::Rejected(payload.status));
        }

        debug!(
            path,
            posts = payload.post.len(),
            algorithm = payload.algorithm_used.as_deref().unwrap_or("unknown"),
            "personalization service responded"
        );
        Ok(payload.post.into_iter().map(Post::from).collect())
    }
}

fn paging_params(query: &CatalogQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", query.page.max(1).to_string()),
        ("page_size", query.page_size.max(1).to_string()),
    ];
    if let Some(category) = query.category.as_ref() {
        params.push(("category", category.clone()));
    }
    params
}

#[async_trait::async_trait]
impl CatalogSource for PersonalizationClient {
    async fn fetch_feed(&self, query: &CatalogQuery) -> Result<Vec<Post>, TransportError> {
        let mut params = paging_params(query);
        if let Some(username) = query.username.as_ref() {
            params.push(("username", username.clone()));
        }
        if let Some(mood) = query.mood {
            params.push(("mood", mood.label().to_string()));
        }
        self.get_posts("feed", params).await
    }

    async fn fetch_trending(&self, query: &CatalogQuery) -> Result<Vec<Post>, TransportError> {
        self.get_posts("trending", paging_params(query)).await
    }

    fn name(&self) -> &'static str {
        "personalization"
    }
}

#[async_trait::async_trait]
impl InteractionTransport for PersonalizationClient {
    async fn send(&self, interaction: &Interaction) -> Result<(), TransportError> {
        let url = self.url("interaction", &[])?;
        let response = self.client.post(url).json(interaction).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let payload = response.json::<ApiStatusResponse>().await?;
        if payload.status != "success" {
            return Err(TransportError::Rejected(payload.message));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "personalization"
    }
}
