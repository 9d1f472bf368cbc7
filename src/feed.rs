use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogQuery, CatalogSource, LocalCatalog, PersonalizationClient};
use crate::config::{FeedConfig, FeedSettings, SourceMode};
use crate::scoring::{cold_start, filter_by_category, rank_trending, recommend};
use crate::user::PreferenceProfile;
use crate::{CategoryFilter, FilterSelection, MoodFilter, Post, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }

    pub fn slice(&self, posts: &[&Post]) -> Vec<Post> {
        posts
            .iter()
            .skip(self.offset())
            .take(self.size)
            .map(|post| (*post).clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub source: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    viewer: String,
    generation: u64,
}

impl RequestTicket {
    pub fn viewer(&self) -> &str {
        &self.viewer
    }
}

#[derive(Debug, Clone, Copy)]
enum CatalogKind {
    Feed,
    Trending,
}

struct ResolvedCatalog {
    posts: Vec<Post>,
    source: &'static str,
    // remote catalogs arrive already cut to the requested page
    paged: bool,
}

pub struct FeedService {
    mode: SourceMode,
    primary: Arc<dyn CatalogSource>,
    local: Arc<LocalCatalog>,
    settings: FeedSettings,
    generations: RwLock<HashMap<String, u64>>,
}

impl FeedService {
    pub fn new(local: LocalCatalog, settings: FeedSettings) -> Self {
        let local = Arc::new(local);
        Self {
            mode: SourceMode::Local,
            primary: local.clone(),
            local,
            settings,
            generations: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn CatalogSource>) -> Self {
        self.primary = remote;
        self.mode = SourceMode::Remote;
        self
    }

    pub fn from_config(config: &FeedConfig, now_ms: i64) -> Result<Self, String> {
        let local = LocalCatalog::fixture(
            config.feed.fixture_seed,
            config.feed.fixture_size,
            now_ms,
        );
        let service = FeedService::new(local, config.feed.clone());
        match config.source.to_mode() {
            SourceMode::Local => Ok(service),
            SourceMode::Remote => {
                let client = PersonalizationClient::from_config(&config.source)?;
                info!(endpoint = client.endpoint(), "using personalization service");
                Ok(service.with_remote(Arc::new(client)))
            }
        }
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn local(&self) -> &LocalCatalog {
        &self.local
    }

    pub fn page(&self, number: Option<usize>, size: Option<usize>) -> Page {
        let size = size
            .unwrap_or(self.settings.default_page_size)
            .min(self.settings.max_page_size.max(1));
        Page::new(number.unwrap_or(1), size)
    }

    pub async fn begin_request(&self, viewer: &str) -> RequestTicket {
        let mut guard = self.generations.write().await;
        let generation = guard.entry(viewer.to_string()).or_insert(0);
        *generation += 1;
        RequestTicket {
            viewer: viewer.to_string(),
            generation: *generation,
        }
    }

    pub async fn is_current(&self, ticket: &RequestTicket) -> bool {
        let guard = self.generations.read().await;
        guard.get(&ticket.viewer) == Some(&ticket.generation)
    }

    pub async fn recommendations(
        &self,
        username: &str,
        prefs: &PreferenceProfile,
        filters: &FilterSelection,
        page: Page,
        now_ms: i64,
    ) -> FeedPage {
        let query = CatalogQuery {
            username: Some(username.to_string()),
            page: page.number,
            page_size: page.size,
            mood: match filters.mood {
                MoodFilter::All => None,
                MoodFilter::Only(mood) => Some(mood),
            },
            category: named_category(&filters.category),
        };

        let resolved = self.resolve(&query, CatalogKind::Feed).await;
        let ranked = recommend(&resolved.posts, prefs, filters, now_ms);
        build_page(&ranked, page, &resolved)
    }

    /// Returns `None` when the same viewer began a newer request while this
    /// one was in flight.
    pub async fn latest_recommendations(
        &self,
        ticket: &RequestTicket,
        prefs: &PreferenceProfile,
        filters: &FilterSelection,
        page: Page,
        now_ms: i64,
    ) -> Option<FeedPage> {
        let feed = self
            .recommendations(ticket.viewer(), prefs, filters, page, now_ms)
            .await;
        if self.is_current(ticket).await {
            Some(feed)
        } else {
            debug!(viewer = ticket.viewer(), "discarding superseded feed request");
            None
        }
    }

    pub async fn trending(&self, category: &CategoryFilter, page: Page) -> FeedPage {
        let query = CatalogQuery {
            username: None,
            page: page.number,
            page_size: page.size,
            mood: None,
            category: named_category(category),
        };

        let resolved = self.resolve(&query, CatalogKind::Trending).await;
        let ranked = rank_trending(filter_by_category(category, &resolved.posts));
        build_page(&ranked, page, &resolved)
    }

    pub fn cold_start(&self, mood: MoodFilter) -> Vec<Post> {
        cold_start(mood, self.local.posts())
            .into_iter()
            .cloned()
            .collect()
    }

    async fn resolve(&self, query: &CatalogQuery, kind: CatalogKind) -> ResolvedCatalog {
        let remote = self.mode == SourceMode::Remote;
        let source = self.primary.name();

        match fetch(self.primary.as_ref(), query, kind).await {
            Ok(posts) if !remote || !posts.is_empty() => {
                return ResolvedCatalog {
                    posts,
                    source,
                    paged: remote,
                };
            }
            Ok(_) => {
                debug!(source, "remote catalog empty, using local catalog");
            }
            Err(err) => {
                warn!(source, error = %err, "catalog fetch failed, using local catalog");
            }
        }

        let posts = fetch(self.local.as_ref(), query, kind)
            .await
            .unwrap_or_default();
        ResolvedCatalog {
            posts,
            source: self.local.name(),
            paged: false,
        }
    }
}

async fn fetch(
    source: &dyn CatalogSource,
    query: &CatalogQuery,
    kind: CatalogKind,
) -> Result<Vec<Post>, TransportError> {
    match kind {
        CatalogKind::Feed => source.fetch_feed(query).await,
        CatalogKind::Trending => source.fetch_trending(query).await,
    }
}

fn named_category(filter: &CategoryFilter) -> Option<String> {
    match filter {
        CategoryFilter::All => None,
        CategoryFilter::Named(name) => Some(name.clone()),
    }
}

fn build_page(ranked: &[&Post], page: Page, resolved: &ResolvedCatalog) -> FeedPage {
    let posts = if resolved.paged {
        ranked.iter().map(|post| (*post).clone()).collect()
    } else {
        page.slice(ranked)
    };

    FeedPage {
        posts,
        total_count: ranked.len(),
        page: page.number,
        page_size: page.size,
        source: resolved.source,
    }
}
