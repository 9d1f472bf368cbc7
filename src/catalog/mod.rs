pub mod fixture;
pub mod remote;

pub use fixture::LocalCatalog;
pub use remote::PersonalizationClient;

use crate::{Mood, Post, TransportError};

#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub username: Option<String>,
    pub page: usize,
    pub page_size: usize,
    pub mood: Option<Mood>,
    pub category: Option<String>,
}

#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    // an empty result means the source has nothing to offer
    async fn fetch_feed(&self, query: &CatalogQuery) -> Result<Vec<Post>, TransportError>;

    async fn fetch_trending(&self, query: &CatalogQuery) -> Result<Vec<Post>, TransportError>;

    fn name(&self) -> &'static str;
}
