pub mod content;
pub mod filters;
pub mod pipeline;
pub mod similarity;
pub mod trending;

pub use content::ContentScorer;
pub use filters::{filter_by_category, filter_by_mood};
pub use pipeline::{cold_start, recommend, ScoredPost};
pub use similarity::{jaccard, similarity};
pub use trending::{rank_trending, trending_score};
