pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod interaction;
pub mod scoring;
pub mod user;

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub use error::{RankingError, TransportError};
pub use scoring::{
    cold_start, filter_by_category, filter_by_mood, rank_trending, recommend, similarity,
    trending_score, ContentScorer, ScoredPost,
};
pub use user::PreferenceProfile;

pub const COLD_START_LIMIT: usize = 12;

const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energetic,
    Calm,
    Inspiring,
    Educational,
    Entertainment,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Energetic,
        Mood::Calm,
        Mood::Inspiring,
        Mood::Educational,
        Mood::Entertainment,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "energetic" => Some(Mood::Energetic),
            "calm" => Some(Mood::Calm),
            "inspiring" => Some(Mood::Inspiring),
            "educational" => Some(Mood::Educational),
            "entertainment" => Some(Mood::Entertainment),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Inspiring => "inspiring",
            Mood::Educational => "educational",
            Mood::Entertainment => "entertainment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub owner: String,
    pub category: String,
    pub topic: String,
    #[serde(default)]
    pub mood: Option<Mood>,
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
    /// 0 to 100.
    #[serde(default)]
    pub average_rating: f64,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub video_link: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

impl Post {
    pub fn new(id: u64, category: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            id,
            category: category.into(),
            topic: topic.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(trimmed.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name.to_lowercase() == category.to_lowercase(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_SENTINEL,
            CategoryFilter::Named(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoodFilter {
    #[default]
    All,
    Only(Mood),
}

impl MoodFilter {
    pub fn parse(value: &str) -> Result<Self, RankingError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(MoodFilter::All);
        }
        Mood::parse(trimmed)
            .map(MoodFilter::Only)
            .ok_or_else(|| RankingError::InvalidFilter(format!("unknown mood: {}", value)))
    }

    /// Posts without a mood only pass the `all` filter.
    pub fn matches(self, mood: Option<Mood>) -> bool {
        match self {
            MoodFilter::All => true,
            MoodFilter::Only(wanted) => mood == Some(wanted),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodFilter::All => ALL_SENTINEL,
            MoodFilter::Only(mood) => mood.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Recommended,
    Trending,
    Recent,
    Popular,
}

impl SortMode {
    pub fn parse(value: &str) -> Result<Self, RankingError> {
        match value.trim().to_lowercase().as_str() {
            "recommended" => Ok(SortMode::Recommended),
            "trending" => Ok(SortMode::Trending),
            "recent" => Ok(SortMode::Recent),
            "popular" => Ok(SortMode::Popular),
            _ => Err(RankingError::InvalidFilter(format!(
                "unknown sort mode: {}",
                value
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Recommended => "recommended",
            SortMode::Trending => "trending",
            SortMode::Recent => "recent",
            SortMode::Popular => "popular",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub category: CategoryFilter,
    pub mood: MoodFilter,
    pub sort_by: SortMode,
}

impl FilterSelection {
    pub fn new(category: CategoryFilter, mood: MoodFilter, sort_by: SortMode) -> Self {
        Self {
            category,
            mood,
            sort_by,
        }
    }

    pub fn parse(category: &str, mood: &str, sort_by: &str) -> Result<Self, RankingError> {
        Ok(Self {
            category: CategoryFilter::parse(category),
            mood: MoodFilter::parse(mood)?,
            sort_by: SortMode::parse(sort_by)?,
        })
    }
}

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
