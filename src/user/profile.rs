use serde::{Deserialize, Serialize};

use crate::{Mood, RankingError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub mood: Mood,
    #[serde(default)]
    pub view_history: Vec<u64>,
    #[serde(default)]
    pub liked_posts: Vec<u64>,
    #[serde(default)]
    pub bookmarked_posts: Vec<u64>,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self::new(Mood::Energetic)
    }
}

impl PreferenceProfile {
    pub fn new(mood: Mood) -> Self {
        Self {
            categories: Vec::new(),
            topics: Vec::new(),
            mood,
            view_history: Vec::new(),
            liked_posts: Vec::new(),
            bookmarked_posts: Vec::new(),
        }
    }

    pub fn from_parts(
        categories: Vec<String>,
        topics: Vec<String>,
        mood: &str,
    ) -> Result<Self, RankingError> {
        let mood = Mood::parse(mood)
            .ok_or_else(|| RankingError::InvalidProfile(format!("unknown mood: {}", mood)))?;
        let mut profile = Self::new(mood);
        for category in categories {
            profile.add_category(category);
        }
        for topic in topics {
            profile.add_topic(topic);
        }
        Ok(profile)
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for category in categories {
            self.add_category(category);
        }
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for topic in topics {
            self.add_topic(topic);
        }
        self
    }

    pub fn add_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
    }

    pub fn add_topic(&mut self, topic: impl Into<String>) {
        let topic = topic.into();
        if !self.topics.contains(&topic) {
            self.topics.push(topic);
        }
    }

    pub fn prefers_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn prefers_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}
