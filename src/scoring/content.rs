use crate::user::PreferenceProfile;
use crate::Post;

pub const CATEGORY_MATCH_BONUS: f64 = 3.0;
pub const TOPIC_MATCH_BONUS: f64 = 3.0;
pub const MOOD_MATCH_BONUS: f64 = 2.0;
pub const VIEW_LOG_DIVISOR: f64 = 10.0;
pub const UPVOTE_LOG_DIVISOR: f64 = 5.0;
pub const RATING_DIVISOR: f64 = 25.0;
pub const RECENCY_BONUS: f64 = 1.0;
pub const RECENCY_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy)]
pub struct ContentScorer {
    now_ms: i64,
}

impl ContentScorer {
    pub fn new(now_ms: i64) -> Self {
        Self { now_ms }
    }

    pub fn score(&self, post: &Post, prefs: &PreferenceProfile) -> f64 {
        let mut score = 0.0;

        score += self.preference_score(post, prefs);
        score += self.engagement_score(post);
        score += self.recency_score(post);

        score
    }

    fn preference_score(&self, post: &Post, prefs: &PreferenceProfile) -> f64 {
        let mut score = 0.0;

        if prefs.prefers_category(&post.category) {
            score += CATEGORY_MATCH_BONUS;
        }
        if prefs.prefers_topic(&post.topic) {
            score += TOPIC_MATCH_BONUS;
        }
        if post.mood == Some(prefs.mood) {
            score += MOOD_MATCH_BONUS;
        }

        score
    }

    fn engagement_score(&self, post: &Post) -> f64 {
        let views = (post.view_count as f64 + 1.0).ln() / VIEW_LOG_DIVISOR;
        let upvotes = (post.upvote_count as f64 + 1.0).ln() / UPVOTE_LOG_DIVISOR;
        let rating = post.average_rating / RATING_DIVISOR;
        views + upvotes + rating
    }

    fn recency_score(&self, post: &Post) -> f64 {
        if self.now_ms.saturating_sub(post.created_at) < RECENCY_WINDOW_MS {
            RECENCY_BONUS
        } else {
            0.0
        }
    }
}
