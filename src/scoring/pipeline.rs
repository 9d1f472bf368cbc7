use std::cmp::Ordering;

use tracing::debug;

use crate::scoring::{filter_by_category, filter_by_mood, rank_trending, ContentScorer};
use crate::user::PreferenceProfile;
use crate::{FilterSelection, MoodFilter, Post, SortMode, COLD_START_LIMIT};

#[derive(Debug, Clone, Copy)]
pub struct ScoredPost<'a> {
    pub post: &'a Post,
    pub score: f64,
}

impl<'a> ScoredPost<'a> {
    pub fn new(post: &'a Post, score: f64) -> Self {
        Self { post, score }
    }
}

/// Category filter, then mood filter, then the ordering named by
/// `filters.sort_by`. Every ordering is stable.
pub fn recommend<'a>(
    catalog: &'a [Post],
    prefs: &PreferenceProfile,
    filters: &FilterSelection,
    now_ms: i64,
) -> Vec<&'a Post> {
    let by_category = filter_by_category(&filters.category, catalog);
    let candidates = filter_by_mood(filters.mood, by_category);

    debug!(
        catalog = catalog.len(),
        candidates = candidates.len(),
        category = filters.category.label(),
        mood = filters.mood.label(),
        sort_by = filters.sort_by.label(),
        "ranking candidates"
    );

    match filters.sort_by {
        SortMode::Recommended => rank_by_content(candidates, prefs, &ContentScorer::new(now_ms)),
        SortMode::Trending => rank_trending(candidates),
        SortMode::Recent => sort_descending_by(candidates, |post| post.created_at),
        SortMode::Popular => sort_descending_by(candidates, |post| post.view_count),
    }
}

/// Falls back to the trending order of the whole catalog when the mood
/// matches nothing.
pub fn cold_start(mood: MoodFilter, catalog: &[Post]) -> Vec<&Post> {
    let mut posts = filter_by_mood(mood, catalog);
    if posts.is_empty() {
        debug!(mood = mood.label(), "no posts for mood, using trending fallback");
        posts = rank_trending(catalog);
    }
    posts.truncate(COLD_START_LIMIT);
    posts
}

fn rank_by_content<'a>(
    posts: Vec<&'a Post>,
    prefs: &PreferenceProfile,
    scorer: &ContentScorer,
) -> Vec<&'a Post> {
    let mut scored: Vec<ScoredPost<'a>> = posts
        .into_iter()
        .map(|post| ScoredPost::new(post, scorer.score(post, prefs)))
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    scored.into_iter().map(|scored| scored.post).collect()
}

fn sort_descending_by<'a, K, F>(mut posts: Vec<&'a Post>, key: F) -> Vec<&'a Post>
where
    K: Ord,
    F: Fn(&Post) -> K,
{
    posts.sort_by(|a, b| key(*b).cmp(&key(*a)));
    posts
}
