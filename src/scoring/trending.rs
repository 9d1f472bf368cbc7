use std::cmp::Ordering;

use crate::Post;

pub const VIEW_WEIGHT: f64 = 0.3;
pub const UPVOTE_WEIGHT: f64 = 0.4;
pub const SHARE_WEIGHT: f64 = 0.3;

pub fn trending_score(post: &Post) -> f64 {
    VIEW_WEIGHT * post.view_count as f64
        + UPVOTE_WEIGHT * post.upvote_count as f64
        + SHARE_WEIGHT * post.share_count as f64
}

/// Ties keep their input order.
pub fn rank_trending<'a, I>(posts: I) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut scored: Vec<(&'a Post, f64)> = posts
        .into_iter()
        .map(|post| (post, trending_score(post)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored.into_iter().map(|(post, _)| post).collect()
}
