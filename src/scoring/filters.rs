use crate::{CategoryFilter, MoodFilter, Post};

pub fn filter_by_mood<'a, I>(filter: MoodFilter, posts: I) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|post| filter.matches(post.mood))
        .collect()
}

pub fn filter_by_category<'a, I>(filter: &CategoryFilter, posts: I) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|post| filter.matches(&post.category))
        .collect()
}
