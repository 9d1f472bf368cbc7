use std::collections::HashSet;

use crate::user::PreferenceProfile;

/// A Jaccard factor whose union is empty is left out of the average.
pub fn similarity(a: &PreferenceProfile, b: &PreferenceProfile) -> f64 {
    let mood_match = if a.mood == b.mood { 1.0 } else { 0.0 };

    let factors: Vec<f64> = [
        jaccard(&a.categories, &b.categories),
        jaccard(&a.topics, &b.topics),
        Some(mood_match),
    ]
    .into_iter()
    .flatten()
    .collect();

    if factors.is_empty() {
        return 0.0;
    }
    factors.iter().sum::<f64>() / factors.len() as f64
}

/// `None` when both sides are empty.
pub fn jaccard(a: &[String], b: &[String]) -> Option<f64> {
    let left: HashSet<&str> = a.iter().map(String::as_str).collect();
    let right: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = left.union(&right).count();
    if union == 0 {
        return None;
    }
    let intersection = left.intersection(&right).count();
    Some(intersection as f64 / union as f64)
}
