use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::catalog::{CatalogQuery, CatalogSource};
use crate::{Mood, Post, TransportError};

const GENERATED_TITLES: [&str; 10] = [
    "Building Resilience in Tough Times",
    "The Power of Positive Thinking",
    "Mastering Time Management",
    "Creative Problem Solving",
    "Leadership in the Digital Age",
    "Sustainable Living Tips",
    "Financial Freedom Journey",
    "Art of Public Speaking",
    "Healthy Meal Prep Ideas",
    "Photography Basics for Beginners",
];

const GENERATED_THUMBNAILS: [&str; 4] = [
    "https://images.pexels.com/photos/1629236/pexels-photo-1629236.jpeg",
    "https://images.pexels.com/photos/1181675/pexels-photo-1181675.jpeg",
    "https://images.pexels.com/photos/1181244/pexels-photo-1181244.jpeg",
    "https://images.pexels.com/photos/1181677/pexels-photo-1181677.jpeg",
];

const MAX_GENERATED_AGE_MS: i64 = 10_000_000_000;

#[derive(Debug, Clone)]
pub struct LocalCatalog {
    posts: Vec<Post>,
}

impl LocalCatalog {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn fixture(seed: u64, size: usize, now_ms: i64) -> Self {
        let mut posts = seed_posts();
        let generated = size.saturating_sub(posts.len());
        posts.extend(generate_posts(seed, generated, now_ms));
        posts.truncate(size);
        Self::new(posts)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait::async_trait]
impl CatalogSource for LocalCatalog {
    async fn fetch_feed(&self, _query: &CatalogQuery) -> Result<Vec<Post>, TransportError> {
        Ok(self.posts.clone())
    }

    async fn fetch_trending(&self, _query: &CatalogQuery) -> Result<Vec<Post>, TransportError> {
        Ok(self.posts.clone())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

pub fn generate_posts(seed: u64, count: usize, now_ms: i64) -> Vec<Post> {
    let mut rng = StdRng::seed_from_u64(seed);
    let seeds = seed_posts();
    let template = &seeds[0];
    let first_id = seeds.len() as u64 + 1;

    (0..count)
        .map(|idx| {
            let mut post = template.clone();
            post.id = first_id + idx as u64;
            post.title = GENERATED_TITLES[idx % GENERATED_TITLES.len()].to_string();
            post.thumbnail_url = GENERATED_THUMBNAILS[idx % GENERATED_THUMBNAILS.len()].to_string();
            post.mood = Some(Mood::ALL[idx % Mood::ALL.len()]);
            post.view_count = rng.gen_range(1_000..51_000);
            post.upvote_count = rng.gen_range(100..5_100);
            post.average_rating = rng.gen_range(80..100) as f64;
            post.comment_count = rng.gen_range(10..310);
            post.created_at = now_ms - rng.gen_range(0..MAX_GENERATED_AGE_MS);
            post
        })
        .collect()
}

pub fn seed_posts() -> Vec<Post> {
    vec![
        seed_post(SeedPost {
            id: 1,
            title: "Morning Motivation: Start Your Day Strong",
            owner: "sachin",
            category: "Flic",
            topic: "Social Media",
            mood: Mood::Energetic,
            counts: [15_400, 1_240, 234, 15, 87],
            average_rating: 92.0,
            created_at: 1_739_791_247_000,
            tags: &["motivation", "morning", "productivity"],
            video: "BigBuckBunny.mp4",
            thumbnail: "https://images.pexels.com/photos/1552242/pexels-photo-1552242.jpeg",
        }),
        seed_post(SeedPost {
            id: 2,
            title: "5-Minute Morning Meditation for Inner Peace",
            owner: "priya_wellness",
            category: "Wellness",
            topic: "Mindfulness",
            mood: Mood::Calm,
            counts: [12_300, 892, 178, 28, 156],
            average_rating: 95.0,
            created_at: 1_739_394_615_000,
            tags: &["meditation", "mindfulness", "peace"],
            video: "ElephantsDream.mp4",
            thumbnail: "https://images.pexels.com/photos/3822861/pexels-photo-3822861.jpeg",
        }),
        seed_post(SeedPost {
            id: 3,
            title: "From Idea to $1M: My Startup Journey",
            owner: "david_entrepreneur",
            category: "Business",
            topic: "Entrepreneurship",
            mood: Mood::Inspiring,
            counts: [28_700, 2_340, 567, 156, 298],
            average_rating: 88.0,
            created_at: 1_739_221_230_000,
            tags: &["startup", "business", "success"],
            video: "ForBiggerBlazes.mp4",
            thumbnail: "https://images.pexels.com/photos/3184291/pexels-photo-3184291.jpeg",
        }),
        seed_post(SeedPost {
            id: 4,
            title: "15-Minute High-Intensity Workout",
            owner: "maya_fitness",
            category: "Health",
            topic: "Fitness",
            mood: Mood::Energetic,
            counts: [21_400, 1_876, 345, 89, 234],
            average_rating: 91.0,
            created_at: 1_739_567_120_000,
            tags: &["fitness", "hiit", "workout"],
            video: "ForBiggerEscapes.mp4",
            thumbnail: "https://images.pexels.com/photos/416778/pexels-photo-416778.jpeg",
        }),
        seed_post(SeedPost {
            id: 5,
            title: "AI Revolution: What's Coming Next?",
            owner: "alex_tech",
            category: "Technology",
            topic: "Innovation",
            mood: Mood::Educational,
            counts: [45_600, 3_421, 789, 267, 456],
            average_rating: 93.0,
            created_at: 1_739_307_045_000,
            tags: &["ai", "technology", "future"],
            video: "ForBiggerFun.mp4",
            thumbnail: "https://images.pexels.com/photos/3861969/pexels-photo-3861969.jpeg",
        }),
    ]
}

struct SeedPost {
    id: u64,
    title: &'static str,
    owner: &'static str,
    category: &'static str,
    topic: &'static str,
    mood: Mood,
    // views, upvotes, shares, comments, ratings
    counts: [u64; 5],
    average_rating: f64,
    created_at: i64,
    tags: &'static [&'static str],
    video: &'static str,
    thumbnail: &'static str,
}

fn seed_post(seed: SeedPost) -> Post {
    let [view_count, upvote_count, share_count, comment_count, rating_count] = seed.counts;
    Post {
        id: seed.id,
        title: seed.title.to_string(),
        owner: seed.owner.to_string(),
        category: seed.category.to_string(),
        topic: seed.topic.to_string(),
        mood: Some(seed.mood),
        view_count,
        upvote_count,
        share_count,
        comment_count,
        rating_count,
        average_rating: seed.average_rating,
        created_at: seed.created_at,
        tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
        video_link: format!(
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/{}",
            seed.video
        ),
        thumbnail_url: seed.thumbnail.to_string(),
    }
}
