use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use feed_ranker::catalog::{CatalogQuery, CatalogSource, LocalCatalog};
use feed_ranker::config::{FeedConfig, FeedSettings, SourceMode};
use feed_ranker::feed::{FeedService, Page};
use feed_ranker::interaction::{
    Interaction, InteractionKind, InteractionRecorder, InteractionTransport,
};
use feed_ranker::{
    CategoryFilter, FilterSelection, Mood, MoodFilter, Post, PreferenceProfile, SortMode,
    TransportError, COLD_START_LIMIT,
};

const NOW: i64 = 1_750_000_000_000;

enum StubBehavior {
    Posts(Vec<Post>),
    Fail,
}

struct StubSource {
    behavior: StubBehavior,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    fn answer(&self) -> Result<Vec<Post>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Posts(posts) => Ok(posts.clone()),
            StubBehavior::Fail => Err(TransportError::Rejected("service offline".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for StubSource {
    async fn fetch_feed(&self, _query: &CatalogQuery) -> Result<Vec<Post>, TransportError> {
        self.answer()
    }

    async fn fetch_trending(&self, _query: &CatalogQuery) -> Result<Vec<Post>, TransportError> {
        self.answer()
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

struct FailingTransport;

#[async_trait::async_trait]
impl InteractionTransport for FailingTransport {
    async fn send(&self, _interaction: &Interaction) -> Result<(), TransportError> {
        Err(TransportError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[derive(Default)]
struct CapturingTransport {
    sent: std::sync::Mutex<Vec<Interaction>>,
}

#[async_trait::async_trait]
impl InteractionTransport for CapturingTransport {
    async fn send(&self, interaction: &Interaction) -> Result<(), TransportError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(interaction.clone());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "capturing"
    }
}

fn local_service() -> FeedService {
    FeedService::new(LocalCatalog::fixture(42, 25, NOW), FeedSettings::default())
}

fn remote_post(id: u64, views: u64) -> Post {
    let mut post = Post::new(id, "Remote", "Feed");
    post.view_count = views;
    post.created_at = NOW;
    post
}

fn popular() -> FilterSelection {
    FilterSelection::new(CategoryFilter::All, MoodFilter::All, SortMode::Popular)
}

fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|post| post.id).collect()
}

#[test]
fn fixture_is_deterministic_and_sized() {
    let first = LocalCatalog::fixture(42, 25, NOW);
    let second = LocalCatalog::fixture(42, 25, NOW);

    assert_eq!(first.posts(), second.posts());
    assert_eq!(first.len(), 25);
    assert_eq!(ids(first.posts()), (1..=25).collect::<Vec<u64>>());

    let seeds = &first.posts()[..5];
    assert_eq!(seeds[0].category, "Flic");
    assert_eq!(seeds[1].mood, Some(Mood::Calm));
    assert_eq!(seeds[4].view_count, 45_600);

    let small = LocalCatalog::fixture(42, 3, NOW);
    assert_eq!(ids(small.posts()), vec![1, 2, 3]);
}

#[test]
fn fixture_generated_posts_stay_in_range() {
    let catalog = LocalCatalog::fixture(7, 40, NOW);
    for post in &catalog.posts()[5..] {
        assert!((1_000..51_000).contains(&post.view_count));
        assert!((100..5_100).contains(&post.upvote_count));
        assert!((80.0..100.0).contains(&post.average_rating));
        assert!(post.created_at <= NOW);
        assert!(post.mood.is_some());
    }
}

#[test]
fn page_defaults_and_clamps() {
    let service = local_service();

    assert_eq!(service.page(None, None), Page::new(1, 20));
    assert_eq!(service.page(Some(0), Some(500)), Page::new(1, 100));
    assert_eq!(service.page(Some(3), Some(0)).size, 1);
    assert_eq!(Page::new(3, 10).offset(), 20);
}

#[tokio::test]
async fn local_mode_pages_ranked_catalog() {
    let service = local_service();
    assert_eq!(service.mode(), SourceMode::Local);
    let prefs = PreferenceProfile::default();

    let first = service
        .recommendations("viewer", &prefs, &popular(), Page::new(1, 10), NOW)
        .await;
    let third = service
        .recommendations("viewer", &prefs, &popular(), Page::new(3, 10), NOW)
        .await;
    let past_end = service
        .recommendations("viewer", &prefs, &popular(), Page::new(4, 10), NOW)
        .await;

    assert_eq!(first.source, "local");
    assert_eq!(first.total_count, 25);
    assert_eq!(first.posts.len(), 10);
    assert_eq!(third.posts.len(), 5);
    assert!(past_end.posts.is_empty());
    for pair in first.posts.windows(2) {
        assert!(pair[0].view_count >= pair[1].view_count);
    }
}

#[tokio::test]
async fn remote_results_are_reranked_and_not_sliced_again() {
    let remote = StubSource::new(StubBehavior::Posts(vec![
        remote_post(101, 10),
        remote_post(102, 300),
        remote_post(103, 20),
    ]));
    let service = local_service().with_remote(remote.clone());
    assert_eq!(service.mode(), SourceMode::Remote);

    let feed = service
        .recommendations(
            "viewer",
            &PreferenceProfile::default(),
            &popular(),
            Page::new(2, 2),
            NOW,
        )
        .await;

    assert_eq!(feed.source, "stub");
    assert_eq!(ids(&feed.posts), vec![102, 103, 101]);
    assert_eq!(feed.page, 2);
    assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failing_remote_falls_back_to_local_catalog() {
    let remote = StubSource::new(StubBehavior::Fail);
    let service = local_service().with_remote(remote.clone());

    let feed = service
        .recommendations(
            "viewer",
            &PreferenceProfile::default(),
            &popular(),
            Page::new(1, 5),
            NOW,
        )
        .await;

    assert_eq!(feed.source, "local");
    assert_eq!(feed.total_count, 25);
    assert_eq!(feed.posts.len(), 5);
    assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_remote_falls_back_to_local_catalog() {
    let remote = StubSource::new(StubBehavior::Posts(Vec::new()));
    let service = local_service().with_remote(remote);

    let feed = service
        .trending(&CategoryFilter::All, Page::new(1, 25))
        .await;

    assert_eq!(feed.source, "local");
    assert_eq!(feed.posts.len(), 25);
}

#[tokio::test]
async fn remote_posts_still_pass_filters() {
    let mut calm = remote_post(201, 50);
    calm.mood = Some(Mood::Calm);
    let mut energetic = remote_post(202, 90);
    energetic.mood = Some(Mood::Energetic);
    let remote = StubSource::new(StubBehavior::Posts(vec![calm, energetic]));
    let service = local_service().with_remote(remote);

    let filters = FilterSelection::parse("all", "calm", "popular").unwrap();
    let feed = service
        .recommendations(
            "viewer",
            &PreferenceProfile::default(),
            &filters,
            Page::new(1, 10),
            NOW,
        )
        .await;

    assert_eq!(ids(&feed.posts), vec![201]);
}

#[tokio::test]
async fn trending_filters_category_and_orders_by_score() {
    let service = local_service();

    let feed = service
        .trending(&CategoryFilter::parse("wellness"), Page::new(1, 50))
        .await;

    assert!(!feed.posts.is_empty());
    assert!(feed.posts.iter().all(|post| post.category == "Wellness"));
    for pair in feed.posts.windows(2) {
        assert!(
            feed_ranker::trending_score(&pair[0]) >= feed_ranker::trending_score(&pair[1])
        );
    }
}

#[tokio::test]
async fn superseded_request_is_discarded() {
    let service = local_service();
    let prefs = PreferenceProfile::default();
    let filters = FilterSelection::default();

    let stale = service.begin_request("viewer").await;
    let fresh = service.begin_request("viewer").await;
    assert!(!service.is_current(&stale).await);
    assert!(service.is_current(&fresh).await);

    let dropped = service
        .latest_recommendations(&stale, &prefs, &filters, Page::new(1, 5), NOW)
        .await;
    let kept = service
        .latest_recommendations(&fresh, &prefs, &filters, Page::new(1, 5), NOW)
        .await;

    assert!(dropped.is_none());
    assert_eq!(kept.map(|feed| feed.posts.len()), Some(5));
}

#[tokio::test]
async fn requests_of_different_viewers_do_not_supersede_each_other() {
    let service = local_service();
    let prefs = PreferenceProfile::default();
    let filters = FilterSelection::default();

    let alice = service.begin_request("alice").await;
    let bob = service.begin_request("bob").await;
    assert_eq!(alice.viewer(), "alice");

    let alice_feed = service
        .latest_recommendations(&alice, &prefs, &filters, Page::new(1, 5), NOW)
        .await;
    let bob_feed = service
        .latest_recommendations(&bob, &prefs, &filters, Page::new(1, 5), NOW)
        .await;

    assert!(alice_feed.is_some());
    assert!(bob_feed.is_some());

    let newer_alice = service.begin_request("alice").await;
    assert!(!service.is_current(&alice).await);
    assert!(service.is_current(&newer_alice).await);
    assert!(service.is_current(&bob).await);
}

#[test]
fn cold_start_uses_local_catalog_and_respects_limit() {
    let service = local_service();

    let all = service.cold_start(MoodFilter::All);
    assert_eq!(all.len(), COLD_START_LIMIT);
    assert_eq!(ids(&all), (1..=12).collect::<Vec<u64>>());

    let calm = service.cold_start(MoodFilter::Only(Mood::Calm));
    assert!(!calm.is_empty());
    assert!(calm.iter().all(|post| post.mood == Some(Mood::Calm)));
}

#[test]
fn service_from_default_config_is_local() {
    let service = FeedService::from_config(&FeedConfig::default(), NOW).unwrap();
    assert_eq!(service.mode(), SourceMode::Local);
    assert_eq!(service.local().len(), 25);
}

#[tokio::test]
async fn recorder_reports_transport_failure() {
    let recorder = InteractionRecorder::new(Arc::new(FailingTransport));
    assert!(
        !recorder
            .record("viewer", 3, InteractionKind::Like, None)
            .await
    );
}

#[tokio::test]
async fn recorder_forwards_interaction() {
    let transport = Arc::new(CapturingTransport::default());
    let recorder = InteractionRecorder::new(transport.clone());

    assert!(
        recorder
            .record("viewer", 5, InteractionKind::Rate, Some(90.0))
            .await
    );
    assert!(InteractionRecorder::logging()
        .record("viewer", 5, InteractionKind::View, None)
        .await);

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].post_id, 5);
    assert_eq!(sent[0].interaction_type, InteractionKind::Rate);
    assert_eq!(sent[0].interaction_value, Some(90.0));
}

#[test]
fn interaction_kind_accepts_only_known_actions() {
    assert_eq!(InteractionKind::parse(" Like "), Some(InteractionKind::Like));
    assert_eq!(InteractionKind::parse("rate"), Some(InteractionKind::Rate));
    assert_eq!(InteractionKind::parse("upvote"), None);
    assert_eq!(InteractionKind::parse("rating"), None);
    assert_eq!(InteractionKind::parse("poke"), None);
}

#[tokio::test]
async fn local_mode_reads_the_local_catalog_through_its_source() {
    let service = FeedService::new(LocalCatalog::new(Vec::new()), FeedSettings::default());

    let feed = service
        .recommendations(
            "viewer",
            &PreferenceProfile::default(),
            &FilterSelection::default(),
            Page::new(1, 10),
            NOW,
        )
        .await;

    assert_eq!(feed.source, "local");
    assert!(feed.posts.is_empty());
    assert_eq!(feed.total_count, 0);
}

#[test]
fn remote_payload_maps_to_posts() {
    let payload = r#"{
        "status": "success",
        "algorithm_used": "hybrid",
        "post": [
            {
                "id": 9,
                "title": "Breathing Basics",
                "owner": { "username": "priya_wellness" },
                "category": { "name": "Wellness" },
                "topic": { "name": "Mindfulness" },
                "mood": "Calm",
                "view_count": 1200,
                "average_rating": 140.0
            },
            {
                "id": 10,
                "category": { "name": "Flic" },
                "topic": { "name": "Social Media" },
                "mood": "sleepy"
            }
        ]
    }"#;

    let response: feed_ranker::catalog::remote::ApiFeedResponse =
        serde_json::from_str(payload).unwrap();
    let posts: Vec<Post> = response.post.into_iter().map(Post::from).collect();

    assert_eq!(posts[0].owner, "priya_wellness");
    assert_eq!(posts[0].category, "Wellness");
    assert_eq!(posts[0].mood, Some(Mood::Calm));
    assert_eq!(posts[0].view_count, 1200);
    assert!((posts[0].average_rating - 100.0).abs() < 1e-9);
    assert_eq!(posts[1].mood, None);
    assert_eq!(posts[1].owner, "");
}
