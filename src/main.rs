mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use feed_ranker::config::FeedConfig;
use feed_ranker::feed::FeedService;
use feed_ranker::{
    format_float, format_number, now_ms, similarity, CategoryFilter, FilterSelection, Mood,
    MoodFilter, Post, PreferenceProfile,
};

#[derive(Parser)]
#[command(name = "feed-ranker", about = "Short-video feed recommender")]
struct Cli {
    /// Path to a TOML config file (defaults to $FEED_CONFIG_PATH or config/feed.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Recommend(RecommendArgs),
    Trending(TrendingArgs),
    ColdStart(ColdStartArgs),
    Similarity(SimilarityArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct RecommendArgs {
    #[arg(long, default_value = "guest")]
    username: String,
    #[arg(long, default_value = "all")]
    category: String,
    #[arg(long, default_value = "all")]
    mood: String,
    #[arg(long = "sort", default_value = "recommended")]
    sort_by: String,
    #[arg(long = "favorite-category")]
    favorite_categories: Vec<String>,
    #[arg(long = "favorite-topic")]
    favorite_topics: Vec<String>,
    #[arg(long, default_value = "energetic")]
    preferred_mood: String,
    #[arg(long)]
    page: Option<usize>,
    #[arg(long)]
    page_size: Option<usize>,
}

impl Default for RecommendArgs {
    fn default() -> Self {
        Self {
            username: "guest".to_string(),
            category: "all".to_string(),
            mood: "all".to_string(),
            sort_by: "recommended".to_string(),
            favorite_categories: Vec::new(),
            favorite_topics: Vec::new(),
            preferred_mood: "energetic".to_string(),
            page: None,
            page_size: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct TrendingArgs {
    #[arg(long, default_value = "all")]
    category: String,
    #[arg(long)]
    page: Option<usize>,
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct ColdStartArgs {
    #[arg(long, default_value = "all")]
    mood: String,
}

#[derive(Args, Debug, Clone)]
struct SimilarityArgs {
    #[arg(long = "left-category")]
    left_categories: Vec<String>,
    #[arg(long = "left-topic")]
    left_topics: Vec<String>,
    #[arg(long, default_value = "energetic")]
    left_mood: String,
    #[arg(long = "right-category")]
    right_categories: Vec<String>,
    #[arg(long = "right-topic")]
    right_topics: Vec<String>,
    #[arg(long, default_value = "energetic")]
    right_mood: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = FeedConfig::load(cli.config)?;
    let command = cli
        .command
        .unwrap_or(Command::Recommend(RecommendArgs::default()));

    match command {
        Command::Recommend(args) => run_recommend(&config, args).await,
        Command::Trending(args) => run_trending(&config, args).await,
        Command::ColdStart(args) => run_cold_start(&config, args),
        Command::Similarity(args) => run_similarity(args),
        Command::Serve(args) => server::serve(args, config).await,
    }
}

async fn run_recommend(config: &FeedConfig, args: RecommendArgs) -> Result<(), String> {
    let prefs = PreferenceProfile::from_parts(
        args.favorite_categories,
        args.favorite_topics,
        &args.preferred_mood,
    )
    .map_err(|err| err.to_string())?;
    let filters = FilterSelection::parse(&args.category, &args.mood, &args.sort_by)
        .map_err(|err| err.to_string())?;

    let now = now_ms();
    let service = FeedService::from_config(config, now)?;
    let page = service.page(args.page, args.page_size);
    let feed = service
        .recommendations(&args.username, &prefs, &filters, page, now)
        .await;

    println!(
        "Feed for {} | sort {} | category {} | mood {} | source {}",
        args.username,
        filters.sort_by.label(),
        filters.category.label(),
        filters.mood.label(),
        feed.source
    );
    println!(
        "Page {} ({} of {} posts)",
        feed.page,
        feed.posts.len(),
        feed.total_count
    );
    print_posts(&feed.posts);
    Ok(())
}

async fn run_trending(config: &FeedConfig, args: TrendingArgs) -> Result<(), String> {
    let service = FeedService::from_config(config, now_ms())?;
    let category = CategoryFilter::parse(&args.category);
    let page = service.page(args.page, args.page_size);
    let feed = service.trending(&category, page).await;

    println!(
        "Trending in {} | source {} | page {} ({} of {} posts)",
        category.label(),
        feed.source,
        feed.page,
        feed.posts.len(),
        feed.total_count
    );
    print_posts(&feed.posts);
    Ok(())
}

fn run_cold_start(config: &FeedConfig, args: ColdStartArgs) -> Result<(), String> {
    let mood = MoodFilter::parse(&args.mood).map_err(|err| err.to_string())?;
    let service = FeedService::from_config(config, now_ms())?;
    let posts = service.cold_start(mood);

    println!("Cold-start feed for mood {}", mood.label());
    print_posts(&posts);
    Ok(())
}

fn run_similarity(args: SimilarityArgs) -> Result<(), String> {
    let left = PreferenceProfile::from_parts(args.left_categories, args.left_topics, &args.left_mood)
        .map_err(|err| err.to_string())?;
    let right =
        PreferenceProfile::from_parts(args.right_categories, args.right_topics, &args.right_mood)
            .map_err(|err| err.to_string())?;

    println!("Profile similarity: {}", format_float(similarity(&left, &right), 3));
    Ok(())
}

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("(no posts)");
        return;
    }

    for (idx, post) in posts.iter().enumerate() {
        println!(
            "{:>3}. #{} {} [{} / {} / {}]",
            idx + 1,
            post.id,
            post.title,
            post.category,
            post.topic,
            post.mood.map(Mood::label).unwrap_or("-")
        );
        println!(
            "     views {} | upvotes {} | shares {} | rating {}",
            format_number(post.view_count as f64),
            format_number(post.upvote_count as f64),
            format_number(post.share_count as f64),
            format_float(post.average_rating, 0)
        );
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feed_ranker=info,tower_http=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
