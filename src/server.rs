use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{ApiFeedRequest, ApiFeedResponse, ApiInteractionRequest, ApiStatusResponse};
use feed_ranker::config::FeedConfig;
use feed_ranker::feed::FeedService;
use feed_ranker::interaction::InteractionRecorder;
use feed_ranker::{now_ms, CategoryFilter, MoodFilter};

#[derive(Clone)]
struct AppState {
    feed: Arc<FeedService>,
    recorder: InteractionRecorder,
}

#[derive(Deserialize)]
struct TrendingQuery {
    category: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Deserialize)]
struct ColdStartQuery {
    mood: Option<String>,
}

pub async fn serve(args: crate::ServeArgs, config: FeedConfig) -> Result<(), String> {
    let feed = FeedService::from_config(&config, now_ms())?;
    let recorder = InteractionRecorder::from_config(&config.source)?;
    let source = feed.mode().label();
    let state = AppState {
        feed: Arc::new(feed),
        recorder,
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/feed", post(feed_handler))
        .route("/api/trending", get(trending_handler))
        .route("/api/cold-start", get(cold_start_handler))
        .route("/api/interaction", post(interaction_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, source, "serving feed api");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "service": "feed-ranker" }))
}

async fn feed_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiFeedRequest>,
) -> Result<Json<ApiFeedResponse>, (StatusCode, String)> {
    let parts = request
        .into_parts()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let page = state.feed.page(parts.page, parts.page_size);

    let ticket = state.feed.begin_request(&parts.username).await;
    let feed = state
        .feed
        .latest_recommendations(&ticket, &parts.prefs, &parts.filters, page, now_ms())
        .await
        .ok_or_else(|| {
            (
                StatusCode::CONFLICT,
                "superseded by a newer feed request".to_string(),
            )
        })?;

    Ok(Json(ApiFeedResponse::from_feed(
        feed,
        parts.filters.sort_by.label(),
    )))
}

async fn trending_handler(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Json<ApiFeedResponse> {
    let category = CategoryFilter::parse(query.category.as_deref().unwrap_or("all"));
    let page = state.feed.page(query.page, query.page_size);
    let feed = state.feed.trending(&category, page).await;
    Json(ApiFeedResponse::from_feed(feed, "trending"))
}

async fn cold_start_handler(
    State(state): State<AppState>,
    Query(query): Query<ColdStartQuery>,
) -> Result<Json<ApiFeedResponse>, (StatusCode, String)> {
    let mood = MoodFilter::parse(query.mood.as_deref().unwrap_or("all"))
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    let posts = state.feed.cold_start(mood);
    Ok(Json(ApiFeedResponse::from_posts(posts, "cold_start", "local")))
}

async fn interaction_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiInteractionRequest>,
) -> Result<Json<ApiStatusResponse>, (StatusCode, String)> {
    let kind = request
        .kind()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let recorded = state
        .recorder
        .record(
            &request.username,
            request.post_id,
            kind,
            request.interaction_value,
        )
        .await;

    let response = if recorded {
        ApiStatusResponse {
            status: "success".to_string(),
            message: format!("{} recorded", kind.label()),
        }
    } else {
        ApiStatusResponse {
            status: "error".to_string(),
            message: "interaction could not be recorded".to_string(),
        }
    };
    Ok(Json(response))
}
