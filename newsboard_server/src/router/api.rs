use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use std::collections::HashMap;

use newsboard_core::TopWords;

use crate::{state::AppState, util::get_limit};

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/yearly-stats", get(get_yearly_stats))
        .route("/major-events", get(get_major_events))
        .route("/summary", get(get_summary))
        .route("/top-words", get(get_top_words))
        .route("/health", get(health))
}

async fn get_yearly_stats(State(app_state): State<AppState>) -> Json<Value> {
    tracing::info!("Fetching yearly stats");
    Json(app_state.store.yearly_stats().await)
}

async fn get_major_events(State(app_state): State<AppState>) -> Json<Value> {
    tracing::info!("Fetching major events analysis");
    Json(app_state.store.major_events().await)
}

async fn get_summary(State(app_state): State<AppState>) -> Json<Value> {
    tracing::info!("Fetching summary stats");
    Json(app_state.store.summary().await)
}

async fn get_top_words(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<TopWords> {
    let limit = get_limit(&params);
    tracing::info!("Fetching top {} words", limit);
    Json(app_state.store.top_words(limit).await)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
