pub mod api;

use axum::Router;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer, services::ServeDir,
    trace::TraceLayer,
};

use std::path::Path;

use crate::{error::handle_panic, state::AppState};

/// The API under `/api`, with every other path served from the static dashboard directory.
pub fn app(app_state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api::api_router())
        .fallback_service(ServeDir::new(public_dir))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().on_request(()))
        .with_state(app_state)
}
