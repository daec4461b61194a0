use std::collections::HashMap;

use newsboard_core::DEFAULT_TOP_WORDS_LIMIT;

/// Requested number of top words.
/// Missing, non-numeric or negative values fall back to the default; zero is kept.
pub fn get_limit(params: &HashMap<String, String>) -> usize {
    params
        .get("limit")
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_TOP_WORDS_LIMIT)
}

pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
