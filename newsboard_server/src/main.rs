mod config;
mod error;
mod router;
mod state;
#[cfg(test)]
mod test;
mod util;

use dotenvy::dotenv;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use newsboard_core::{CachedDataStore, JsonFileSource};

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()?
        .add_directive("hyper::proto=info".parse()?)
        .add_directive("hyper::server=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Read configuration
    let config = Config::from_env()?;

    // 3. Initialize dataset store
    let source = JsonFileSource::new(&config.data_path);
    let app_state = AppState::new(CachedDataStore::with_freshness(source, config.cache_ttl));
    tracing::info!(
        "Serving {} with a {} s cache window",
        config.data_path.display(),
        app_state.store.freshness().as_secs()
    );
    if let Some(period) = config.refresh_interval {
        tracing::info!("Reloading data every {} s in the background", period.as_secs());
        app_state.store.clone().spawn_refresh(period);
    }

    // 4. Setup router
    let app = router::app(app_state, &config.public_dir);

    // 5. Start server
    tracing::info!("Dashboard server running on http://{}", config.address);
    tracing::info!("API endpoints: http://{}/api", config.address);
    axum::Server::bind(&config.address)
        .serve(app.into_make_service())
        .with_graceful_shutdown(util::shutdown_signal())
        .await?;
    Ok(())
}
