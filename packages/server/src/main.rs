use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_server::config::AppConfig;
use catalog_server::state::AppState;
use catalog_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    seed::ensure_indexes(&db)
        .await
        .context("Failed to create indexes")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Catalog server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
