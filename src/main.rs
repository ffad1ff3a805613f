//! Hackboard - Application Entry Point
//!
//! This is the main entry point for the Hackboard server.

use std::{net::SocketAddr, sync::Arc};

use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hackboard::{
    config::CONFIG,
    create_router,
    db::{self, create_pool},
    state::AppState,
    storage::LocalDocumentStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hackboard server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Redis connections are opened per request
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;

    // Prepare case document storage
    let documents = LocalDocumentStore::new(&CONFIG.storage.uploads_path);
    documents.ensure_root().await?;
    tracing::info!(path = %CONFIG.storage.uploads_path.display(), "Case documents directory ready");

    // Create application state
    let state = AppState::new(db_pool, redis_client, Arc::new(documents), CONFIG.clone());

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
