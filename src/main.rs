//! Server binary: loads configuration, builds the store, serves the app.

use std::sync::Arc;

use garment_shop::{app, ensure_database_exists, AppConfig, AppState, MemoryStore, PgStore, Store, StoreBackend};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("garment_shop=info,tower_http=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store = build_store(&config).await?;
    let app = app(AppState::new(store));

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("Shop app listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn Store>, Box<dyn std::error::Error>> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await?;
            tracing::info!("connected to PostgreSQL");
            let store = PgStore::new(pool, config.db_schema.clone());
            store.ensure_tables().await?;
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
