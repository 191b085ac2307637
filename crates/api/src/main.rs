use std::sync::Arc;

use postbox_api::config::Config;
use postbox_infra::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    postbox_api::telemetry::init();

    let config = Config::from_env();

    let store = Arc::new(SqliteStore::connect(&config.database_url).await?);

    let app = postbox_api::app::build_app(store.clone(), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
