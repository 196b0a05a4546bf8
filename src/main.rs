//! Papyrus - a read-only markdown content API

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use papyrus::{
    api::{self, AppState},
    catalog::Catalog,
    config::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "papyrus=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Papyrus content API...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Build the catalog; this is the only write phase in the process lifetime
    let catalog = Catalog::from_dir(&config.content.path, &config.content.default_lang)?;
    tracing::info!(
        "Catalog built from '{}': {} posts, {} tags",
        config.content.path.display(),
        catalog.posts().len(),
        catalog.tags().len()
    );

    // Build application state and router
    let state = AppState {
        catalog: Arc::new(catalog),
        default_lang: config.content.default_lang.clone(),
    };
    let app = api::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
