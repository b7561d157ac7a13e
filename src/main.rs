mod config;
mod error;
mod handlers;
mod models;
mod repository;
mod services;
mod storage;
mod views;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{InMemoryItemRepository, ItemRepository};
use crate::storage::FileStore;
use crate::views::Views;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<FileStore>,
    pub items: Arc<dyn ItemRepository>,
    pub views: Arc<Views>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "itembox=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting itembox...");

    // Load configuration
    let config = Arc::new(Config::load()?);
    tracing::info!("Configuration loaded");

    let store = Arc::new(FileStore::open(&config.storage.local_path)?);
    let views = Arc::new(Views::new()?);

    let state = AppState {
        config: config.clone(),
        store,
        items: Arc::new(InMemoryItemRepository::new()),
        views,
    };

    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route(
            "/items/new",
            get(handlers::item::new_item).post(handlers::item::save_item),
        )
        .route("/items/:id", get(handlers::item::view_item))
        .route("/api/items/:id", get(handlers::item::get_item))
        .route("/images/:filename", get(handlers::file::download_image))
        .route("/attach/:item_id", get(handlers::file::download_attach))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
