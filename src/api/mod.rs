//! API layer - HTTP handlers and routing
//!
//! This module contains the HTTP surface of the content API:
//! - Post endpoints (by id, listing, slug/tag filters, meta-only counts)
//! - Tag endpoints (listing, slug filter)
//! - Language-context extraction from the `X-Accept-Language` header
//! - JSON-API envelope serialization
//!
//! All handlers are pure reads over the shared catalog; the catalog is built
//! before the router starts serving and never changes afterwards.

pub mod jsonapi;
pub mod language;
pub mod posts;
pub mod tags;

use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;

/// Application state shared with all handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable content catalog built at startup
    pub catalog: Arc<Catalog>,
    /// Language used when a request carries no language header
    pub default_lang: String,
}

/// Build the API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/{id}", get(posts::get_post))
        .route("/tags", get(tags::list_tags))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    // read-only API, open to any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .nest("/api", build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
