//! Tag API endpoints
//!
//! Handles HTTP requests for tags:
//! - GET /api/tags - List tags for the request language
//! - GET /api/tags?filter[slug]=X - Get a single tag by `(slug, lang)`

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api::jsonapi::{self, Document};
use crate::api::language::Language;
use crate::api::AppState;
use crate::query;

/// Query parameters for the tag listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListTagsQuery {
    /// Select a single tag by slug within the request language
    #[serde(rename = "filter[slug]")]
    pub slug: Option<String>,
}

/// GET /api/tags - List tags or get one by slug
pub async fn list_tags(
    State(state): State<AppState>,
    lang: Language,
    Query(params): Query<ListTagsQuery>,
) -> Response {
    // GET /api/tags?filter[slug]=some-slug
    if let Some(slug) = &params.slug {
        return match query::tag_by_slug(&state.catalog, slug, &lang.0) {
            Some(tag) => Json(Document::one(jsonapi::tag_resource(tag))).into_response(),
            None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        };
    }

    // GET /api/tags
    let tags = query::tags_by_lang(&state.catalog, &lang.0);
    let resources = tags.iter().map(|tag| jsonapi::tag_resource(tag)).collect();
    Json(Document::many(resources)).into_response()
}
