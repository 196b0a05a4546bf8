//! Post API endpoints
//!
//! Handles HTTP requests for posts:
//! - GET /api/posts/:id - Get post by id
//! - GET /api/posts - List posts, with `metaOnly`, `filter[slug]` and
//!   `filter[tag]` query parameters
//!
//! Single-entity misses answer with the plain-text not-found bodies the
//! frontend expects; list queries with zero matches answer with an empty
//! successful document.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::jsonapi::{self, Document};
use crate::api::language::Language;
use crate::api::AppState;
use crate::query;

/// Query parameters for the post listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    /// If "true", return only language-filtered counts
    #[serde(rename = "metaOnly")]
    pub meta_only: Option<String>,
    /// Select a single post by exact slug
    #[serde(rename = "filter[slug]")]
    pub slug: Option<String>,
    /// Select posts declaring a tag slug
    #[serde(rename = "filter[tag]")]
    pub tag: Option<String>,
}

/// GET /api/posts/:id - Get a single post by numeric id
pub async fn get_post(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match query::post_by_id(&state.catalog, id) {
        Some(post) => Json(Document::one(jsonapi::post_resource(post, true))).into_response(),
        None => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
    }
}

/// GET /api/posts - List posts, meta-only counts, or filtered selections
pub async fn list_posts(
    State(state): State<AppState>,
    lang: Language,
    Query(params): Query<ListPostsQuery>,
) -> Response {
    if params.meta_only.as_deref() == Some("true") {
        let counts = query::counts(&state.catalog, &lang.0);
        let meta = json!({
            "postsCount": counts.posts,
            "tagsCount": counts.tags,
        });
        return Json(Document::meta_only(meta)).into_response();
    }

    // GET /api/posts?filter[slug]=2017/03/02/some-post-slug
    // NB: slugs must be unique
    if let Some(slug) = &params.slug {
        return match query::post_by_slug(&state.catalog, slug) {
            Some(post) => Json(Document::one(jsonapi::post_resource(post, true))).into_response(),
            None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        };
    }

    // GET /api/posts?filter[tag]=some-tag-slug
    if let Some(tag) = &params.tag {
        let posts = query::posts_by_tag(&state.catalog, tag, &lang.0);
        let resources = posts
            .iter()
            .map(|post| jsonapi::post_resource(post, false))
            .collect();
        return Json(Document::many(resources)).into_response();
    }

    // GET /api/posts
    let posts = query::posts_by_lang(&state.catalog, &lang.0);
    let resources = posts
        .iter()
        .map(|post| jsonapi::post_resource(post, false))
        .collect();
    Json(Document::many(resources)).into_response()
}
