//! Language context extraction
//!
//! The active language for a request comes from the `X-Accept-Language`
//! header, falling back to the configured default. It is extracted per
//! request and passed into the query layer as a value, so concurrent
//! requests can never observe each other's language.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::AppState;

/// Request header selecting the language context
pub const LANGUAGE_HEADER: &str = "x-accept-language";

/// Request-scoped language context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language(pub String);

impl FromRequestParts<AppState> for Language {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(LANGUAGE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_else(|| state.default_lang.clone());

        Ok(Language(lang))
    }
}
