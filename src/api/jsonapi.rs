//! JSON-API response envelope
//!
//! Builds the document shape the frontend consumes: a top-level `data`
//! member (single resource or array), an optional `meta` member, and the
//! `jsonapi` version marker. Posts and tags each serialize a fixed attribute
//! list; internal fields such as `raw_tags` or the extra attribute bag never
//! reach the wire.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::models::{Post, Tag};

/// `jsonapi` top-level member
#[derive(Debug, Serialize)]
pub struct JsonApi {
    pub version: &'static str,
}

impl Default for JsonApi {
    fn default() -> Self {
        Self { version: "1.0" }
    }
}

/// A single resource object with `type`, `id` and `attributes` members.
#[derive(Debug, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: Map<String, Value>,
}

/// Primary data: one resource or a list of resources.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(Resource),
    Many(Vec<Resource>),
}

/// A complete JSON-API document.
#[derive(Debug, Serialize)]
pub struct Document {
    pub data: PrimaryData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    pub jsonapi: JsonApi,
}

impl Document {
    /// Document wrapping a single resource.
    pub fn one(resource: Resource) -> Self {
        Self {
            data: PrimaryData::One(resource),
            meta: None,
            jsonapi: JsonApi::default(),
        }
    }

    /// Document wrapping a resource list.
    pub fn many(resources: Vec<Resource>) -> Self {
        Self {
            data: PrimaryData::Many(resources),
            meta: None,
            jsonapi: JsonApi::default(),
        }
    }

    /// Meta-only document: counts in `meta`, empty `data` array.
    pub fn meta_only(meta: Value) -> Self {
        Self {
            data: PrimaryData::Many(Vec::new()),
            meta: Some(meta),
            jsonapi: JsonApi::default(),
        }
    }
}

/// Build a post resource.
///
/// List documents omit the body; single-post documents include it.
pub fn post_resource(post: &Post, include_body: bool) -> Resource {
    let mut attributes = Map::new();
    attributes.insert("title".to_string(), json!(post.title));
    attributes.insert("slug".to_string(), json!(post.slug));
    attributes.insert("lang".to_string(), json!(post.lang));
    attributes.insert("summary".to_string(), json!(post.summary));
    if include_body {
        attributes.insert("body".to_string(), json!(post.body));
    }
    attributes.insert("createdAt".to_string(), json!(post.created_at.to_rfc3339()));

    Resource {
        kind: "posts",
        id: post.id.to_string(),
        attributes,
    }
}

/// Build a tag resource.
pub fn tag_resource(tag: &Tag) -> Resource {
    let mut attributes = Map::new();
    attributes.insert("name".to_string(), json!(tag.name));
    attributes.insert("slug".to_string(), json!(tag.slug));
    attributes.insert("lang".to_string(), json!(tag.lang));
    attributes.insert("post-count".to_string(), json!(tag.post_count));

    Resource {
        kind: "tags",
        id: tag.id.to_string(),
        attributes,
    }
}
