//! Post model
//!
//! A Post is built once during ingestion from a `YYYY-MM-DD-<slug>.md` file
//! and never mutated afterwards. The fixed fields below are the ones the API
//! serializes; any other front-matter attribute is carried in `extra` and
//! stays invisible to API output.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

/// Post entity representing one markdown content file.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Unique identifier, 1-based position in the sorted directory listing
    pub id: i64,
    /// URL path slug, `YYYY/MM/DD/<filename-slug>`
    pub slug: String,
    /// Language code from front matter (default language when absent)
    pub lang: String,
    /// Title from front matter
    pub title: String,
    /// Summary from front matter
    pub summary: String,
    /// Markdown body with front matter stripped
    pub body: String,
    /// Local midnight of the filename date
    pub created_at: DateTime<Local>,
    /// Front-matter tag string with all spaces removed, used for tag matching
    pub raw_tags: String,
    /// Registry ids of the resolved tags, in declaration order
    pub tag_ids: Vec<i64>,
    /// Front-matter attributes not covered by the fixed fields
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Post {
    /// Check whether this post declares the given tag slug.
    ///
    /// Matches against the comma-separated `raw_tags` string, the same
    /// representation the tag filter endpoint queries.
    pub fn has_tag(&self, tag_slug: &str) -> bool {
        self.raw_tags.split(',').any(|t| t == tag_slug)
    }
}
