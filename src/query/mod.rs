//! Query layer
//!
//! Pure read queries over the immutable catalog. Every function takes the
//! language context as an explicit parameter; there is no shared request
//! state. "First match" always means first in collection insertion order,
//! and a missing single entity (`None`) is a different outcome from a list
//! query with zero matches (empty `Vec`).

use crate::catalog::Catalog;
use crate::models::{Post, Tag};

/// Language-filtered collection sizes for the meta-only document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCounts {
    pub posts: usize,
    pub tags: usize,
}

/// Find a post by its numeric id.
pub fn post_by_id(catalog: &Catalog, id: i64) -> Option<&Post> {
    catalog.posts().iter().find(|post| post.id == id)
}

/// Find a post by exact slug, independent of language.
pub fn post_by_slug<'a>(catalog: &'a Catalog, slug: &str) -> Option<&'a Post> {
    catalog.posts().iter().find(|post| post.slug == slug)
}

/// All posts in the given language, in ingestion order.
pub fn posts_by_lang<'a>(catalog: &'a Catalog, lang: &str) -> Vec<&'a Post> {
    catalog
        .posts()
        .iter()
        .filter(|post| post.lang == lang)
        .collect()
}

/// Posts in the given language that declare the tag slug.
pub fn posts_by_tag<'a>(catalog: &'a Catalog, tag_slug: &str, lang: &str) -> Vec<&'a Post> {
    catalog
        .posts()
        .iter()
        .filter(|post| post.has_tag(tag_slug) && post.lang == lang)
        .collect()
}

/// Find a tag by `(slug, lang)`.
pub fn tag_by_slug<'a>(catalog: &'a Catalog, slug: &str, lang: &str) -> Option<&'a Tag> {
    catalog
        .tags()
        .iter()
        .find(|tag| tag.slug == slug && tag.lang == lang)
}

/// All tags in the given language, in registry order.
pub fn tags_by_lang<'a>(catalog: &'a Catalog, lang: &str) -> Vec<&'a Tag> {
    catalog
        .tags()
        .iter()
        .filter(|tag| tag.lang == lang)
        .collect()
}

/// Sizes of the language-filtered post and tag collections.
pub fn counts(catalog: &Catalog, lang: &str) -> CatalogCounts {
    CatalogCounts {
        posts: posts_by_lang(catalog, lang).len(),
        tags: tags_by_lang(catalog, lang).len(),
    }
}
