//! Tag model
//!
//! Tags live in a registry keyed by `(slug, lang)`: the same slug under two
//! languages is two distinct tags. A tag is created the first time any post
//! declares it and is shared by every later post in the same language.

/// Tag entity in the catalog's tag registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Unique identifier, assigned in registry order
    pub id: i64,
    /// Trimmed raw tag text, unique per `(slug, lang)`
    pub slug: String,
    /// Language inherited from the post that first declared the tag
    pub lang: String,
    /// Display name derived from the slug
    pub name: String,
    /// Number of post references to this tag
    pub post_count: i64,
}

impl Tag {
    /// Create a new Tag with a single post reference.
    ///
    /// The display name is derived from the slug.
    pub fn new(id: i64, slug: &str, lang: &str) -> Self {
        Self {
            id,
            slug: slug.to_string(),
            lang: lang.to_string(),
            name: display_name(slug),
            post_count: 1,
        }
    }
}

/// Derive a display name from a tag slug.
///
/// Hyphens become spaces and each word is title-cased:
/// `web-development` becomes `Web Development`.
pub fn display_name(slug: &str) -> String {
    slug.replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
