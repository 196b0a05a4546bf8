//! Content catalog
//!
//! Builds the in-memory post collection and tag registry from a directory of
//! `YYYY-MM-DD-<slug>.md` files. The scan happens once at startup; afterwards
//! the catalog is immutable and shared read-only with the request handlers.
//!
//! Ingestion is strictly sequential over the sorted directory listing, so
//! post ids, tag ids and tag post counts are all deterministic across runs.
//! A file that cannot be ingested is skipped with a diagnostic; one bad file
//! never aborts the scan.

pub mod frontmatter;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;

use crate::models::{Post, Tag};

/// Filename pattern: `2017-03-02-some-post-slug.md`
static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)\.md$").expect("valid regex"));

/// Error type for catalog construction
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read content directory '{path}': {source}")]
    DirUnreadable {
        path: String,
        source: std::io::Error,
    },
}

/// Per-file ingestion failure. These are logged and skipped, never fatal.
#[derive(Debug, thiserror::Error)]
enum IngestError {
    #[error("file name does not match YYYY-MM-DD-<slug>.md")]
    BadFileName,
    #[error("invalid calendar date in file name")]
    BadDate,
    #[error("failed to read file: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

/// In-memory catalog of posts and tags.
///
/// Both collections keep insertion order; "first match" in the query layer
/// means first in these vectors.
#[derive(Debug, Default)]
pub struct Catalog {
    posts: Vec<Post>,
    tags: Vec<Tag>,
}

impl Catalog {
    /// Build a catalog by scanning a content directory.
    ///
    /// Files are processed in sorted filename order. Post ids are 1-based
    /// positions in that listing, so a skipped file leaves a gap rather than
    /// renumbering the posts after it.
    ///
    /// # Errors
    /// `CatalogError::DirUnreadable` when the directory itself cannot be
    /// listed. Per-file problems are logged at warn level and skipped.
    pub fn from_dir(dir: &Path, default_lang: &str) -> Result<Self, CatalogError> {
        let entries = fs::read_dir(dir).map_err(|e| CatalogError::DirUnreadable {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();

        let mut catalog = Catalog::default();
        for (index, name) in names.iter().enumerate() {
            let id = index as i64 + 1;
            if let Err(e) = catalog.ingest_file(&dir.join(name), name, id, default_lang) {
                tracing::warn!("Skipping '{}': {}", name, e);
            }
        }

        Ok(catalog)
    }

    /// Posts in ingestion order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Tags in registry order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Parse one content file and append the resulting post.
    fn ingest_file(
        &mut self,
        path: &Path,
        name: &str,
        id: i64,
        default_lang: &str,
    ) -> Result<(), IngestError> {
        let caps = FILENAME_RE.captures(name).ok_or(IngestError::BadFileName)?;
        let created_at = local_midnight(&caps[1], &caps[2], &caps[3])?;
        let slug = format!("{}/{}/{}/{}", &caps[1], &caps[2], &caps[3], &caps[4]);

        let content = fs::read_to_string(path)?;
        let doc = frontmatter::parse(&content)?;

        let mut attrs = doc.attributes;
        let lang = take_string(&mut attrs, "lang").unwrap_or_else(|| default_lang.to_string());
        let title = take_string(&mut attrs, "title").unwrap_or_default();
        let summary = take_string(&mut attrs, "summary").unwrap_or_default();
        let tag_string = take_string(&mut attrs, "tags").unwrap_or_default();

        let raw_tags = tag_string.replace(' ', "");
        let tag_ids = self.resolve_tags(&tag_string, &lang);

        self.posts.push(Post {
            id,
            slug,
            lang,
            title,
            summary,
            body: doc.body,
            created_at,
            raw_tags,
            tag_ids,
            extra: attrs,
        });

        Ok(())
    }

    /// Resolve a post's comma-separated tag string into registry ids.
    ///
    /// Tokens are processed left to right. A `(slug, lang)` already in the
    /// registry gets its post count bumped and its id reused; anything else
    /// becomes a new registry entry whose id is the registry length at the
    /// time of creation. The lookup is a linear scan, fine at this scale.
    fn resolve_tags(&mut self, tag_string: &str, lang: &str) -> Vec<i64> {
        if tag_string.trim().is_empty() {
            return Vec::new();
        }

        let mut ids = Vec::new();
        for token in tag_string.split(',') {
            let slug = token.trim();
            match self
                .tags
                .iter_mut()
                .find(|tag| tag.slug == slug && tag.lang == lang)
            {
                Some(tag) => {
                    tag.post_count += 1;
                    ids.push(tag.id);
                }
                None => {
                    let id = self.tags.len() as i64;
                    self.tags.push(Tag::new(id, slug, lang));
                    ids.push(id);
                }
            }
        }
        ids
    }
}

/// Construct local midnight of the date captured from a filename.
fn local_midnight(year: &str, month: &str, day: &str) -> Result<DateTime<Local>, IngestError> {
    // captures are all-digit by the regex; range still needs checking
    let year: i32 = year.parse().map_err(|_| IngestError::BadDate)?;
    let month: u32 = month.parse().map_err(|_| IngestError::BadDate)?;
    let day: u32 = day.parse().map_err(|_| IngestError::BadDate)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(IngestError::BadDate)?;
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or(IngestError::BadDate)
}

/// Remove a string attribute from the front-matter map.
///
/// Non-string values stay in the map so they end up in the post's `extra`
/// bag instead of being silently coerced.
fn take_string(attrs: &mut BTreeMap<String, Value>, key: &str) -> Option<String> {
    match attrs.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            attrs.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("Failed to write fixture");
    }

    fn post_file(lang: &str, tags: &str) -> String {
        format!(
            "---\ntitle: A Post\nlang: {}\nsummary: Summary text\ntags: {}\n---\nBody text\n",
            lang, tags
        )
    }

    // ========================================================================
    // Slug and date derivation
    // ========================================================================

    #[test]
    fn test_slug_and_created_at_derivation() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2017-03-02-some-post-slug.md", &post_file("en", "go-lang"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();
        let post = &catalog.posts()[0];

        assert_eq!(post.slug, "2017/03/02/some-post-slug");
        assert_eq!(
            post.created_at,
            Local.with_ymd_and_hms(2017, 3, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_post_ids_follow_sorted_listing() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-05-01-later.md", &post_file("en", "a"));
        write_post(&dir, "2019-01-01-earlier.md", &post_file("en", "a"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.posts()[0].id, 1);
        assert_eq!(catalog.posts()[0].slug, "2019/01/01/earlier");
        assert_eq!(catalog.posts()[1].id, 2);
        assert_eq!(catalog.posts()[1].slug, "2020/05/01/later");
    }

    #[test]
    fn test_body_and_front_matter_pass_through() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "2021-06-15-hello.md",
            "---\ntitle: Hello\nlang: en\nsummary: Hi\ntags: greeting\nauthor: someone\n---\n# Hello\n\nWorld.\n",
        );

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();
        let post = &catalog.posts()[0];

        assert_eq!(post.title, "Hello");
        assert_eq!(post.summary, "Hi");
        assert_eq!(post.body, "# Hello\n\nWorld.\n");
        // unknown attribute is retained in the side channel
        assert_eq!(post.extra["author"], Value::from("someone"));
    }

    // ========================================================================
    // Tag registry
    // ========================================================================

    #[test]
    fn test_tag_dedup_same_language() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-first.md", &post_file("en", "go-lang"));
        write_post(&dir, "2020-01-02-second.md", &post_file("en", "go-lang"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.tags().len(), 1);
        assert_eq!(catalog.tags()[0].slug, "go-lang");
        assert_eq!(catalog.tags()[0].post_count, 2);
        // both posts reference the same registry entry
        assert_eq!(catalog.posts()[0].tag_ids, vec![0]);
        assert_eq!(catalog.posts()[1].tag_ids, vec![0]);
    }

    #[test]
    fn test_same_slug_different_language_is_distinct_tag() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-first.md", &post_file("en", "go-lang"));
        write_post(&dir, "2020-01-02-second.md", &post_file("fr", "go-lang"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.tags().len(), 2);
        assert_eq!(catalog.tags()[0].lang, "en");
        assert_eq!(catalog.tags()[0].post_count, 1);
        assert_eq!(catalog.tags()[1].lang, "fr");
        assert_eq!(catalog.tags()[1].post_count, 1);
    }

    #[test]
    fn test_tag_ids_assigned_in_registry_order() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-first.md", &post_file("en", "alpha, beta"));
        write_post(&dir, "2020-01-02-second.md", &post_file("en", "beta, gamma"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        let slugs: Vec<&str> = catalog.tags().iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "beta", "gamma"]);
        assert_eq!(catalog.posts()[0].tag_ids, vec![0, 1]);
        assert_eq!(catalog.posts()[1].tag_ids, vec![1, 2]);
    }

    #[test]
    fn test_tag_name_formatting() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-post.md", &post_file("en", "web-development"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.tags()[0].name, "Web Development");
    }

    #[test]
    fn test_raw_tags_has_spaces_stripped() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-post.md", &post_file("en", "go-lang, web-development"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.posts()[0].raw_tags, "go-lang,web-development");
    }

    #[test]
    fn test_duplicate_tag_within_post_counts_twice() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-post.md", &post_file("en", "dup, dup"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.tags().len(), 1);
        assert_eq!(catalog.tags()[0].post_count, 2);
        assert_eq!(catalog.posts()[0].tag_ids, vec![0, 0]);
    }

    #[test]
    fn test_tag_count_matches_declared_tokens() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-post.md", &post_file("en", "one, two, three"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();
        let post = &catalog.posts()[0];

        assert_eq!(post.tag_ids.len(), post.raw_tags.split(',').count());
    }

    // ========================================================================
    // Missing and malformed input
    // ========================================================================

    #[test]
    fn test_missing_lang_defaults() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "2020-01-01-post.md",
            "---\ntitle: T\ntags: a\n---\nBody\n",
        );

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.posts()[0].lang, "en");
        assert_eq!(catalog.tags()[0].lang, "en");
    }

    #[test]
    fn test_missing_tags_means_no_tags() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-post.md", "---\ntitle: T\nlang: en\n---\nBody\n");

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert!(catalog.posts()[0].tag_ids.is_empty());
        assert_eq!(catalog.posts()[0].raw_tags, "");
        assert!(catalog.tags().is_empty());
    }

    #[test]
    fn test_malformed_filename_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "notes.md", &post_file("en", "a"));
        write_post(&dir, "2020-01-01-good.md", &post_file("en", "a"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.posts().len(), 1);
        assert_eq!(catalog.posts()[0].slug, "2020/01/01/good");
    }

    #[test]
    fn test_skipped_file_leaves_id_gap() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-good.md", &post_file("en", "a"));
        write_post(&dir, "2020-01-02-bad.txt", "not markdown");
        write_post(&dir, "2020-01-03-also-good.md", &post_file("en", "a"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.posts().len(), 2);
        assert_eq!(catalog.posts()[0].id, 1);
        assert_eq!(catalog.posts()[1].id, 3);
    }

    #[test]
    fn test_invalid_calendar_date_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-13-40-bad-date.md", &post_file("en", "a"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert!(catalog.posts().is_empty());
    }

    #[test]
    fn test_invalid_front_matter_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "2020-01-01-bad.md", "---\ntitle: [unclosed\n---\nBody\n");
        write_post(&dir, "2020-01-02-good.md", &post_file("en", "a"));

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.posts().len(), 1);
        assert_eq!(catalog.posts()[0].slug, "2020/01/02/good");
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let result = Catalog::from_dir(Path::new("no/such/directory"), "en");
        assert!(matches!(result, Err(CatalogError::DirUnreadable { .. })));
    }

    #[test]
    fn test_empty_directory_gives_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert!(catalog.posts().is_empty());
        assert!(catalog.tags().is_empty());
    }

    #[test]
    fn test_non_string_attribute_lands_in_extra() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "2020-01-01-post.md",
            "---\ntitle: T\nlang: en\ndraft: true\n---\nBody\n",
        );

        let catalog = Catalog::from_dir(dir.path(), "en").unwrap();

        assert_eq!(catalog.posts()[0].extra["draft"], Value::from(true));
    }
}
