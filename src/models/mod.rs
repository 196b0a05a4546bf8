//! Data models
//!
//! Core entities for the content catalog: posts and tags.

pub mod post;
pub mod tag;

pub use post::Post;
pub use tag::Tag;
