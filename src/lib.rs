//! Papyrus - a read-only markdown content API
//!
//! Turns a directory of date-and-slug-named markdown files into an in-memory
//! catalog of posts and tags, served over HTTP as JSON-API documents.

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod query;
