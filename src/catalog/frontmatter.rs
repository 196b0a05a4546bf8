//! Front-matter parsing
//!
//! Splits a content file into a YAML attribute block and a markdown body.
//! The attribute block is delimited by `---` fences at the top of the file;
//! a file without a fence is all body.

use std::collections::BTreeMap;

use serde_yaml::Value;

/// A content file split into front-matter attributes and body text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Key-value attributes from the YAML block
    pub attributes: BTreeMap<String, Value>,
    /// Everything after the closing fence
    pub body: String,
}

/// Parse raw file text into attributes and body.
///
/// Returns an error only when the fenced block exists but is not valid YAML.
pub fn parse(content: &str) -> Result<Document, serde_yaml::Error> {
    match split(content) {
        Some((yaml, body)) => {
            let attributes = if yaml.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(yaml)?
            };
            Ok(Document {
                attributes,
                body: body.to_string(),
            })
        }
        None => Ok(Document {
            attributes: BTreeMap::new(),
            body: content.to_string(),
        }),
    }
}

/// Split content into the YAML block and the body, if a fence is present.
fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    // the opening fence must sit on its own line
    if !rest.starts_with('\n') && !rest.starts_with("\r\n") {
        return None;
    }
    let end = rest.find("\n---")?;
    let yaml = &rest[..end];

    let mut body = &rest[end + "\n---".len()..];
    // drop the line break that terminates the closing fence
    body = body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')).unwrap_or(body);

    Some((yaml, body))
}
