//! Document metadata extraction and resolution.
//!
//! Each markdown document can carry metadata in a YAML front matter block at
//! the very top of the file:
//!
//! ```markdown
//! ---
//! title: 📲 Installation
//! banner_title: Flash - Installation
//! banner_description: A guide on how to install the Flash library.
//! ---
//! ```
//!
//! ## Resolution priority
//!
//! Each field is resolved independently. The first non-empty value wins:
//!
//! - **Title**: `banner_title` → `title` → file stem
//! - **Description**: `banner_description` → empty string
//!
//! `banner_title` exists so a page can keep a short sidebar-friendly `title`
//! while its social card carries a more descriptive one.
//!
//! Front matter that is missing or not valid YAML is treated as empty, so
//! resolution never fails because of document content. Only reading the file
//! can fail.

use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value.
///
/// ```text
/// title:       resolve(&[banner_title, title])
/// description: resolve(&[banner_description])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// The front matter keys banner generation cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub banner_title: Option<String>,
    pub banner_description: Option<String>,
}

/// Resolved title and description for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: String,
    pub description: String,
}

impl DocumentMetadata {
    /// Apply the resolution priority, falling back to `stem` for the title.
    pub fn from_front_matter(front_matter: &FrontMatter, stem: &str) -> Self {
        let title = resolve(&[
            front_matter.banner_title.as_deref(),
            front_matter.title.as_deref(),
        ])
        .unwrap_or_else(|| stem.to_string());
        let description =
            resolve(&[front_matter.banner_description.as_deref()]).unwrap_or_default();
        Self { title, description }
    }
}

/// Return the raw YAML of the front matter block, if the document opens with one.
///
/// A leading byte order mark is skipped.
pub fn extract_front_matter(content: &str) -> Option<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut block: Option<String> = None;
    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                block = Some(String::new());
            }
            Event::End(TagEnd::MetadataBlock(_)) => break,
            Event::Text(text) => match block.as_mut() {
                Some(yaml) => yaml.push_str(&text),
                None => break,
            },
            // Front matter only counts when it opens the document
            _ if block.is_none() => break,
            _ => {}
        }
    }
    block
}

/// Parse the front matter of a document.
///
/// Scalar values (strings, numbers, booleans) are accepted for every key;
/// anything else is ignored.
pub fn parse_front_matter(content: &str) -> FrontMatter {
    let Some(yaml) = extract_front_matter(content) else {
        return FrontMatter::default();
    };
    let mapping: serde_yaml::Mapping = match serde_yaml::from_str(&yaml) {
        Ok(mapping) => mapping,
        Err(e) => {
            debug!(error = %e, "ignoring malformed front matter");
            return FrontMatter::default();
        }
    };
    let field = |key: &str| mapping.get(key).and_then(scalar_string);
    FrontMatter {
        title: field("title"),
        banner_title: field("banner_title"),
        banner_description: field("banner_description"),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// File name without the `.md` extension.
pub fn document_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read a markdown document and resolve its metadata.
pub fn resolve_metadata(path: &Path) -> std::io::Result<DocumentMetadata> {
    let content = std::fs::read_to_string(path)?;
    let front_matter = parse_front_matter(&content);
    Ok(DocumentMetadata::from_front_matter(
        &front_matter,
        &document_stem(path),
    ))
}
