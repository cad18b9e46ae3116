//! Social preview head tags.
//!
//! Every page that has a banner card advertises it through twitter-card
//! `<meta>` entries. The renderer takes head entries as
//! `["meta", {"name": ..., "content": ...}]` arrays, which is how
//! [`HeadTag`] serializes.

use crate::cards::card_name_for;
use crate::config::DocsConfig;
use crate::metadata::{DocumentMetadata, resolve_metadata};
use serde::ser::{Serialize, Serializer};
use std::path::Path;

/// One `<meta name=... content=...>` head entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadTag {
    pub name: String,
    pub content: String,
}

impl HeadTag {
    pub fn meta(name: &str, content: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            content: content.into(),
        }
    }
}

#[derive(serde::Serialize)]
struct MetaAttrs<'a> {
    name: &'a str,
    content: &'a str,
}

impl Serialize for HeadTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            "meta",
            MetaAttrs {
                name: &self.name,
                content: &self.content,
            },
        )
            .serialize(serializer)
    }
}

/// Head tags pointing at the card `image_name`.
pub fn head_tags(image_name: &str, metadata: &DocumentMetadata, config: &DocsConfig) -> Vec<HeadTag> {
    let social = &config.social;
    let image_path = format!("{}/{}", social.image_base.trim_end_matches('/'), image_name);
    vec![
        HeadTag::meta("twitter:image", image_path.clone()),
        HeadTag::meta(
            "twitter:image:src",
            format!("{}{}", social.site_url.trim_end_matches('/'), image_path),
        ),
        HeadTag::meta("twitter:card", "summary_large_image"),
        HeadTag::meta("twitter:image:height", config.banner.height.to_string()),
        HeadTag::meta("twitter:image:width", config.banner.width.to_string()),
        HeadTag::meta("twitter:description", metadata.description.clone()),
    ]
}

/// Head tags for a document under `root`, or `None` when it has no card.
pub fn page_head_tags(
    root: &Path,
    document: &Path,
    config: &DocsConfig,
) -> std::io::Result<Option<Vec<HeadTag>>> {
    let relative = document.strip_prefix(root).unwrap_or(document);
    let Some(image_name) = card_name_for(relative, config) else {
        return Ok(None);
    };
    let metadata = resolve_metadata(document)?;
    Ok(Some(head_tags(&image_name, &metadata, config)))
}
