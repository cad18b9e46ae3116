//! Navigation types shared by the sidebar composer and the theme output.
//!
//! These mirror the sidebar shape the site renderer reads: a map from route
//! prefix to an entry. An entry is usually an ordered list of sections, but
//! the renderer also accepts a group object `{ "base": ..., "items": [...] }`.
//! Values of any other shape are carried through untouched, so composing
//! never rewrites what a project declared.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Route prefix → sidebar entry, in insertion order.
pub type SidebarMap = IndexMap<String, SidebarEntry>;

/// The value stored under one route prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// `[ {section}, ... ]`
    Sections(Vec<NavItem>),
    /// `{ "base": "/flash/", "items": [ {section}, ... ] }`
    Group(SidebarGroup),
    /// Any other JSON value.
    Other(serde_json::Value),
}

impl SidebarEntry {
    /// Top-level sections of the entry; empty for unrecognized values.
    pub fn sections(&self) -> &[NavItem] {
        match self {
            SidebarEntry::Sections(items) => items,
            SidebarEntry::Group(group) => &group.items,
            SidebarEntry::Other(_) => &[],
        }
    }
}

impl From<Vec<NavItem>> for SidebarEntry {
    fn from(items: Vec<NavItem>) -> Self {
        SidebarEntry::Sections(items)
    }
}

/// Sections sharing a link base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    pub items: Vec<NavItem>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Keep an explicit `null` apart from an absent key.
///
/// Absent stays `None` through `#[serde(default)]`; `null` becomes
/// `Some(None)` and is written back as `null`.
fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A sidebar section or link.
///
/// Keys the composer does not model (e.g. `base`, `docFooterText`) are kept
/// in `extra` and written back unchanged. Modeled keys distinguish absent
/// (`None`) from `null` (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    #[serde(
        default,
        deserialize_with = "explicit",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit",
        skip_serializing_if = "Option::is_none"
    )]
    pub items: Option<Option<Vec<NavItem>>>,
    #[serde(
        default,
        deserialize_with = "explicit",
        skip_serializing_if = "Option::is_none"
    )]
    pub collapsed: Option<Option<bool>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NavItem {
    /// A leaf link.
    pub fn link(text: &str, link: &str) -> Self {
        Self {
            text: Some(Some(text.to_string())),
            link: Some(Some(link.to_string())),
            items: None,
            collapsed: None,
            extra: serde_json::Map::new(),
        }
    }

    /// A titled section holding `items`.
    pub fn section(text: &str, items: Vec<NavItem>) -> Self {
        Self {
            text: Some(Some(text.to_string())),
            link: None,
            items: Some(Some(items)),
            collapsed: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(|t| t.as_deref())
    }

    pub fn children(&self) -> &[NavItem] {
        self.items.as_ref().and_then(|i| i.as_deref()).unwrap_or(&[])
    }
}
