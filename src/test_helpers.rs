//! Shared test utilities.
//!
//! Builds small documentation site trees in a temp directory:
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_descriptor(tmp.path(), "flash", &json!({"/flash/": []}));
//! write_markdown(tmp.path(), "flash/installation.md", Some("title: Install"), "# Install");
//! ```

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

/// Owned project list from string literals.
pub fn projects(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Write `<root>/<project>/config/sidebar.json`.
pub fn write_descriptor(root: &Path, project: &str, value: &serde_json::Value) -> PathBuf {
    let path = root.join(project).join("config/sidebar.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Write a markdown file relative to `root`, with optional front matter.
pub fn write_markdown(root: &Path, rel: &str, front_matter: Option<&str>, body: &str) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let content = match front_matter {
        Some(yaml) => format!("---\n{yaml}\n---\n\n{body}\n"),
        None => format!("{body}\n"),
    };
    std::fs::write(&path, content).unwrap();
    path
}

/// Drain every event sent before all senders were dropped.
pub fn collect_events<E>(rx: Receiver<E>) -> Vec<E> {
    rx.into_iter().collect()
}
