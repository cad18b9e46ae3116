//! CLI output formatting for composer and generator events.
//!
//! # Output Format
//!
//! ## Sidebar
//!
//! ```text
//! Composing sidebar from 3 projects
//! flash
//!     Source: site/flash/config/sidebar.json
//!     Routes: /flash/, /
//! mobot
//!     Source: site/mobot/config/sidebar.json
//!     Not found
//! Sidebar
//!     /flash/ (2 sections)
//!     / (1 section)
//! ```
//!
//! ## Banners
//!
//! ```text
//! Generating: index.png
//!     Source: site/index.md
//! Generating: flash-installation.png
//!     Source: site/flash/installation.md
//!     Failed: Failed to load template ...
//! Skipped mobot (no directory at site/mobot)
//!
//! Generated 1 card, 1 failed, 1 project skipped
//! ```
//!
//! # Architecture
//!
//! Each event type has a `format_*` function (returns `Vec<String>`) for
//! testability. Format functions are pure: no I/O, no side effects.

use crate::cards::{CardEvent, GenerateSummary};
use crate::sidebar::SidebarEvent;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 card`, `2 cards`.
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Sidebar output
// ============================================================================

pub fn format_sidebar_event(event: &SidebarEvent) -> Vec<String> {
    match event {
        SidebarEvent::Started { project_count } => vec![format!(
            "Composing sidebar from {}",
            plural(*project_count, "project", "projects")
        )],
        SidebarEvent::Checking { project, path } => vec![
            project.clone(),
            format!("{}Source: {}", indent(1), path.display()),
        ],
        SidebarEvent::Found { prefixes, .. } => {
            vec![format!("{}Routes: {}", indent(1), prefixes.join(", "))]
        }
        SidebarEvent::Missing { .. } => vec![format!("{}Not found", indent(1))],
        SidebarEvent::Composed { sidebar } => {
            let mut lines = vec!["Sidebar".to_string()];
            if sidebar.is_empty() {
                lines.push(format!("{}(empty)", indent(1)));
            }
            for (prefix, entry) in sidebar {
                lines.push(format!(
                    "{}{} ({})",
                    indent(1),
                    prefix,
                    plural(entry.sections().len(), "section", "sections")
                ));
            }
            lines
        }
    }
}

// ============================================================================
// Banner output
// ============================================================================

pub fn format_card_event(event: &CardEvent) -> Vec<String> {
    match event {
        CardEvent::IndexMissing { path } => {
            vec![format!("No index document at {}", path.display())]
        }
        CardEvent::ProjectMissing { project, path } => vec![format!(
            "Skipped {} (no directory at {})",
            project,
            path.display()
        )],
        CardEvent::Generating {
            file_name,
            document,
        } => vec![
            format!("Generating: {file_name}"),
            format!("{}Source: {}", indent(1), document.display()),
        ],
        CardEvent::Generated { .. } => Vec::new(),
        CardEvent::Failed { error, .. } => vec![format!("{}Failed: {}", indent(1), error)],
    }
}

pub fn format_generate_summary(summary: &GenerateSummary) -> Vec<String> {
    let mut parts = vec![format!(
        "Generated {}",
        plural(summary.generated.len(), "card", "cards")
    )];
    if !summary.failed.is_empty() {
        parts.push(format!("{} failed", summary.failed.len()));
    }
    if !summary.skipped_projects.is_empty() {
        parts.push(format!(
            "{} skipped",
            plural(summary.skipped_projects.len(), "project", "projects")
        ));
    }
    vec![String::new(), parts.join(", ")]
}

pub fn print_generate_summary(summary: &GenerateSummary) {
    for line in format_generate_summary(summary) {
        println!("{}", line);
    }
}
