//! Banner card generation for the whole site.
//!
//! Produces one social preview PNG per document:
//!
//! ```text
//! site/                                   .vitepress/dist/assets/banner-cards/
//! ├── index.md                       →    index.png
//! ├── flash/
//! │   ├── installation.md            →    flash-installation.png
//! │   └── usage.md                   →    flash-usage.png
//! └── mobot/
//!     └── commands.md                →    mobot-commands.png
//! ```
//!
//! Only markdown files directly inside a project directory are considered.
//! Files are visited in name order, one at a time.
//!
//! ## Failure isolation
//!
//! Every document is independent. A document that cannot be read or
//! rendered is reported with a [`CardEvent::Failed`] and the batch moves on.
//! A missing index document or project directory is reported and skipped.
//! Only failing to create the output directory aborts the batch.

use crate::banner::{CardRenderer, RenderError, RustRenderer, build_card_spec};
use crate::config::DocsConfig;
use crate::metadata::{document_stem, resolve_metadata};
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CardsError {
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Progress records emitted while generating.
#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    /// The root index document does not exist.
    IndexMissing { path: PathBuf },
    /// A configured project has no directory on disk.
    ProjectMissing { project: String, path: PathBuf },
    /// About to render `file_name` from `document`.
    Generating { file_name: String, document: PathBuf },
    Generated { output: PathBuf },
    Failed { document: PathBuf, error: String },
}

/// What a batch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub generated: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub skipped_projects: Vec<String>,
}

fn emit(events: &Option<Sender<CardEvent>>, event: CardEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

/// Output name for a project document: `{project}-{stem}.png`.
pub fn card_file_name(project: &str, file_name: &str) -> String {
    format!("{project}-{}.png", document_stem(Path::new(file_name)))
}

/// Card name for a document path relative to the site root.
///
/// Returns `index.png` for the index document and `{project}-{stem}.png` for
/// a markdown file directly inside a configured project. Anything else has
/// no card.
pub fn card_name_for(relative: &Path, config: &DocsConfig) -> Option<String> {
    if relative == Path::new(&config.banner.index_document) {
        return Some("index.png".to_string());
    }

    let parts: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    match parts.as_slice() {
        [project, file]
            if file.ends_with(".md") && config.projects.iter().any(|p| p == project) =>
        {
            Some(card_file_name(project, file))
        }
        _ => None,
    }
}

/// Markdown files directly inside `dir`, sorted by name. Symlinks count as
/// the file they point to.
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".md")
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Resolve, describe and render one card.
pub fn generate_card(
    renderer: &impl CardRenderer,
    config: &DocsConfig,
    root: &Path,
    document: &Path,
    output: &Path,
) -> Result<(), RenderError> {
    let metadata = resolve_metadata(document)?;
    debug!(title = %metadata.title, document = %document.display(), "resolved card metadata");
    let spec = build_card_spec(&metadata, output, &config.banner, root);
    renderer.render(&spec)
}

fn generate_one(
    renderer: &impl CardRenderer,
    config: &DocsConfig,
    root: &Path,
    document: &Path,
    output: PathBuf,
    summary: &mut GenerateSummary,
    events: &Option<Sender<CardEvent>>,
) {
    match generate_card(renderer, config, root, document, &output) {
        Ok(()) => {
            emit(
                events,
                CardEvent::Generated {
                    output: output.clone(),
                },
            );
            summary.generated.push(output);
        }
        Err(e) => {
            warn!(document = %document.display(), error = %e, "banner card failed");
            emit(
                events,
                CardEvent::Failed {
                    document: document.to_path_buf(),
                    error: e.to_string(),
                },
            );
            summary.failed.push(document.to_path_buf());
        }
    }
}

/// Generate every card with the production renderer.
pub fn generate_all(
    config: &DocsConfig,
    root: &Path,
    events: Option<Sender<CardEvent>>,
) -> Result<GenerateSummary, CardsError> {
    generate_all_with_renderer(&RustRenderer::new(), config, root, events)
}

/// Generate every card using a specific renderer (allows testing with mock).
pub fn generate_all_with_renderer(
    renderer: &impl CardRenderer,
    config: &DocsConfig,
    root: &Path,
    events: Option<Sender<CardEvent>>,
) -> Result<GenerateSummary, CardsError> {
    let output_dir = root.join(&config.banner.output_dir);
    std::fs::create_dir_all(&output_dir).map_err(|source| CardsError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;

    let mut summary = GenerateSummary::default();

    let index = root.join(&config.banner.index_document);
    if index.is_file() {
        emit(
            &events,
            CardEvent::Generating {
                file_name: "index.png".to_string(),
                document: index.clone(),
            },
        );
        let output = output_dir.join("index.png");
        generate_one(renderer, config, root, &index, output, &mut summary, &events);
    } else {
        emit(&events, CardEvent::IndexMissing { path: index });
    }

    for project in &config.projects {
        let project_dir = root.join(project);
        if !project_dir.is_dir() {
            emit(
                &events,
                CardEvent::ProjectMissing {
                    project: project.clone(),
                    path: project_dir,
                },
            );
            summary.skipped_projects.push(project.clone());
            continue;
        }

        for document in markdown_files(&project_dir) {
            let file_name = document
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let card_name = card_file_name(project, &file_name);
            emit(
                &events,
                CardEvent::Generating {
                    file_name: card_name.clone(),
                    document: document.clone(),
                },
            );
            let output = output_dir.join(&card_name);
            generate_one(renderer, config, root, &document, output, &mut summary, &events);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::backend::tests::MockRenderer;
    use crate::test_helpers::{collect_events, projects, write_markdown};
    use pretty_assertions::assert_eq;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn config_for(names: &[&str]) -> DocsConfig {
        DocsConfig {
            projects: projects(names),
            ..DocsConfig::default()
        }
    }

    fn out_dir(root: &Path) -> PathBuf {
        root.join(".vitepress/dist/assets/banner-cards")
    }

    #[test]
    fn card_file_name_strips_md() {
        assert_eq!(card_file_name("flash", "installation.md"), "flash-installation.png");
        assert_eq!(card_file_name("mobot", "v1.2.md"), "mobot-v1.2.png");
    }

    #[test]
    fn card_name_for_index_and_project_docs() {
        let config = config_for(&["flash", "mobot"]);
        assert_eq!(
            card_name_for(Path::new("index.md"), &config).as_deref(),
            Some("index.png")
        );
        assert_eq!(
            card_name_for(Path::new("flash/installation.md"), &config).as_deref(),
            Some("flash-installation.png")
        );
        assert_eq!(card_name_for(Path::new("other/page.md"), &config), None);
        assert_eq!(card_name_for(Path::new("flash/guide/deep.md"), &config), None);
        assert_eq!(card_name_for(Path::new("flash/notes.txt"), &config), None);
    }

    #[test]
    fn generates_index_and_project_cards() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_markdown(root, "index.md", Some("title: Home"), "Welcome");
        write_markdown(
            root,
            "flash/installation.md",
            Some("banner_title: Flash - Installation\nbanner_description: How to install"),
            "# Install",
        );
        write_markdown(root, "flash/api.md", None, "# API");
        std::fs::write(root.join("flash/notes.txt"), "not markdown").unwrap();

        let renderer = MockRenderer::new();
        let summary =
            generate_all_with_renderer(&renderer, &config_for(&["flash"]), root, None).unwrap();

        let out = out_dir(root);
        assert_eq!(
            summary.generated,
            vec![
                out.join("index.png"),
                out.join("flash-api.png"),
                out.join("flash-installation.png"),
            ]
        );
        assert!(summary.failed.is_empty());

        let rendered = renderer.get_rendered();
        assert_eq!(rendered[0].texts[0].text, "Home");
        assert_eq!(rendered[1].texts[0].text, "api");
        assert_eq!(rendered[1].texts[1].text, "");
        assert_eq!(rendered[2].texts[0].text, "Flash - Installation");
        assert_eq!(rendered[2].texts[1].text, "How to install");
    }

    #[test]
    fn failure_for_one_document_does_not_stop_batch() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_markdown(root, "flash/a.md", None, "A");
        write_markdown(root, "flash/b.md", None, "B");

        let renderer = MockRenderer::failing_on(&["flash-a.png"]);
        let (tx, rx) = mpsc::channel();
        let summary =
            generate_all_with_renderer(&renderer, &config_for(&["flash"]), root, Some(tx)).unwrap();

        assert_eq!(summary.failed, vec![root.join("flash/a.md")]);
        assert_eq!(summary.generated, vec![out_dir(root).join("flash-b.png")]);
        assert!(out_dir(root).join("flash-b.png").exists());
        assert!(!out_dir(root).join("flash-a.png").exists());

        let events = collect_events(rx);
        assert!(events.contains(&CardEvent::Failed {
            document: root.join("flash/a.md"),
            error: "Rendering failed: mock failure".to_string(),
        }));
    }

    #[test]
    fn missing_project_directory_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_markdown(root, "flash/a.md", None, "A");

        let (tx, rx) = mpsc::channel();
        let summary = generate_all_with_renderer(
            &MockRenderer::new(),
            &config_for(&["flash", "mobot"]),
            root,
            Some(tx),
        )
        .unwrap();

        assert_eq!(summary.skipped_projects, vec!["mobot".to_string()]);
        assert_eq!(summary.generated, vec![out_dir(root).join("flash-a.png")]);
        let events = collect_events(rx);
        assert!(events.contains(&CardEvent::ProjectMissing {
            project: "mobot".to_string(),
            path: root.join("mobot"),
        }));
    }

    #[test]
    fn missing_index_is_reported_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let (tx, rx) = mpsc::channel();
        let summary =
            generate_all_with_renderer(&MockRenderer::new(), &config_for(&[]), tmp.path(), Some(tx))
                .unwrap();

        assert!(summary.generated.is_empty());
        assert_eq!(
            collect_events(rx),
            vec![CardEvent::IndexMissing {
                path: tmp.path().join("index.md")
            }]
        );
    }

    #[test]
    fn unreadable_document_is_a_card_failure() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        // Invalid UTF-8 cannot be read as a string
        std::fs::create_dir_all(root.join("flash")).unwrap();
        std::fs::write(root.join("flash/binary.md"), [0xff, 0xfe, 0x00]).unwrap();
        write_markdown(root, "flash/ok.md", None, "fine");

        let summary = generate_all_with_renderer(
            &MockRenderer::new(),
            &config_for(&["flash"]),
            root,
            None,
        )
        .unwrap();

        assert_eq!(summary.failed, vec![root.join("flash/binary.md")]);
        assert_eq!(summary.generated, vec![out_dir(root).join("flash-ok.png")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_markdown_gets_a_card() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let shared = write_markdown(root, "shared/faq.md", Some("title: FAQ"), "# FAQ");
        std::fs::create_dir_all(root.join("flash")).unwrap();
        std::os::unix::fs::symlink(&shared, root.join("flash/faq.md")).unwrap();

        let renderer = MockRenderer::new();
        let summary =
            generate_all_with_renderer(&renderer, &config_for(&["flash"]), root, None).unwrap();

        assert_eq!(summary.generated, vec![out_dir(root).join("flash-faq.png")]);
        assert_eq!(renderer.get_rendered()[0].texts[0].text, "FAQ");
    }

    #[test]
    fn output_dir_blocked_by_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(&[]);
        std::fs::write(tmp.path().join("blocker"), "file").unwrap();
        config.banner.output_dir = "blocker/cards".to_string();

        let result = generate_all_with_renderer(&MockRenderer::new(), &config, tmp.path(), None);
        assert!(matches!(result, Err(CardsError::OutputDir { .. })));
    }
}
