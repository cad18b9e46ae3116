//! Sidebar composition.
//!
//! Each documentation project may ship a navigation descriptor next to its
//! pages:
//!
//! ```text
//! site/
//! ├── flash/
//! │   └── config/sidebar.json      {"/flash/": [ ...sections ]}
//! ├── mobot/
//! │   └── config/sidebar.json      {"/mobot/": [ ...sections ]}
//! └── serverlibraries/             (no descriptor: skipped)
//! ```
//!
//! [`compose`] visits the configured projects in order and merges every
//! descriptor's top-level keys into one [`SidebarMap`].
//!
//! ## Merge contract
//!
//! The merge is shallow and last-write-wins: when two projects declare the
//! same route prefix, the later project's sections replace the earlier ones
//! entirely (no deep merge). The prefix keeps the position where it was
//! first inserted. Projects are expected to use disjoint prefixes.
//!
//! ## Errors
//!
//! A missing descriptor is not an error. A descriptor that exists but is not
//! valid JSON, or whose top level is not an object, aborts the compose. The
//! values under each prefix are not validated: section lists, group objects
//! and anything else are merged as they are.

use crate::config::DocsConfig;
use crate::types::SidebarMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid sidebar descriptor {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Progress records emitted while composing.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEvent {
    Started {
        project_count: usize,
    },
    Checking {
        project: String,
        path: PathBuf,
    },
    Found {
        project: String,
        prefixes: Vec<String>,
    },
    Missing {
        project: String,
    },
    Composed {
        sidebar: SidebarMap,
    },
}

fn emit(events: &Option<Sender<SidebarEvent>>, event: SidebarEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening
        let _ = tx.send(event);
    }
}

/// Location of a project's descriptor.
pub fn descriptor_path(base_dir: &Path, project: &str, descriptor: &str) -> PathBuf {
    base_dir.join(project).join(descriptor)
}

/// Read and parse one descriptor.
pub fn load_descriptor(path: &Path) -> Result<SidebarMap, SidebarError> {
    let content = std::fs::read_to_string(path).map_err(|source| SidebarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SidebarError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Insert every key of `descriptor` into `sidebar`, replacing existing values.
pub fn merge_into(sidebar: &mut SidebarMap, descriptor: SidebarMap) {
    for (prefix, sections) in descriptor {
        if sidebar.insert(prefix.clone(), sections).is_some() {
            debug!(%prefix, "route prefix overwritten by later project");
        }
    }
}

/// Compose the sidebar from each project's descriptor, in project order.
pub fn compose(
    project_ids: &[String],
    base_dir: &Path,
    descriptor: &str,
    events: Option<Sender<SidebarEvent>>,
) -> Result<SidebarMap, SidebarError> {
    emit(
        &events,
        SidebarEvent::Started {
            project_count: project_ids.len(),
        },
    );

    let mut sidebar = SidebarMap::new();
    for project in project_ids {
        let path = descriptor_path(base_dir, project, descriptor);
        emit(
            &events,
            SidebarEvent::Checking {
                project: project.clone(),
                path: path.clone(),
            },
        );

        if !path.is_file() {
            emit(
                &events,
                SidebarEvent::Missing {
                    project: project.clone(),
                },
            );
            continue;
        }

        let found = load_descriptor(&path)?;
        emit(
            &events,
            SidebarEvent::Found {
                project: project.clone(),
                prefixes: found.keys().cloned().collect(),
            },
        );
        merge_into(&mut sidebar, found);
    }

    emit(
        &events,
        SidebarEvent::Composed {
            sidebar: sidebar.clone(),
        },
    );
    Ok(sidebar)
}

/// Compose using the projects and descriptor path from `config`.
pub fn compose_from_config(
    config: &DocsConfig,
    root: &Path,
    events: Option<Sender<SidebarEvent>>,
) -> Result<SidebarMap, SidebarError> {
    compose(&config.projects, root, &config.sidebar.descriptor, events)
}

/// Theme configuration handed to the site renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub site_title: String,
    pub logo: String,
    pub sidebar: SidebarMap,
}

impl ThemeConfig {
    pub fn from_config(config: &DocsConfig, sidebar: SidebarMap) -> Self {
        Self {
            site_title: config.site.title.clone(),
            logo: config.site.logo.clone(),
            sidebar,
        }
    }
}
