//! Card renderer trait and shared error type.
//!
//! The [`CardRenderer`] trait is the compositing seam: it takes a finished
//! [`CardSpec`] and either writes a PNG to `spec.output` or fails. The batch
//! in [`crate::cards`] only ever talks to this trait.
//!
//! The production implementation is
//! [`RustRenderer`](super::rust_renderer::RustRenderer).

use super::spec::CardSpec;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load template {path}: {source}")]
    Template {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Invalid font file: {0}")]
    InvalidFont(PathBuf),
    #[error("Card has text but no fonts")]
    NoFonts,
    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// Catch-all for `CardRenderer` implementations outside this crate whose
    /// failures fit none of the variants above.
    #[error("Rendering failed: {0}")]
    Failed(String),
}

/// Trait for card compositing backends.
pub trait CardRenderer {
    /// Produce the image described by `spec` at `spec.output`.
    fn render(&self, spec: &CardSpec) -> Result<(), RenderError>;
}
