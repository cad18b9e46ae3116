//! Banner card composition: pure Rust, no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Describe** | [`build_card_spec`] (config + metadata → [`CardSpec`]) |
//! | **Template** | `image::open` + Lanczos3 resize to the canvas |
//! | **Text** | `ab_glyph` outlines, greedy word wrap |
//! | **Border** | rounded-rect stroke, source-over blend |
//!
//! The module is split into:
//! - **Spec**: Data structures describing a card
//! - **Layout**: Pure functions for wrapping, border geometry and blending (unit testable)
//! - **Backend**: [`CardRenderer`] trait + [`RustRenderer`]

pub mod backend;
mod layout;
pub mod rust_renderer;
mod spec;

pub use backend::{CardRenderer, RenderError};
pub use rust_renderer::RustRenderer;
pub use spec::{
    CardSpec, ColorParseError, FontFace, Rgba, RoundedBorder, TextBlock, build_card_spec,
};
