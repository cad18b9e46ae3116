//! Pure Rust card renderer.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode template | `image::open` |
//! | Scale to canvas | `image::imageops::resize` with `Lanczos3` filter |
//! | Glyph outlines + coverage | `ab_glyph` (`FontArc`, `OutlinedGlyph::draw`) |
//! | Word wrap, border, blending | [`layout`](super::layout) |
//! | Encode | `RgbaImage::save_with_format` (PNG) |

use super::backend::{CardRenderer, RenderError};
use super::layout::{blend, in_border, wrap_words};
use super::spec::{CardSpec, FontFace, RoundedBorder, TextBlock};
use ab_glyph::{Font, FontArc, GlyphId, PxScale, PxScaleFont, ScaleFont, point};
use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};
use tracing::debug;

/// Renderer backed by the `image` and `ab_glyph` crates.
///
/// See the [module docs](self) for the crate-to-step mapping.
pub struct RustRenderer;

impl RustRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn load_fonts(faces: &[FontFace]) -> Result<Vec<(String, FontArc)>, RenderError> {
    faces
        .iter()
        .map(|face| {
            let data = std::fs::read(&face.file)?;
            let font = FontArc::try_from_vec(data)
                .map_err(|_| RenderError::InvalidFont(face.file.clone()))?;
            Ok((face.family.clone(), font))
        })
        .collect()
}

/// Pick the font registered under the block's family, else the first one.
fn font_for<'a>(fonts: &'a [(String, FontArc)], family: &str) -> Option<&'a FontArc> {
    fonts
        .iter()
        .find(|(name, _)| name == family)
        .or_else(|| fonts.first())
        .map(|(_, font)| font)
}

fn measure(font: &PxScaleFont<&FontArc>, text: &str) -> f32 {
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for c in text.chars() {
        let id = font.glyph_id(c);
        if let Some(prev) = previous {
            width += font.kern(prev, id);
        }
        width += font.h_advance(id);
        previous = Some(id);
    }
    width
}

fn draw_line(
    canvas: &mut RgbaImage,
    font: &PxScaleFont<&FontArc>,
    line: &str,
    x: f32,
    baseline: f32,
    color: [u8; 4],
) {
    let (width, height) = canvas.dimensions();
    let mut caret = x;
    let mut previous: Option<GlyphId> = None;

    for c in line.chars() {
        let id = font.glyph_id(c);
        if let Some(prev) = previous {
            caret += font.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(font.scale(), point(caret, baseline));
        caret += font.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i64 + i64::from(gx);
            let py = bounds.min.y as i64 + i64::from(gy);
            if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                return;
            }
            let pixel = canvas.get_pixel_mut(px as u32, py as u32);
            pixel.0 = blend(pixel.0, color, coverage);
        });
    }
}

fn draw_block(canvas: &mut RgbaImage, font: &FontArc, block: &TextBlock) {
    let scaled = font.as_scaled(PxScale::from(block.size));
    let lines = match block.max_width {
        Some(max_width) => wrap_words(&block.text, max_width, |s| measure(&scaled, s)),
        None => block.text.lines().map(String::from).collect(),
    };
    for (i, line) in lines.iter().enumerate() {
        let baseline = block.y + i as f32 * block.line_height;
        draw_line(canvas, &scaled, line, block.x, baseline, block.color.0);
    }
}

fn draw_border(canvas: &mut RgbaImage, border: &RoundedBorder) {
    if border.color.is_transparent() || border.width == 0 {
        return;
    }
    let (width, height) = canvas.dimensions();
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        if in_border(x, y, width, height, border.radius, border.width) {
            pixel.0 = blend(pixel.0, border.color.0, 1.0);
        }
    }
}

impl CardRenderer for RustRenderer {
    fn render(&self, spec: &CardSpec) -> Result<(), RenderError> {
        let template = image::open(&spec.template_image).map_err(|source| RenderError::Template {
            path: spec.template_image.clone(),
            source,
        })?;

        let mut canvas = if (template.width(), template.height()) == (spec.width, spec.height) {
            template.to_rgba8()
        } else {
            debug!(
                from = ?(template.width(), template.height()),
                to = ?(spec.width, spec.height),
                "scaling card template"
            );
            image::imageops::resize(&template, spec.width, spec.height, FilterType::Lanczos3)
        };

        let blocks: Vec<&TextBlock> = spec
            .texts
            .iter()
            .filter(|block| !block.text.trim().is_empty())
            .collect();
        if !blocks.is_empty() {
            let fonts = load_fonts(&spec.fonts)?;
            for block in blocks {
                let font = font_for(&fonts, &block.family).ok_or(RenderError::NoFonts)?;
                draw_block(&mut canvas, font, block);
            }
        }

        draw_border(&mut canvas, &spec.rounded_border);

        canvas
            .save_with_format(&spec.output, ImageFormat::Png)
            .map_err(|source| RenderError::Encode {
                path: spec.output.clone(),
                source,
            })
    }
}
