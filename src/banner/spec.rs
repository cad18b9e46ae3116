//! Card description types.
//!
//! These structs describe *what* a banner card looks like, not *how* it is
//! drawn. They are the interface between the batch in [`crate::cards`]
//! (which decides which cards to make) and a [`CardRenderer`](super::CardRenderer)
//! (which does the pixel work). Swapping the renderer for a mock in tests
//! leaves the batch logic untouched.
//!
//! ## Types
//!
//! - [`Rgba`]: a CSS-style color (`#fff`, `#7a7a7a`, `rgba(0, 0, 0, 0)`).
//! - [`TextBlock`]: one run of text with position, size, color and optional wrap width.
//! - [`FontFace`]: a font file plus the family name text blocks refer to.
//! - [`RoundedBorder`]: stroke drawn along the canvas edge.
//! - [`CardSpec`]: everything needed to produce one PNG.

use crate::config::{BannerConfig, TextBlockConfig};
use crate::metadata::DocumentMetadata;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);

    pub fn alpha(self) -> u8 {
        self.0[3]
    }

    pub fn is_transparent(self) -> bool {
        self.alpha() == 0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}'")]
pub struct ColorParseError(pub String);

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)` with `a` in `0..=1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        let (args, has_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest.strip_suffix(')').ok_or_else(err)?, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest.strip_suffix(')').ok_or_else(err)?, false)
        } else {
            return Err(err());
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != if has_alpha { 4 } else { 3 } {
            return Err(err());
        }

        let mut channels = [0u8, 0, 0, 255];
        for (channel, part) in channels.iter_mut().zip(&parts[..3]) {
            *channel = part.parse::<u8>().map_err(|_| err())?;
        }
        if has_alpha {
            let alpha: f32 = parts[3].parse().map_err(|_| err())?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(err());
            }
            channels[3] = (alpha * 255.0).round() as u8;
        }
        Ok(Rgba(channels))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut channels = [0u8, 0, 0, 255];
            for (channel, c) in channels.iter_mut().zip(hex.chars()) {
                let nibble = c.to_digit(16)? as u8;
                *channel = nibble * 17;
            }
            Some(Rgba(channels))
        }
        6 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => None,
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            let alpha = f32::from(a) / 255.0;
            write!(f, "rgba({r}, {g}, {b}, {alpha})")
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A font file made available to text blocks under `family`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub file: PathBuf,
    pub family: String,
}

/// One run of text drawn on the card.
///
/// `y` is the baseline of the first line. When `max_width` is set the text
/// is word-wrapped to that pixel width; otherwise only explicit newlines
/// break lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub family: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub color: Rgba,
    pub max_width: Option<f32>,
    pub line_height: f32,
}

/// Stroke along the canvas edge with rounded corners.
///
/// The stock color is fully transparent, so the stroke is configured but
/// leaves the card unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedBorder {
    pub color: Rgba,
    pub radius: u32,
    pub width: u32,
}

/// Full description of one banner card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSpec {
    pub width: u32,
    pub height: u32,
    pub template_image: PathBuf,
    pub fonts: Vec<FontFace>,
    pub texts: Vec<TextBlock>,
    pub rounded_border: RoundedBorder,
    pub output: PathBuf,
}

fn text_block(text: &str, family: &str, config: &TextBlockConfig) -> TextBlock {
    TextBlock {
        text: text.to_string(),
        family: family.to_string(),
        size: config.size,
        x: config.x,
        y: config.y,
        color: config.color,
        max_width: config.max_width,
        line_height: config.line_height,
    }
}

/// Build the card for one document.
///
/// Relative template and font paths are resolved against `root`. Never
/// fails: the metadata already carries its defaults.
pub fn build_card_spec(
    metadata: &DocumentMetadata,
    output: &Path,
    banner: &BannerConfig,
    root: &Path,
) -> CardSpec {
    let family = banner.font.family.as_str();
    CardSpec {
        width: banner.width,
        height: banner.height,
        template_image: root.join(&banner.template_image),
        fonts: vec![FontFace {
            file: root.join(&banner.font.file),
            family: family.to_string(),
        }],
        texts: vec![
            text_block(&metadata.title, family, &banner.title),
            text_block(&metadata.description, family, &banner.description),
        ],
        rounded_border: RoundedBorder {
            color: banner.rounded_border.color,
            radius: banner.rounded_border.radius,
            width: banner.rounded_border.width,
        },
        output: output.to_path_buf(),
    }
}
