//! Tool configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives at
//! the documentation site root and is optional: stock defaults describe the
//! site as it ships, and a user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! projects = ["flash", "mobot", "serverlibraries"]
//!
//! [site]
//! title = "Pixel Services Docs"
//! logo = "https://static.pixel-services.com/static/assets/pservices_logo.png"
//!
//! [sidebar]
//! descriptor = "config/sidebar.json"    # Relative to each project directory
//!
//! [banner]
//! output_dir = ".vitepress/dist/assets/banner-cards"
//! index_document = "index.md"
//! width = 1280
//! height = 669
//! template_image = "resources/assets/pservicesdocs-card-template.png"
//!
//! [banner.font]
//! file = "resources/fonts/Roboto-Bold.ttf"
//! family = "Roboto"
//!
//! [banner.title]
//! size = 70.0
//! x = 75.0
//! y = 249.5
//! color = "#fff"
//! max_width = 700.0
//! line_height = 64.0
//!
//! [banner.description]
//! size = 32.0
//! x = 75.0
//! y = 409.0
//! color = "#7a7a7a"
//! line_height = 40.0
//!
//! [banner.rounded_border]
//! color = "rgba(0, 0, 0, 0)"
//! radius = 20
//! width = 10
//!
//! [social]
//! site_url = "https://docs.pixel-services.com"
//! image_base = "/assets/banner-cards"
//!
//! [versions]
//! repository_url = "https://maven.pixel-services.com/api/maven/details/releases"
//! timeout_secs = 30
//! placeholder = "Error fetching version"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::banner::Rgba;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml` at the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Documentation subprojects, in processing order.
    pub projects: Vec<String>,
    /// Site identity used in the theme configuration.
    pub site: SiteConfig,
    /// Sidebar descriptor location.
    pub sidebar: SidebarConfig,
    /// Banner card layout and locations.
    pub banner: BannerConfig,
    /// Social head tag settings.
    pub social: SocialConfig,
    /// Package repository lookup.
    pub versions: VersionsConfig,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            projects: vec![
                "flash".to_string(),
                "mobot".to_string(),
                "serverlibraries".to_string(),
            ],
            site: SiteConfig::default(),
            sidebar: SidebarConfig::default(),
            banner: BannerConfig::default(),
            social: SocialConfig::default(),
            versions: VersionsConfig::default(),
        }
    }
}

impl DocsConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for project in &self.projects {
            if project.is_empty() || project.contains(['/', '\\']) || project == ".." {
                return Err(ConfigError::Validation(format!(
                    "projects: '{project}' must be a plain directory name"
                )));
            }
        }
        if self.sidebar.descriptor.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sidebar.descriptor must not be empty".into(),
            ));
        }
        if self.banner.width == 0 || self.banner.height == 0 {
            return Err(ConfigError::Validation(
                "banner.width and banner.height must be non-zero".into(),
            ));
        }
        self.banner.title.validate("banner.title")?;
        self.banner.description.validate("banner.description")?;
        if self.versions.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "versions.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    pub logo: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Pixel Services Docs".to_string(),
            logo: "https://static.pixel-services.com/static/assets/pservices_logo.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// Descriptor path relative to each project directory.
    pub descriptor: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            descriptor: "config/sidebar.json".to_string(),
        }
    }
}

/// Banner card settings. Paths are relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    pub output_dir: String,
    /// Root document whose card is written as `index.png`.
    pub index_document: String,
    pub width: u32,
    pub height: u32,
    pub template_image: String,
    pub font: FontConfig,
    pub title: TextBlockConfig,
    pub description: TextBlockConfig,
    pub rounded_border: RoundedBorderConfig,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            output_dir: ".vitepress/dist/assets/banner-cards".to_string(),
            index_document: "index.md".to_string(),
            width: 1280,
            height: 669,
            template_image: "resources/assets/pservicesdocs-card-template.png".to_string(),
            font: FontConfig::default(),
            title: TextBlockConfig::default_title(),
            description: TextBlockConfig::default_description(),
            rounded_border: RoundedBorderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub file: String,
    pub family: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            file: "resources/fonts/Roboto-Bold.ttf".to_string(),
            family: "Roboto".to_string(),
        }
    }
}

/// Placement and style of one text block on the card.
///
/// No field-level defaults: the title and description blocks have different
/// stock values, so a partial table is completed by merging onto the stock
/// config (see [`load_config`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextBlockConfig {
    /// Font size in pixels.
    pub size: f32,
    pub x: f32,
    /// Baseline of the first line.
    pub y: f32,
    pub color: Rgba,
    /// Wrap width in pixels. Absent means no wrapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f32>,
    pub line_height: f32,
}

impl TextBlockConfig {
    pub fn default_title() -> Self {
        Self {
            size: 70.0,
            x: 75.0,
            y: 699.0 / 2.0 - 100.0,
            color: Rgba::WHITE,
            max_width: Some(700.0),
            line_height: 64.0,
        }
    }

    pub fn default_description() -> Self {
        Self {
            size: 32.0,
            x: 75.0,
            y: 699.0 - 290.0,
            color: Rgba([0x7a, 0x7a, 0x7a, 255]),
            max_width: None,
            line_height: 40.0,
        }
    }

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if self.size <= 0.0 || self.line_height <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "{key}.size and {key}.line_height must be positive"
            )));
        }
        if self.max_width.is_some_and(|w| w <= 0.0) {
            return Err(ConfigError::Validation(format!(
                "{key}.max_width must be positive"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundedBorderConfig {
    pub color: Rgba,
    pub radius: u32,
    pub width: u32,
}

impl Default for RoundedBorderConfig {
    fn default() -> Self {
        Self {
            color: Rgba::TRANSPARENT,
            radius: 20,
            width: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    /// Absolute site origin, prefixed to `twitter:image:src`.
    pub site_url: String,
    /// Public path the banner output directory is served under.
    pub image_base: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            site_url: "https://docs.pixel-services.com".to_string(),
            image_base: "/assets/banner-cards".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionsConfig {
    /// Listing endpoint; the artifact path is appended.
    pub repository_url: String,
    pub timeout_secs: u64,
    /// Shown instead of a version when the lookup fails.
    pub placeholder: String,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            repository_url: "https://maven.pixel-services.com/api/maven/details/releases"
                .to_string(),
            timeout_secs: 30,
            placeholder: "Error fetching version".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(DocsConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<DocsConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DocsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<DocsConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pixeldocs configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the site root.
# Unknown keys will cause an error.

# Documentation subprojects, in processing order. When two projects declare
# the same sidebar route prefix, the later project wins.
projects = ["flash", "mobot", "serverlibraries"]

# ---------------------------------------------------------------------------
# Site identity (theme configuration)
# ---------------------------------------------------------------------------
[site]
title = "Pixel Services Docs"
logo = "https://static.pixel-services.com/static/assets/pservices_logo.png"

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
[sidebar]
# Navigation descriptor, relative to each project directory.
descriptor = "config/sidebar.json"

# ---------------------------------------------------------------------------
# Banner cards
# ---------------------------------------------------------------------------
[banner]
output_dir = ".vitepress/dist/assets/banner-cards"
# Root document rendered as index.png.
index_document = "index.md"
width = 1280
height = 669
template_image = "resources/assets/pservicesdocs-card-template.png"

[banner.font]
file = "resources/fonts/Roboto-Bold.ttf"
family = "Roboto"

# y is the baseline of the first line; max_width enables word wrapping.
[banner.title]
size = 70.0
x = 75.0
y = 249.5
color = "#fff"
max_width = 700.0
line_height = 64.0

[banner.description]
size = 32.0
x = 75.0
y = 409.0
color = "#7a7a7a"
line_height = 40.0

# Stroke along the card edge. Fully transparent by default (no visible effect).
[banner.rounded_border]
color = "rgba(0, 0, 0, 0)"
radius = 20
width = 10

# ---------------------------------------------------------------------------
# Social head tags
# ---------------------------------------------------------------------------
[social]
site_url = "https://docs.pixel-services.com"
image_base = "/assets/banner-cards"

# ---------------------------------------------------------------------------
# Latest version lookup
# ---------------------------------------------------------------------------
[versions]
repository_url = "https://maven.pixel-services.com/api/maven/details/releases"
timeout_secs = 30
placeholder = "Error fetching version"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_lists_projects_in_order() {
        let config = DocsConfig::default();
        assert_eq!(config.projects, vec!["flash", "mobot", "serverlibraries"]);
    }

    #[test]
    fn default_banner_layout() {
        let banner = BannerConfig::default();
        assert_eq!((banner.width, banner.height), (1280, 669));
        assert_eq!(banner.title.y, 249.5);
        assert_eq!(banner.description.y, 409.0);
        assert_eq!(banner.title.max_width, Some(700.0));
        assert_eq!(banner.description.max_width, None);
        assert!(banner.rounded_border.color.is_transparent());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
projects = ["flash"]

[site]
title = "Other Docs"
"#;
        let config: DocsConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.projects, vec!["flash"]);
        assert_eq!(config.site.title, "Other Docs");
        // Defaults preserved
        assert_eq!(config.site.logo, SiteConfig::default().logo);
        assert_eq!(config.sidebar.descriptor, "config/sidebar.json");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.projects.len(), 3);
        assert_eq!(config.banner.output_dir, ".vitepress/dist/assets/banner-cards");
    }

    #[test]
    fn load_config_merges_partial_text_block() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[banner.title]
size = 80.0
color = "#000"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.banner.title.size, 80.0);
        assert_eq!(config.banner.title.color, Rgba([0, 0, 0, 255]));
        // Untouched keys keep the title defaults, not the description ones
        assert_eq!(config.banner.title.max_width, Some(700.0));
        assert_eq!(config.banner.title.line_height, 64.0);
        assert_eq!(config.banner.description.size, 32.0);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_bad_color() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[banner.rounded_border]\ncolor = \"blue-ish\"\n",
        )
        .unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[sidebar]\nfile = \"x.json\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Merge tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_replaces_arrays_wholesale() {
        let base: toml::Value = toml::from_str(r#"projects = ["a", "b"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"projects = ["c"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        let projects = merged["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].as_str(), Some("c"));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str("[banner.font]\nfile = \"a.ttf\"\nfamily = \"A\"").unwrap();
        let overlay: toml::Value = toml::from_str("[banner.font]\nfamily = \"B\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["banner"]["font"]["file"].as_str(), Some("a.ttf"));
        assert_eq!(merged["banner"]["font"]["family"].as_str(), Some("B"));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        DocsConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_nested_project_names() {
        let mut config = DocsConfig::default();
        config.projects.push("../etc".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_canvas() {
        let mut config = DocsConfig::default();
        config.banner.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_non_positive_wrap_width() {
        let mut config = DocsConfig::default();
        config.banner.title.max_width = Some(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[versions]\ntimeout_secs = 0").unwrap();
        assert!(matches!(
            resolve_config(base, Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: DocsConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = DocsConfig::default();
        assert_eq!(parsed.projects, defaults.projects);
        assert_eq!(parsed.site.title, defaults.site.title);
        assert_eq!(parsed.sidebar.descriptor, defaults.sidebar.descriptor);
        assert_eq!(parsed.banner.title.y, defaults.banner.title.y);
        assert_eq!(parsed.banner.title.color, defaults.banner.title.color);
        assert_eq!(parsed.banner.description.color, defaults.banner.description.color);
        assert_eq!(parsed.banner.description.max_width, None);
        assert_eq!(
            parsed.banner.rounded_border.color,
            defaults.banner.rounded_border.color
        );
        assert_eq!(parsed.social.site_url, defaults.social.site_url);
        assert_eq!(parsed.versions.placeholder, defaults.versions.placeholder);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value().unwrap();
        let table = value.as_table().unwrap();
        for section in ["projects", "site", "sidebar", "banner", "social", "versions"] {
            assert!(table.contains_key(section), "missing {section}");
        }
    }
}
