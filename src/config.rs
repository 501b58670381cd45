//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `gallery.toml`. Stock defaults are
//! the base layer; a user file in the gallery root overrides just the keys it
//! names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Documents"              # Page title of the generated gallery
//!
//! [thumbnails]
//! target_width = 200               # Raster width of card previews
//!
//! [upload]
//! accepted_mime_type = "application/pdf"
//! date_format = "%m/%d/%Y"         # chrono format for date labels
//!
//! [scan]
//! pdf_dir = "DOCS_PDF"             # Directory scanned for preloaded PDFs
//! output_file = "data.js"          # Preloaded list written by `scan`
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the gallery root.
pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Generated page settings.
    pub site: SiteConfig,
    /// Thumbnail pipeline settings.
    pub thumbnails: ThumbnailsConfig,
    /// Upload validation and labelling.
    pub upload: UploadConfig,
    /// Directory scanner settings.
    pub scan: ScanConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.target_width == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.target_width must be non-zero".into(),
            ));
        }
        if self.upload.accepted_mime_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "upload.accepted_mime_type must not be empty".into(),
            ));
        }
        if self.upload.date_format.trim().is_empty() {
            return Err(ConfigError::Validation(
                "upload.date_format must not be empty".into(),
            ));
        }
        if StrftimeItems::new(&self.upload.date_format).any(|item| item == Item::Error) {
            return Err(ConfigError::Validation(format!(
                "upload.date_format is not a valid format string: {:?}",
                self.upload.date_format
            )));
        }
        if self.scan.pdf_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "scan.pdf_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documents".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Width of the rendered preview. Height follows the page aspect ratio.
    pub target_width: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self { target_width: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Media type a candidate must carry, compared exactly.
    pub accepted_mime_type: String,
    /// `chrono` format string for the date label of new uploads and scanned
    /// PDFs.
    pub date_format: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_mime_type: "application/pdf".to_string(),
            date_format: "%m/%d/%Y".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Directory (relative to the gallery root) holding preloaded PDFs.
    pub pdf_dir: String,
    /// Data file (relative to the gallery root) the scanner writes.
    pub output_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pdf_dir: "DOCS_PDF".to_string(),
            output_file: "data.js".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
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

/// Load `gallery.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
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
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `gallery.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    let config = resolve_config(stock_defaults_value(), load_raw_config(root)?)?;
    tracing::debug!(root = %root.display(), "loaded gallery config");
    Ok(config)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# PDF Gallery Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Generated page
# ---------------------------------------------------------------------------
[site]
# Title shown in the browser tab and page header.
title = "Documents"

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Width of each card preview. The height follows the first page's aspect
# ratio.
target_width = 200

# ---------------------------------------------------------------------------
# Uploads
# ---------------------------------------------------------------------------
[upload]
# Files must carry exactly this media type to be accepted.
accepted_mime_type = "application/pdf"

# Date label format for new uploads and scanned PDFs (chrono strftime
# syntax).
date_format = "%m/%d/%Y"

# ---------------------------------------------------------------------------
# Directory scanner
# ---------------------------------------------------------------------------
[scan]
# Directory holding the PDFs listed at startup. Created if missing.
pdf_dir = "DOCS_PDF"

# File the preloaded document list is written to.
output_file = "data.js"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = GalleryConfig::default();
        assert_eq!(config.site.title, "Documents");
        assert_eq!(config.thumbnails.target_width, 200);
        assert_eq!(config.upload.accepted_mime_type, "application/pdf");
        assert_eq!(config.upload.date_format, "%m/%d/%Y");
        assert_eq!(config.scan.pdf_dir, "DOCS_PDF");
        assert_eq!(config.scan.output_file, "data.js");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[thumbnails]
target_width = 320
"##;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.thumbnails.target_width, 320);
        assert_eq!(config.scan.pdf_dir, "DOCS_PDF");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r##"
[site]
title = "Contracts"

[scan]
pdf_dir = "pdfs"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Contracts");
        assert_eq!(config.scan.pdf_dir, "pdfs");
        assert_eq!(config.scan.output_file, "data.js");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r##"
[thumbnails]
target_widht = 100
"##;
        let result: Result<GalleryConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[viewer]\nzoom = 2\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn validate_zero_width() {
        let mut config = GalleryConfig::default();
        config.thumbnails.target_width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_mime_type() {
        let mut config = GalleryConfig::default();
        config.upload.accepted_mime_type = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_bad_date_format() {
        let mut config = GalleryConfig::default();
        config.upload.date_format = "%Y-%".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(GalleryConfig::default().validate().is_ok());
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged.as_integer(), Some(2));
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("[thumbnails]\ntarget_width = 0\n").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: GalleryConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }
}
