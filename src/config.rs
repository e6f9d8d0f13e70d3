//! Tool configuration module.
//!
//! Handles loading, validating, and merging `poster.toml`. Stock defaults
//! are serialized to a TOML table and the user file is merged over them key
//! by key, so a config file only needs the values it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [export]
//! output_dir = "posters"        # Where `export` writes PNGs
//! default_preset = "print"      # Preset used when none is given
//!
//! [export.presets.print]        # One table per preset; add your own
//! width = 3600
//! height = 5400                 # Long edge, always preserved
//! dpi = 300
//! name = "Print 300dpi"
//!
//! [defaults]
//! style = "minimal"             # Registry style id
//! # palette = "paper"           # Omit for the style's default palette
//! aspect_ratio = "2:3"          # 2:3 | 3:4 | 4:5 | 1:1 | ISO
//! orientation = "portrait"      # portrait | landscape
//! margin = 5.0                  # Percent of poster width
//!
//! [share]
//! base_url = "https://example.com/editor"
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Poster documents
//!
//! [`load_poster`] reads a poster document (JSON, or TOML by extension) in
//! the same shape as a share link record and merges it over the configured
//! defaults.

use crate::codec::ShareRecord;
use crate::export::stock_presets;
use crate::poster::{AspectRatio, ExportResolution, Orientation, PosterConfig};
use crate::styles;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest preset edge accepted, in pixels. A 20000 px RGBA canvas is
/// already 1.6 GB.
pub const MAX_PRESET_EDGE: u32 = 20_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Unknown style '{0}'")]
    UnknownStyle(String),
}

/// Tool configuration loaded from `poster.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Export presets and output location.
    pub export: ExportConfig,
    /// Starting values for new posters and documents.
    pub defaults: DefaultsConfig,
    /// Share link settings.
    pub share: ShareConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.presets.is_empty() {
            return Err(ConfigError::Validation(
                "export.presets must not be empty".into(),
            ));
        }
        for (id, preset) in &self.export.presets {
            if preset.width == 0 || preset.height == 0 || preset.dpi == 0 {
                return Err(ConfigError::Validation(format!(
                    "export.presets.{id}: width, height and dpi must be non-zero"
                )));
            }
            if preset.width > MAX_PRESET_EDGE || preset.height > MAX_PRESET_EDGE {
                return Err(ConfigError::Validation(format!(
                    "export.presets.{id}: width and height must be at most {MAX_PRESET_EDGE}"
                )));
            }
        }
        if !self.export.presets.contains_key(&self.export.default_preset) {
            return Err(ConfigError::Validation(format!(
                "export.default_preset '{}' is not a defined preset",
                self.export.default_preset
            )));
        }

        let style = styles::get_style_by_id(&self.defaults.style)
            .ok_or_else(|| ConfigError::UnknownStyle(self.defaults.style.clone()))?;
        if let Some(palette) = &self.defaults.palette
            && style.palette(palette).is_none()
        {
            return Err(ConfigError::Validation(format!(
                "defaults.palette '{palette}' is not a palette of style '{}'",
                style.id
            )));
        }
        if !self.defaults.aspect_ratio.is_known() {
            return Err(ConfigError::Validation(format!(
                "defaults.aspect_ratio '{}' must be one of 2:3, 3:4, 4:5, 1:1, ISO",
                self.defaults.aspect_ratio
            )));
        }
        if !(0.0..=50.0).contains(&self.defaults.margin) {
            return Err(ConfigError::Validation(
                "defaults.margin must be 0-50".into(),
            ));
        }
        Ok(())
    }

    /// Look up a preset by id.
    pub fn preset(&self, id: &str) -> Option<ExportResolution> {
        self.export.presets.get(id).map(PresetConfig::to_resolution)
    }

    /// All presets, smallest long edge first.
    pub fn presets(&self) -> Vec<(String, ExportResolution)> {
        let mut presets: Vec<(String, ExportResolution)> = self
            .export
            .presets
            .iter()
            .map(|(id, p)| (id.clone(), p.to_resolution()))
            .collect();
        presets.sort_by(|(a_id, a), (b_id, b)| a.height.cmp(&b.height).then(a_id.cmp(b_id)));
        presets
    }

    /// A fresh poster built from `[defaults]`.
    pub fn default_poster(&self) -> Result<PosterConfig, ConfigError> {
        let defaults = &self.defaults;
        let style = styles::get_style_by_id(&defaults.style)
            .ok_or_else(|| ConfigError::UnknownStyle(defaults.style.clone()))?;

        let mut poster = PosterConfig::with_style(style);
        if let Some(palette) = defaults.palette.as_deref().and_then(|id| style.palette(id)) {
            poster.palette = palette.clone();
        }
        poster.format.aspect_ratio = defaults.aspect_ratio.clone();
        poster.format.orientation = defaults.orientation;
        poster.format.margin = defaults.margin;
        Ok(poster)
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory `export` writes into.
    pub output_dir: String,
    /// Preset used when `export`/`resolution` get no `--preset`.
    pub default_preset: String,
    /// Named export resolutions.
    pub presets: BTreeMap<String, PresetConfig>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "posters".to_string(),
            default_preset: crate::export::DEFAULT_PRESET.to_string(),
            presets: stock_presets()
                .into_iter()
                .map(|(id, res)| (id, PresetConfig::from(res)))
                .collect(),
        }
    }
}

/// One named export resolution. `height` is the long edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub name: String,
}

impl PresetConfig {
    pub fn to_resolution(&self) -> ExportResolution {
        ExportResolution::new(self.width, self.height, self.dpi, self.name.clone())
    }
}

impl From<ExportResolution> for PresetConfig {
    fn from(res: ExportResolution) -> Self {
        Self {
            width: res.width,
            height: res.height,
            dpi: res.dpi,
            name: res.name,
        }
    }
}

/// Starting values for new posters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
    pub aspect_ratio: AspectRatio,
    pub orientation: Orientation,
    pub margin: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            style: styles::default_style().id.to_string(),
            palette: None,
            aspect_ratio: AspectRatio::TwoThree,
            orientation: Orientation::Portrait,
            margin: 5.0,
        }
    }
}

/// Share link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    /// Editor URL share payloads are attached to.
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.com/editor".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a `poster.toml` path.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Load a poster document and merge it over the configured defaults.
///
/// `.toml` files are parsed as TOML, everything else as JSON.
pub fn load_poster(path: &Path, config: &ToolConfig) -> Result<PosterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    let record: ShareRecord = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    let style_id = record.style.clone();
    let patch = record
        .resolve()
        .ok_or(ConfigError::UnknownStyle(style_id))?;
    Ok(config.default_poster()?.merged(patch))
}

/// Returns a fully-commented stock `poster.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Map Poster Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each table only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Directory the `export` command writes PNG files into.
output_dir = "posters"

# Preset used when no --preset is given.
default_preset = "print"

# Named export resolutions. `height` is the long edge and is always kept;
# the short edge is derived from the poster's aspect ratio at export time.
# Add a table to define your own preset, e.g. [export.presets.a2].
# Width and height are capped at 20000 px.
[export.presets.preview]
width = 1200
height = 1800
dpi = 72
name = "Preview"

[export.presets.digital]
width = 2400
height = 3600
dpi = 150
name = "Digital HD"

[export.presets.print]
width = 3600
height = 5400
dpi = 300
name = "Print 300dpi"

[export.presets.large]
width = 7200
height = 10800
dpi = 300
name = "Large Print"

# ---------------------------------------------------------------------------
# Poster defaults
# ---------------------------------------------------------------------------
[defaults]
# Registry style id. Run `map-poster styles` for the list.
style = "minimal"

# Palette id within the style. Omit to use the style's default palette.
# palette = "paper"

# One of "2:3", "3:4", "4:5", "1:1", "ISO".
aspect_ratio = "2:3"

# "portrait" or "landscape".
orientation = "portrait"

# Margin around the map, in percent of the poster width (0-50).
margin = 5.0

# ---------------------------------------------------------------------------
# Share links
# ---------------------------------------------------------------------------
[share]
# Editor URL that `encode --url` attaches the payload to.
base_url = "https://example.com/editor"
"##
}
