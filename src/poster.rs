//! Poster data model shared by the codec, the export path, and the CLI.
//!
//! A [`PosterConfig`] is the complete, in-memory description of one poster:
//! where it is, which registry style and palette it uses, how the text is
//! set, and how the sheet is framed. The codec reads it to build share links;
//! the export path reads it to size and render the output.
//!
//! Decoding a share link does not yield a full config. It yields a
//! [`PosterPatch`] (one optional slot per field), which the caller applies
//! over a default or current config with [`PosterConfig::apply`].
//!
//! All serialized field names are camelCase so documents and share links
//! line up with the web editor's JSON.

use crate::styles::{self, PosterStyle};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Sentinel palette id for palettes generated at runtime (e.g. by the
/// assistant) that have no entry in the style registry.
pub const CUSTOM_PALETTE_ID: &str = "ai-custom";

/// Deserialize a field, falling back to its default when the value is one
/// this build does not know (e.g. a border style added by a newer editor).
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        debug!(error = %e, "unrecognised value, using default");
        T::default()
    }))
}

// ============================================================================
// Location
// ============================================================================

/// Geographic framing of the poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Headline place name, e.g. `"Lisbon"`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// `[longitude, latitude]`.
    pub center: [f64; 2],
    /// `[[sw_lng, sw_lat], [ne_lng, ne_lat]]`.
    pub bounds: [[f64; 2]; 2],
    pub zoom: f64,
}

impl Location {
    pub fn longitude(&self) -> f64 {
        self.center[0]
    }

    pub fn latitude(&self) -> f64 {
        self.center[1]
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            name: "Lisbon".to_string(),
            city: None,
            subtitle: Some("Portugal".to_string()),
            center: [-9.1393, 38.7223],
            bounds: [[-9.2300, 38.6914], [-9.0900, 38.7960]],
            zoom: 12.0,
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Seven-level road colour hierarchy, most to least important.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadColors {
    pub motorway: String,
    pub trunk: String,
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub residential: String,
    pub service: String,
}

impl RoadColors {
    /// All seven levels set to the same colour.
    pub fn uniform(color: &str) -> Self {
        Self {
            motorway: color.to_string(),
            trunk: color.to_string(),
            primary: color.to_string(),
            secondary: color.to_string(),
            tertiary: color.to_string(),
            residential: color.to_string(),
            service: color.to_string(),
        }
    }
}

/// A full colour palette for the map and the poster chrome.
///
/// The `primary`/`secondary`/`population`/`parks` aliases only exist so older
/// palettes keep deserializing; nothing in this crate reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub id: String,
    pub name: String,
    /// Classification of the palette, e.g. `"light"`, `"dark"`, `"custom"`.
    pub style: String,
    pub background: String,
    pub text: String,
    pub border: String,
    pub roads: RoadColors,
    pub water: String,
    pub water_line: String,
    pub green_space: String,
    pub landuse: String,
    pub buildings: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hillshade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parks: Option<String>,
}

impl Palette {
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_PALETTE_ID
    }
}

// ============================================================================
// Typography
// ============================================================================

/// Vertical anchor of the title block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Top,
    Center,
    #[default]
    Bottom,
}

/// Band drawn behind the title block to keep it legible over the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBackdrop {
    None,
    Subtle,
    #[default]
    Strong,
    Gradient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub title_font: String,
    pub title_size: f64,
    pub subtitle_font: String,
    pub subtitle_size: f64,
    pub font_weight: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_caps: Option<bool>,
    pub show_title: bool,
    pub show_subtitle: bool,
    pub show_coordinates: bool,
    #[serde(deserialize_with = "or_default")]
    pub position: TextPosition,
    #[serde(deserialize_with = "or_default")]
    pub text_backdrop: TextBackdrop,
    /// Backdrop height as a percentage of the poster height.
    pub backdrop_height: f64,
    /// Backdrop opacity, 0–100.
    pub backdrop_alpha: f64,
    /// Maximum title width as a percentage of the poster width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title_font: "Playfair Display".to_string(),
            title_size: 48.0,
            subtitle_font: "Inter".to_string(),
            subtitle_size: 16.0,
            font_weight: 700,
            letter_spacing: None,
            all_caps: Some(true),
            show_title: true,
            show_subtitle: true,
            show_coordinates: true,
            position: TextPosition::Bottom,
            text_backdrop: TextBackdrop::Strong,
            backdrop_height: 20.0,
            backdrop_alpha: 85.0,
            max_width: None,
        }
    }
}

// ============================================================================
// Format
// ============================================================================

/// Poster aspect ratio, stored on the wire by its id (`"2:3"`, `"ISO"`, …).
///
/// Ids this build does not recognise are kept in [`AspectRatio::Other`]
/// instead of failing deserialization; old share links must keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AspectRatio {
    #[default]
    TwoThree,
    ThreeFour,
    FourFive,
    Square,
    /// ISO 216 (A-series), 1:√2.
    Iso,
    Other(String),
}

impl AspectRatio {
    pub const KNOWN: [AspectRatio; 5] = [
        AspectRatio::TwoThree,
        AspectRatio::ThreeFour,
        AspectRatio::FourFive,
        AspectRatio::Square,
        AspectRatio::Iso,
    ];

    pub fn id(&self) -> &str {
        match self {
            Self::TwoThree => "2:3",
            Self::ThreeFour => "3:4",
            Self::FourFive => "4:5",
            Self::Square => "1:1",
            Self::Iso => "ISO",
            Self::Other(id) => id,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for AspectRatio {
    fn from(id: &str) -> Self {
        match id {
            "2:3" => Self::TwoThree,
            "3:4" => Self::ThreeFour,
            "4:5" => Self::FourFive,
            "1:1" => Self::Square,
            "ISO" => Self::Iso,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AspectRatio {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        match ratio {
            AspectRatio::Other(id) => id,
            known => known.id().to_string(),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(format!(
                "unknown orientation '{other}' (expected portrait or landscape)"
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => f.write_str("portrait"),
            Self::Landscape => f.write_str("landscape"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    #[default]
    Thin,
    Thick,
    Double,
    Inset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Texture {
    Paper,
    Canvas,
    Grain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Format {
    pub aspect_ratio: AspectRatio,
    #[serde(deserialize_with = "or_default")]
    pub orientation: Orientation,
    /// Margin around the map as a percentage of the poster width.
    pub margin: f64,
    #[serde(deserialize_with = "or_default")]
    pub border_style: BorderStyle,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub texture: Option<Texture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_intensity: Option<f64>,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::TwoThree,
            orientation: Orientation::Portrait,
            margin: 5.0,
            border_style: BorderStyle::Thin,
            texture: None,
            texture_intensity: None,
        }
    }
}

// ============================================================================
// Layers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layers {
    pub streets: bool,
    pub buildings: bool,
    pub water: bool,
    pub parks: bool,
    pub terrain: bool,
    pub contours: bool,
    pub population: bool,
    pub labels: bool,
    pub marker: bool,
    pub contour_density: f64,
    pub label_size: f64,
    pub label_max_width: f64,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            streets: true,
            buildings: false,
            water: true,
            parks: true,
            terrain: false,
            contours: false,
            population: false,
            labels: false,
            marker: false,
            contour_density: 50.0,
            label_size: 1.0,
            label_max_width: 8.0,
        }
    }
}

/// Free-form viewport settings (pitch, bearing, …), carried opaquely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Camera(pub serde_json::Map<String, serde_json::Value>);

// ============================================================================
// Export resolution
// ============================================================================

/// A named raster target, e.g. 3600×5400 at 300 dpi "Print 300dpi".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResolution {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub name: String,
}

impl ExportResolution {
    pub fn new(width: u32, height: u32, dpi: u32, name: impl Into<String>) -> Self {
        Self {
            width,
            height,
            dpi,
            name: name.into(),
        }
    }

    /// Physical print size in inches at the stated dpi.
    pub fn print_size_inches(&self) -> (f64, f64) {
        let dpi = self.dpi.max(1) as f64;
        (self.width as f64 / dpi, self.height as f64 / dpi)
    }
}

// ============================================================================
// PosterConfig and PosterPatch
// ============================================================================

/// The complete poster description held by the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterConfig {
    pub location: Location,
    pub style: &'static PosterStyle,
    pub palette: Palette,
    pub typography: Typography,
    pub format: Format,
    pub layers: Layers,
    pub camera: Option<Camera>,
}

impl PosterConfig {
    /// Default poster in the given style, using the style's default palette.
    pub fn with_style(style: &'static PosterStyle) -> Self {
        Self {
            location: Location::default(),
            style,
            palette: style.default_palette.clone(),
            typography: Typography::default(),
            format: Format::default(),
            layers: Layers::default(),
            camera: None,
        }
    }

    /// Overwrite every field the patch carries; leave the rest alone.
    pub fn apply(&mut self, patch: PosterPatch) {
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
        if let Some(palette) = patch.palette {
            self.palette = palette;
        }
        if let Some(typography) = patch.typography {
            self.typography = typography;
        }
        if let Some(format) = patch.format {
            self.format = format;
        }
        if let Some(layers) = patch.layers {
            self.layers = layers;
        }
        if let Some(camera) = patch.camera {
            self.camera = Some(camera);
        }
    }

    /// Consuming form of [`apply`](Self::apply).
    pub fn merged(mut self, patch: PosterPatch) -> Self {
        self.apply(patch);
        self
    }
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self::with_style(styles::default_style())
    }
}

/// A partial [`PosterConfig`]: only the fields that were present in a
/// decoded share link or document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PosterPatch {
    pub location: Option<Location>,
    pub style: Option<&'static PosterStyle>,
    pub palette: Option<Palette>,
    pub typography: Option<Typography>,
    pub format: Option<Format>,
    pub layers: Option<Layers>,
    pub camera: Option<Camera>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // AspectRatio
    // =========================================================================

    #[test]
    fn aspect_ratio_ids_roundtrip_through_strings() {
        for ratio in AspectRatio::KNOWN {
            assert_eq!(AspectRatio::from(ratio.id()), ratio);
        }
    }

    #[test]
    fn aspect_ratio_keeps_unknown_ids() {
        let ratio = AspectRatio::from("16:9");
        assert_eq!(ratio, AspectRatio::Other("16:9".to_string()));
        assert!(!ratio.is_known());
        assert_eq!(ratio.to_string(), "16:9");
    }

    #[test]
    fn aspect_ratio_deserializes_unknown_id_without_error() {
        let ratio: AspectRatio = serde_json::from_str(r#""A-series""#).unwrap();
        assert_eq!(ratio, AspectRatio::Other("A-series".to_string()));
        assert_eq!(serde_json::to_string(&ratio).unwrap(), r#""A-series""#);
    }

    #[test]
    fn aspect_ratio_serializes_as_id() {
        assert_eq!(serde_json::to_string(&AspectRatio::Iso).unwrap(), r#""ISO""#);
        assert_eq!(
            serde_json::to_string(&AspectRatio::Square).unwrap(),
            r#""1:1""#
        );
    }

    #[test]
    fn orientation_parses_lowercase_names() {
        assert_eq!("portrait".parse::<Orientation>(), Ok(Orientation::Portrait));
        assert_eq!(
            "landscape".parse::<Orientation>(),
            Ok(Orientation::Landscape)
        );
        assert!("sideways".parse::<Orientation>().is_err());
    }

    // =========================================================================
    // Serde shape
    // =========================================================================

    #[test]
    fn format_uses_camel_case_keys() {
        let json = serde_json::to_value(Format::default()).unwrap();
        assert_eq!(json["aspectRatio"], "2:3");
        assert_eq!(json["borderStyle"], "thin");
        assert!(json.get("texture").is_none());
    }

    #[test]
    fn typography_fills_missing_fields_with_defaults() {
        let typography: Typography =
            serde_json::from_str(r#"{"titleFont":"Oswald","position":"top"}"#).unwrap();
        assert_eq!(typography.title_font, "Oswald");
        assert_eq!(typography.position, TextPosition::Top);
        assert_eq!(typography.subtitle_font, Typography::default().subtitle_font);
    }

    #[test]
    fn camera_passes_arbitrary_keys_through() {
        let camera: Camera = serde_json::from_str(r#"{"pitch":45,"bearing":-17.5}"#).unwrap();
        assert_eq!(camera.0["pitch"], 45);
        assert_eq!(
            serde_json::to_string(&camera).unwrap(),
            r#"{"bearing":-17.5,"pitch":45}"#
        );
    }

    #[test]
    fn print_size_inches_divides_by_dpi() {
        let res = ExportResolution::new(3600, 5400, 300, "Print");
        assert_eq!(res.print_size_inches(), (12.0, 18.0));
    }

    // =========================================================================
    // Patch merging
    // =========================================================================

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut config = PosterConfig::default();
        let original_typography = config.typography.clone();

        let location = Location {
            name: "Kyoto".to_string(),
            ..Location::default()
        };
        config.apply(PosterPatch {
            location: Some(location.clone()),
            ..PosterPatch::default()
        });

        assert_eq!(config.location, location);
        assert_eq!(config.typography, original_typography);
        assert!(config.camera.is_none());
    }

    #[test]
    fn apply_switches_style_and_palette_together() {
        let style = crate::styles::get_style_by_id("noir").unwrap();
        let palette = style.palettes[1].clone();
        let config = PosterConfig::default().merged(PosterPatch {
            style: Some(style),
            palette: Some(palette.clone()),
            ..PosterPatch::default()
        });
        assert_eq!(config.style.id, "noir");
        assert_eq!(config.palette, palette);
    }

    #[test]
    fn default_config_uses_default_palette_of_default_style() {
        let config = PosterConfig::default();
        assert_eq!(config.palette, config.style.default_palette);
    }
}
