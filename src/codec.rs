//! Shareable poster links.
//!
//! A poster is shared as a compact [`ShareRecord`] serialized to JSON and
//! compressed with LZ-String's "encoded URI component" alphabet
//! (`A–Z a–z 0–9 + - $`), so the payload can sit in a query string or hash
//! fragment without escaping. Links produced by the web editor decode here
//! and vice versa.
//!
//! ## Wire record
//!
//! ```text
//! {
//!   "location":      { ... },           full Location
//!   "style":         "topographic",     style id (required)
//!   "palette":       "alpine",          palette id
//!   "typography":    { ... },
//!   "format":        { ... },
//!   "layers":        { ... },
//!   "customPalette": { ... },           only when palette == "ai-custom"
//!   "camera":        { ... }            only when the poster has one
//! }
//! ```
//!
//! Registry styles and palettes travel by id only. A palette generated at
//! runtime has no registry entry, so its colours are inlined under
//! `customPalette`.
//!
//! ## Failure policy
//!
//! [`encode_config`] and [`decode_config`] never fail loudly. Encoding
//! problems yield an empty string, decoding problems yield `None`, and both
//! are logged. Callers treat either as "nothing to share/restore" and fall
//! back to defaults.
//!
//! | Input | Result |
//! |---|---|
//! | empty / corrupt payload | `None` |
//! | invalid JSON | `None` |
//! | unknown style id | `None` |
//! | unknown palette id | style's default palette |
//! | section of the wrong shape | section left absent |
//! | unknown enum value in a section | that field's default |
//! | NaN / infinite number (encoding) | `""` |

use crate::poster::{
    CUSTOM_PALETTE_ID, Camera, Format, Layers, Location, Palette, PosterConfig, PosterPatch,
    RoadColors, Typography,
};
use crate::styles;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

/// Display name given to palettes rebuilt from inline colours.
pub const CUSTOM_PALETTE_NAME: &str = "AI Generated";
/// Classification given to palettes rebuilt from inline colours.
pub const CUSTOM_PALETTE_CLASS: &str = "custom";
/// Query/fragment key the payload is attached under.
pub const SHARE_PARAM: &str = "config";

/// Colours of a runtime-generated palette, carried inline in a share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlinePalette {
    pub background: String,
    pub text: String,
    pub water: String,
    pub water_line: String,
    pub green_space: String,
    pub buildings: String,
    pub landuse: String,
    pub roads: RoadColors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hillshade: Option<String>,
}

impl InlinePalette {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.background.clone(),
            text: palette.text.clone(),
            water: palette.water.clone(),
            water_line: palette.water_line.clone(),
            green_space: palette.green_space.clone(),
            buildings: palette.buildings.clone(),
            landuse: palette.landuse.clone(),
            roads: palette.roads.clone(),
            accent: palette.accent.clone(),
            contour: palette.contour.clone(),
            hillshade: palette.hillshade.clone(),
        }
    }

    /// Rebuild a full palette under the custom sentinel id.
    ///
    /// Inline data has no border colour; it is taken from the accent, or the
    /// text colour when there is no accent. The editor has always done this
    /// and existing links rely on it.
    pub fn into_palette(self) -> Palette {
        let border = self.accent.clone().unwrap_or_else(|| self.text.clone());
        Palette {
            id: CUSTOM_PALETTE_ID.to_string(),
            name: CUSTOM_PALETTE_NAME.to_string(),
            style: CUSTOM_PALETTE_CLASS.to_string(),
            background: self.background,
            text: self.text,
            border,
            roads: self.roads,
            water: self.water,
            water_line: self.water_line,
            green_space: self.green_space,
            landuse: self.landuse,
            buildings: self.buildings,
            accent: self.accent,
            contour: self.contour,
            contour_index: None,
            grid: None,
            hillshade: self.hillshade,
            primary: None,
            secondary: None,
            population: None,
            parks: None,
        }
    }
}

/// The compact record behind a share link.
///
/// Also the on-disk poster document format read by the CLI: any subset of
/// the optional keys may be given and the rest come from defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub style: String,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub layers: Option<Layers>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub custom_palette: Option<InlinePalette>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub camera: Option<Camera>,
}

/// A section that does not fit its type is dropped rather than failing the
/// whole record; the poster keeps its current value for it.
fn section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(section) => Ok(Some(section)),
        Err(e) => {
            debug!(error = %e, "dropping unreadable section of shared config");
            Ok(None)
        }
    }
}

impl ShareRecord {
    pub fn from_config(config: &PosterConfig) -> Self {
        let custom_palette = config
            .palette
            .is_custom()
            .then(|| InlinePalette::from_palette(&config.palette));

        Self {
            location: Some(config.location.clone()),
            style: config.style.id.to_string(),
            palette: Some(config.palette.id.clone()),
            typography: Some(config.typography.clone()),
            format: Some(config.format.clone()),
            layers: Some(config.layers.clone()),
            custom_palette,
            camera: config.camera.clone(),
        }
    }

    /// Resolve ids against the style registry.
    ///
    /// Returns `None` when the style id is unknown: palette and layer
    /// resolution both depend on the style, so nothing else is usable. An
    /// unknown palette id falls back to the style's default palette.
    pub fn resolve(self) -> Option<PosterPatch> {
        let Some(style) = styles::get_style_by_id(&self.style) else {
            warn!(style = %self.style, "shared config references unknown style");
            return None;
        };

        let palette = match (self.palette.as_deref(), self.custom_palette) {
            (Some(CUSTOM_PALETTE_ID), Some(inline)) => inline.into_palette(),
            (id, _) => match id.and_then(|id| style.palette(id)) {
                Some(palette) => palette.clone(),
                None => {
                    debug!(
                        style = style.id,
                        palette = id.unwrap_or_default(),
                        "palette not found, using style default"
                    );
                    style.default_palette.clone()
                }
            },
        };

        Some(PosterPatch {
            location: self.location,
            style: Some(style),
            palette: Some(palette),
            typography: self.typography,
            format: self.format,
            layers: self.layers,
            camera: self.camera,
        })
    }
}

/// Encode a poster into a URL-safe share payload.
///
/// Returns an empty string if the poster cannot be serialized. A NaN or
/// infinite number counts as unserializable: JSON would carry it as `null`
/// and the link could never be decoded.
pub fn encode_config(config: &PosterConfig) -> String {
    if let Some(field) = non_finite_field(config) {
        warn!(field, "poster has a non-finite number, not encoding");
        return String::new();
    }
    encode_record(&ShareRecord::from_config(config))
}

/// Name of the first numeric field that is NaN or infinite.
fn non_finite_field(config: &PosterConfig) -> Option<&'static str> {
    let location = &config.location;
    let typography = &config.typography;
    let format = &config.format;
    let layers = &config.layers;

    let [lng, lat] = location.center;
    let [[sw_lng, sw_lat], [ne_lng, ne_lat]] = location.bounds;
    let fields = [
        ("location.center", lng),
        ("location.center", lat),
        ("location.bounds", sw_lng),
        ("location.bounds", sw_lat),
        ("location.bounds", ne_lng),
        ("location.bounds", ne_lat),
        ("location.zoom", location.zoom),
        ("typography.titleSize", typography.title_size),
        ("typography.subtitleSize", typography.subtitle_size),
        ("typography.letterSpacing", typography.letter_spacing.unwrap_or(0.0)),
        ("typography.backdropHeight", typography.backdrop_height),
        ("typography.backdropAlpha", typography.backdrop_alpha),
        ("typography.maxWidth", typography.max_width.unwrap_or(0.0)),
        ("format.margin", format.margin),
        ("format.textureIntensity", format.texture_intensity.unwrap_or(0.0)),
        ("layers.contourDensity", layers.contour_density),
        ("layers.labelSize", layers.label_size),
        ("layers.labelMaxWidth", layers.label_max_width),
    ];
    fields
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
}

fn encode_record<T: Serialize>(record: &T) -> String {
    match serde_json::to_string(record) {
        Ok(json) => lz_str::compress_to_encoded_uri_component(json.as_str()),
        Err(e) => {
            warn!(error = %e, "failed to serialize poster config for sharing");
            String::new()
        }
    }
}

/// Decode a share payload into a partial poster.
///
/// Returns `None` for anything that cannot be restored; see the
/// [module docs](self) for the cases.
pub fn decode_config(encoded: &str) -> Option<PosterPatch> {
    let json = decompress(encoded)?;
    match serde_json::from_str::<ShareRecord>(&json) {
        Ok(record) => record.resolve(),
        Err(e) => {
            warn!(error = %e, "shared config is not a valid poster record");
            None
        }
    }
}

fn decompress(encoded: &str) -> Option<String> {
    if encoded.is_empty() {
        debug!("empty share payload");
        return None;
    }
    let Some(wide) = lz_str::decompress_from_encoded_uri_component(encoded) else {
        warn!(len = encoded.len(), "share payload failed to decompress");
        return None;
    };
    match String::from_utf16(&wide) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(error = %e, "share payload decompressed to invalid text");
            None
        }
    }
}

// ============================================================================
// Share URLs
// ============================================================================

/// Attach a payload to an editor URL as a hash fragment.
///
/// `share_url("https://example.com/editor", "N4Ig")` →
/// `"https://example.com/editor#config=N4Ig"`
pub fn share_url(base: &str, encoded: &str) -> String {
    let base = base.split('#').next().unwrap_or(base);
    format!("{base}#{SHARE_PARAM}={encoded}")
}

/// Pull a payload out of a share URL.
///
/// Accepts a full URL with the payload in the fragment (`#config=…`) or the
/// query (`?config=…`, `&config=…`), or a bare payload, which is returned
/// as-is.
pub fn extract_encoded(input: &str) -> &str {
    let input = input.trim();
    let key = format!("{SHARE_PARAM}=");
    for (start, _) in input.match_indices(&key) {
        if input[..start].ends_with(['#', '?', '&']) {
            let value = &input[start + key.len()..];
            let end = value.find(['&', '#']).unwrap_or(value.len());
            return &value[..end];
        }
    }
    input
}
