//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O.
//!
//! ## Styles
//!
//! ```text
//! 001 Minimal (minimal)
//!     Clean line work on a quiet ground
//!     Palettes: paper (default), ink, sand
//!     Fonts: Inter, Playfair Display, DM Serif Display
//! ```
//!
//! ## Resolution
//!
//! ```text
//! Print 300dpi
//!     Preset: 3600x5400 @ 300 dpi
//!     Format: ISO landscape
//!     Target: 5400x3818 (18.0 x 12.7 in)
//! ```
//!
//! ## Export
//!
//! ```text
//! 001 print → posters/kyoto-print.png (5400x3818)
//! 002 large → failed: Rasterization failed for preset 'large': ...
//!
//! Exported 1 of 2 presets
//! ```

use crate::export::{ExportError, PlannedExport};
use crate::poster::{PosterConfig, PosterPatch};
use crate::styles::PosterStyle;
use std::path::PathBuf;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn format_dims(width: u32, height: u32) -> String {
    format!("{}x{}", width, height)
}

fn format_coordinate(lng: f64, lat: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lng >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}°{} {:.4}°{}", lat.abs(), ns, lng.abs(), ew)
}

// ============================================================================
// Styles
// ============================================================================

pub fn format_styles(styles: &[PosterStyle]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, style) in styles.iter().enumerate() {
        lines.push(format!("{} {} ({})", format_index(i + 1), style.name, style.id));
        lines.push(format!("{}{}", indent(1), style.description));

        let palettes: Vec<String> = style
            .palettes
            .iter()
            .map(|p| {
                if p.id == style.default_palette.id {
                    format!("{} (default)", p.id)
                } else {
                    p.id.clone()
                }
            })
            .collect();
        lines.push(format!("{}Palettes: {}", indent(1), palettes.join(", ")));
        lines.push(format!(
            "{}Fonts: {}",
            indent(1),
            style.recommended_fonts.join(", ")
        ));
    }
    lines
}

pub fn print_styles(styles: &[PosterStyle]) {
    for line in format_styles(styles) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolution
// ============================================================================

pub fn format_plan(plan: &PlannedExport, poster: &PosterConfig) -> Vec<String> {
    let target = &plan.target;
    let (w_in, h_in) = target.print_size_inches();
    vec![
        target.name.clone(),
        format!(
            "{}Preset: {} @ {} dpi",
            indent(1),
            format_dims(plan.base.width, plan.base.height),
            plan.base.dpi
        ),
        format!(
            "{}Format: {} {}",
            indent(1),
            poster.format.aspect_ratio,
            poster.format.orientation
        ),
        format!(
            "{}Target: {} ({:.1} x {:.1} in)",
            indent(1),
            format_dims(target.width, target.height),
            w_in,
            h_in
        ),
    ]
}

pub fn print_plan(plan: &PlannedExport, poster: &PosterConfig) {
    for line in format_plan(plan, poster) {
        println!("{}", line);
    }
}

// ============================================================================
// Decoded share links
// ============================================================================

/// Summarize what a decoded share link restores. Absent fields are listed
/// so it is clear which values will come from defaults.
pub fn format_patch(patch: &PosterPatch) -> Vec<String> {
    let mut lines = Vec::new();
    let mut absent = Vec::new();

    if let Some(style) = patch.style {
        lines.push(format!("Style: {} ({})", style.name, style.id));
    }
    if let Some(palette) = &patch.palette {
        lines.push(format!("Palette: {} ({})", palette.name, palette.id));
    }
    match &patch.location {
        Some(location) => {
            lines.push(format!("Location: {}", location.name));
            if let Some(subtitle) = &location.subtitle {
                lines.push(format!("{}{}", indent(1), subtitle));
            }
            lines.push(format!(
                "{}{} @ z{}",
                indent(1),
                format_coordinate(location.longitude(), location.latitude()),
                location.zoom
            ));
        }
        None => absent.push("location"),
    }
    match &patch.format {
        Some(format) => lines.push(format!(
            "Format: {} {}, margin {}%",
            format.aspect_ratio, format.orientation, format.margin
        )),
        None => absent.push("format"),
    }
    match &patch.typography {
        Some(typography) => lines.push(format!(
            "Typography: {} {} / {} {}",
            typography.title_font,
            typography.title_size,
            typography.subtitle_font,
            typography.subtitle_size
        )),
        None => absent.push("typography"),
    }
    if patch.layers.is_none() {
        absent.push("layers");
    }
    if let Some(camera) = &patch.camera {
        let keys: Vec<&str> = camera.0.keys().map(String::as_str).collect();
        lines.push(format!("Camera: {}", keys.join(", ")));
    }

    if !absent.is_empty() {
        lines.push(format!("Defaults for: {}", absent.join(", ")));
    }
    lines
}

pub fn print_patch(patch: &PosterPatch) {
    for line in format_patch(patch) {
        println!("{}", line);
    }
}

// ============================================================================
// Export
// ============================================================================

/// Outcome of one preset in an export run.
pub struct ExportLine {
    pub preset: String,
    pub outcome: Result<(PathBuf, u32, u32), ExportError>,
}

pub fn format_export(results: &[ExportLine]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, line) in results.iter().enumerate() {
        let text = match &line.outcome {
            Ok((path, width, height)) => format!(
                "{} {} → {} ({})",
                format_index(i + 1),
                line.preset,
                path.display(),
                format_dims(*width, *height)
            ),
            Err(e) => format!("{} {} → failed: {}", format_index(i + 1), line.preset, e),
        };
        lines.push(text);
    }

    let ok = results.iter().filter(|l| l.outcome.is_ok()).count();
    lines.push(String::new());
    lines.push(format!("Exported {} of {} presets", ok, results.len()));
    lines
}

pub fn print_export(results: &[ExportLine]) {
    for line in format_export(results) {
        println!("{}", line);
    }
}
