//! Pure calculation functions for export dimensions.
//!
//! All functions here are pure and testable without any I/O or rendering.

use crate::poster::{AspectRatio, ExportResolution, Orientation};

/// Width-to-height ratio for an aspect ratio id.
///
/// Unrecognised ids fall back to a square ratio of `1.0` instead of failing:
/// an export must never hard-fail because of a legacy or malformed config.
///
/// # Examples
/// ```
/// # use map_poster::export::aspect_ratio_value;
/// # use map_poster::poster::AspectRatio;
/// assert_eq!(aspect_ratio_value(&AspectRatio::FourFive), 0.8);
/// assert_eq!(aspect_ratio_value(&AspectRatio::from("16:9")), 1.0);
/// ```
pub fn aspect_ratio_value(aspect: &AspectRatio) -> f64 {
    match aspect {
        AspectRatio::TwoThree => 2.0 / 3.0,
        AspectRatio::ThreeFour => 0.75,
        AspectRatio::FourFive => 0.8,
        AspectRatio::Square => 1.0,
        AspectRatio::Iso => std::f64::consts::FRAC_1_SQRT_2,
        AspectRatio::Other(_) => 1.0,
    }
}

/// Derive the pixel size to rasterize for a poster format.
///
/// `base.height` is the long-edge reference and is always preserved:
/// - Portrait: height stays `base.height`, width = `round(height × ratio)`
/// - Landscape: width becomes `base.height`, height = `round(width × ratio)`
///
/// `dpi` and `name` pass through unchanged. Total over its inputs.
///
/// # Examples
/// ```
/// # use map_poster::export::calculate_target_resolution;
/// # use map_poster::poster::{AspectRatio, ExportResolution, Orientation};
/// let base = ExportResolution::new(2400, 3600, 300, "Print");
///
/// let portrait = calculate_target_resolution(&base, &AspectRatio::TwoThree, Orientation::Portrait);
/// assert_eq!((portrait.width, portrait.height), (2400, 3600));
///
/// let landscape = calculate_target_resolution(&base, &AspectRatio::Square, Orientation::Landscape);
/// assert_eq!((landscape.width, landscape.height), (3600, 3600));
/// ```
pub fn calculate_target_resolution(
    base: &ExportResolution,
    aspect: &AspectRatio,
    orientation: Orientation,
) -> ExportResolution {
    let ratio = aspect_ratio_value(aspect);
    let long_edge = base.height;
    let short_edge = (long_edge as f64 * ratio).round() as u32;

    let (width, height) = match orientation {
        Orientation::Portrait => (short_edge, long_edge),
        Orientation::Landscape => (long_edge, short_edge),
    };

    ExportResolution {
        width,
        height,
        dpi: base.dpi,
        name: base.name.clone(),
    }
}

/// Pixel rectangle `(x, y, width, height)` inside a raster.
pub type PixelRect = (u32, u32, u32, u32);

/// Map area left after removing a margin, as a percentage of the poster width.
///
/// The same absolute margin is applied on all four sides, so the frame looks
/// even on every edge regardless of orientation. The margin is clamped so the
/// map area never collapses below one pixel.
pub fn calculate_map_area(width: u32, height: u32, margin_percent: f64) -> PixelRect {
    let margin = (width as f64 * margin_percent.max(0.0) / 100.0).round() as u32;
    let max_margin = (width.min(height).saturating_sub(1)) / 2;
    let margin = margin.min(max_margin);
    (
        margin,
        margin,
        width - 2 * margin,
        height - 2 * margin,
    )
}

/// Height in pixels of a text backdrop band given as a percentage of the
/// poster height, clamped to the raster.
pub fn calculate_band_height(height: u32, percent: f64) -> u32 {
    ((height as f64 * percent.clamp(0.0, 100.0) / 100.0).round() as u32).min(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ExportResolution {
        ExportResolution::new(2400, 3600, 300, "Print")
    }

    // =========================================================================
    // aspect_ratio_value tests
    // =========================================================================

    #[test]
    fn ratio_values_for_known_ids() {
        assert!((aspect_ratio_value(&AspectRatio::TwoThree) - 0.6667).abs() < 1e-4);
        assert_eq!(aspect_ratio_value(&AspectRatio::ThreeFour), 0.75);
        assert_eq!(aspect_ratio_value(&AspectRatio::FourFive), 0.8);
        assert_eq!(aspect_ratio_value(&AspectRatio::Square), 1.0);
        assert!((aspect_ratio_value(&AspectRatio::Iso) - 0.7071).abs() < 1e-4);
    }

    #[test]
    fn ratio_unknown_is_square() {
        assert_eq!(aspect_ratio_value(&AspectRatio::from("16:9")), 1.0);
        assert_eq!(aspect_ratio_value(&AspectRatio::from("")), 1.0);
    }

    // =========================================================================
    // calculate_target_resolution tests
    // =========================================================================

    #[test]
    fn portrait_two_three_is_unchanged() {
        let out = calculate_target_resolution(&base(), &AspectRatio::TwoThree, Orientation::Portrait);
        assert_eq!(out, base());
    }

    #[test]
    fn portrait_keeps_height_and_derives_width() {
        // 3600 * 0.8 = 2880
        let out = calculate_target_resolution(&base(), &AspectRatio::FourFive, Orientation::Portrait);
        assert_eq!((out.width, out.height), (2880, 3600));
    }

    #[test]
    fn portrait_iso_rounds_width() {
        // 3600 / sqrt(2) = 2545.58 → 2546
        let out = calculate_target_resolution(&base(), &AspectRatio::Iso, Orientation::Portrait);
        assert_eq!((out.width, out.height), (2546, 3600));
    }

    #[test]
    fn landscape_square_uses_height_for_both_edges() {
        let out = calculate_target_resolution(&base(), &AspectRatio::Square, Orientation::Landscape);
        assert_eq!((out.width, out.height), (3600, 3600));
    }

    #[test]
    fn landscape_swaps_long_edge_to_width() {
        // width = 3600, height = 3600 * 0.75 = 2700
        let out = calculate_target_resolution(&base(), &AspectRatio::ThreeFour, Orientation::Landscape);
        assert_eq!((out.width, out.height), (3600, 2700));
    }

    #[test]
    fn unknown_ratio_behaves_like_square() {
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            let unknown = calculate_target_resolution(&base(), &AspectRatio::from("21:9"), orientation);
            let square = calculate_target_resolution(&base(), &AspectRatio::Square, orientation);
            assert_eq!(unknown, square);
        }
    }

    #[test]
    fn base_width_is_ignored() {
        let odd = ExportResolution::new(1, 3600, 300, "Print");
        let out = calculate_target_resolution(&odd, &AspectRatio::FourFive, Orientation::Portrait);
        assert_eq!((out.width, out.height), (2880, 3600));
    }

    #[test]
    fn dpi_and_name_pass_through() {
        let base = ExportResolution::new(1200, 1800, 72, "Preview");
        let out = calculate_target_resolution(&base, &AspectRatio::Iso, Orientation::Landscape);
        assert_eq!(out.dpi, 72);
        assert_eq!(out.name, "Preview");
    }

    // =========================================================================
    // calculate_map_area / calculate_band_height tests
    // =========================================================================

    #[test]
    fn map_area_applies_even_margin() {
        // 5% of 2400 = 120 on every side
        assert_eq!(calculate_map_area(2400, 3600, 5.0), (120, 120, 2160, 3360));
    }

    #[test]
    fn map_area_zero_margin_is_full_raster() {
        assert_eq!(calculate_map_area(800, 600, 0.0), (0, 0, 800, 600));
    }

    #[test]
    fn map_area_never_collapses() {
        let (_, _, w, h) = calculate_map_area(100, 40, 90.0);
        assert!(w >= 1);
        assert!(h >= 1);
    }

    #[test]
    fn band_height_is_percentage_of_height() {
        assert_eq!(calculate_band_height(3600, 20.0), 720);
        assert_eq!(calculate_band_height(3600, 250.0), 3600);
        assert_eq!(calculate_band_height(3600, -5.0), 0);
    }
}
