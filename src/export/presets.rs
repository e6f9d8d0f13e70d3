//! Stock export presets.
//!
//! Each preset's `height` is the long edge the calculator preserves; the
//! short edge is always re-derived from the poster's aspect ratio, so the
//! stored width only documents the 2:3 case.

use crate::poster::ExportResolution;

/// `(id, width, height, dpi, name)`
const STOCK: &[(&str, u32, u32, u32, &str)] = &[
    ("preview", 1200, 1800, 72, "Preview"),
    ("digital", 2400, 3600, 150, "Digital HD"),
    ("print", 3600, 5400, 300, "Print 300dpi"),
    ("large", 7200, 10800, 300, "Large Print"),
];

pub const DEFAULT_PRESET: &str = "print";

/// Stock presets in size order, keyed by id.
pub fn stock_presets() -> Vec<(String, ExportResolution)> {
    STOCK
        .iter()
        .map(|&(id, width, height, dpi, name)| {
            (id.to_string(), ExportResolution::new(width, height, dpi, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_is_stock() {
        assert!(stock_presets().iter().any(|(id, _)| id == DEFAULT_PRESET));
    }

    #[test]
    fn presets_are_two_three_portrait() {
        for (id, res) in stock_presets() {
            assert_eq!(res.width * 3, res.height * 2, "preset {id}");
        }
    }

    #[test]
    fn print_preset_is_300_dpi() {
        let (_, print) = stock_presets()
            .into_iter()
            .find(|(id, _)| id == "print")
            .unwrap();
        assert_eq!(print.dpi, 300);
        assert_eq!(print.name, "Print 300dpi");
    }
}
