//! Static style registry.
//!
//! Every poster references one [`PosterStyle`]. Styles are built once, on
//! first access, into a process-wide table and are only ever handed out as
//! `&'static` references. There is no mutation API, so lookups need no
//! locking.
//!
//! | Style | Palettes |
//! |---|---|
//! | `minimal` | `paper` (default), `ink`, `sand` |
//! | `noir` | `midnight` (default), `charcoal` |
//! | `blueprint` | `classic` (default), `cyanotype` |
//! | `topographic` | `alpine` (default), `desert` |

use crate::poster::{Palette, RoadColors};
use std::sync::LazyLock;

/// One selectable layer toggle offered by a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerToggle {
    /// Name of the matching [`Layers`](crate::poster::Layers) field.
    pub key: &'static str,
    pub label: &'static str,
    pub default_enabled: bool,
}

/// A cartographic style: map rendering definition plus its palettes.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub thumbnail: &'static str,
    /// Vector-tile style document the map renderer loads.
    pub map_style: &'static str,
    pub default_palette: Palette,
    pub palettes: Vec<Palette>,
    pub recommended_fonts: Vec<&'static str>,
    pub layer_toggles: Vec<LayerToggle>,
}

impl PosterStyle {
    pub fn palette(&self, id: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.id == id)
    }
}

/// Look up a style by id.
pub fn get_style_by_id(id: &str) -> Option<&'static PosterStyle> {
    STYLES.iter().find(|s| s.id == id)
}

/// All registered styles, in display order.
pub fn all_styles() -> &'static [PosterStyle] {
    &STYLES
}

/// The style new posters start with.
pub fn default_style() -> &'static PosterStyle {
    &STYLES[0]
}

// ============================================================================
// Registry data
// ============================================================================

struct PaletteSeed {
    id: &'static str,
    name: &'static str,
    class: &'static str,
    background: &'static str,
    text: &'static str,
    border: &'static str,
    /// motorway → service
    roads: [&'static str; 7],
    water: &'static str,
    water_line: &'static str,
    green_space: &'static str,
    landuse: &'static str,
    buildings: &'static str,
    accent: Option<&'static str>,
    contour: Option<&'static str>,
    hillshade: Option<&'static str>,
}

impl PaletteSeed {
    fn build(&self) -> Palette {
        let [motorway, trunk, primary, secondary, tertiary, residential, service] = self.roads;
        Palette {
            id: self.id.to_string(),
            name: self.name.to_string(),
            style: self.class.to_string(),
            background: self.background.to_string(),
            text: self.text.to_string(),
            border: self.border.to_string(),
            roads: RoadColors {
                motorway: motorway.to_string(),
                trunk: trunk.to_string(),
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                tertiary: tertiary.to_string(),
                residential: residential.to_string(),
                service: service.to_string(),
            },
            water: self.water.to_string(),
            water_line: self.water_line.to_string(),
            green_space: self.green_space.to_string(),
            landuse: self.landuse.to_string(),
            buildings: self.buildings.to_string(),
            accent: self.accent.map(str::to_string),
            contour: self.contour.map(str::to_string),
            contour_index: None,
            grid: None,
            hillshade: self.hillshade.map(str::to_string),
            primary: None,
            secondary: None,
            population: None,
            parks: None,
        }
    }
}

const BASE_TOGGLES: &[(&str, &str, bool)] = &[
    ("streets", "Streets", true),
    ("water", "Water", true),
    ("parks", "Parks", true),
    ("buildings", "Buildings", false),
    ("labels", "Labels", false),
    ("marker", "Marker", false),
];

const TERRAIN_TOGGLES: &[(&str, &str, bool)] = &[
    ("terrain", "Terrain", true),
    ("contours", "Contours", true),
];

fn toggles(groups: &[&[(&'static str, &'static str, bool)]]) -> Vec<LayerToggle> {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .map(|&(key, label, default_enabled)| LayerToggle {
            key,
            label,
            default_enabled,
        })
        .collect()
}

fn style(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    fonts: &[&'static str],
    layer_toggles: Vec<LayerToggle>,
    seeds: &[PaletteSeed],
) -> PosterStyle {
    let palettes: Vec<Palette> = seeds.iter().map(PaletteSeed::build).collect();
    PosterStyle {
        id,
        name,
        description,
        thumbnail: THUMBNAILS
            .iter()
            .find(|(style_id, _)| *style_id == id)
            .map(|(_, path)| *path)
            .unwrap_or(""),
        map_style: MAP_STYLES
            .iter()
            .find(|(style_id, _)| *style_id == id)
            .map(|(_, url)| *url)
            .unwrap_or(""),
        default_palette: palettes[0].clone(),
        palettes,
        recommended_fonts: fonts.to_vec(),
        layer_toggles,
    }
}

const THUMBNAILS: &[(&str, &str)] = &[
    ("minimal", "/thumbnails/minimal.webp"),
    ("noir", "/thumbnails/noir.webp"),
    ("blueprint", "/thumbnails/blueprint.webp"),
    ("topographic", "/thumbnails/topographic.webp"),
];

const MAP_STYLES: &[(&str, &str)] = &[
    ("minimal", "/map-styles/minimal.json"),
    ("noir", "/map-styles/noir.json"),
    ("blueprint", "/map-styles/blueprint.json"),
    ("topographic", "/map-styles/topographic.json"),
];

static STYLES: LazyLock<Vec<PosterStyle>> = LazyLock::new(|| {
    vec![
        style(
            "minimal",
            "Minimal",
            "Clean line work on a quiet ground",
            &["Inter", "Playfair Display", "DM Serif Display"],
            toggles(&[BASE_TOGGLES]),
            &[
                PaletteSeed {
                    id: "paper",
                    name: "Paper",
                    class: "light",
                    background: "#f7f4ee",
                    text: "#1c1c1c",
                    border: "#1c1c1c",
                    roads: [
                        "#1c1c1c", "#2b2b2b", "#3a3a3a", "#545454", "#6e6e6e", "#8f8f8f",
                        "#b0b0b0",
                    ],
                    water: "#d8dde0",
                    water_line: "#b9c2c7",
                    green_space: "#e6e8dc",
                    landuse: "#efebe3",
                    buildings: "#e2ddd4",
                    accent: None,
                    contour: None,
                    hillshade: None,
                },
                PaletteSeed {
                    id: "ink",
                    name: "Ink",
                    class: "light",
                    background: "#ffffff",
                    text: "#0b1f3a",
                    border: "#0b1f3a",
                    roads: [
                        "#0b1f3a", "#16304f", "#224165", "#37587d", "#4f7196", "#7594b3",
                        "#a4bbd0",
                    ],
                    water: "#e4ecf4",
                    water_line: "#c3d3e4",
                    green_space: "#eef2ea",
                    landuse: "#f6f6f4",
                    buildings: "#ecedee",
                    accent: Some("#c0392b"),
                    contour: None,
                    hillshade: None,
                },
                PaletteSeed {
                    id: "sand",
                    name: "Sand",
                    class: "light",
                    background: "#efe4d2",
                    text: "#4a3b2a",
                    border: "#4a3b2a",
                    roads: [
                        "#4a3b2a", "#5a4935", "#6b5942", "#806d55", "#97856c", "#ad9d86",
                        "#c7bba8",
                    ],
                    water: "#cfd8d2",
                    water_line: "#b3c0b8",
                    green_space: "#dcdcc4",
                    landuse: "#e7dbc6",
                    buildings: "#ddd0b9",
                    accent: Some("#b5651d"),
                    contour: None,
                    hillshade: None,
                },
            ],
        ),
        style(
            "noir",
            "Noir",
            "Bright streets on a dark night sheet",
            &["Bebas Neue", "Oswald", "Inter"],
            toggles(&[BASE_TOGGLES]),
            &[
                PaletteSeed {
                    id: "midnight",
                    name: "Midnight",
                    class: "dark",
                    background: "#0d0f14",
                    text: "#f2f2f2",
                    border: "#f2f2f2",
                    roads: [
                        "#ffffff", "#e6e6e6", "#cccccc", "#a6a6a6", "#808080", "#5c5c5c",
                        "#3d3d3d",
                    ],
                    water: "#161b24",
                    water_line: "#232b38",
                    green_space: "#12161c",
                    landuse: "#101318",
                    buildings: "#1a1e26",
                    accent: Some("#f5c542"),
                    contour: None,
                    hillshade: None,
                },
                PaletteSeed {
                    id: "charcoal",
                    name: "Charcoal",
                    class: "dark",
                    background: "#232323",
                    text: "#e8e2d6",
                    border: "#e8e2d6",
                    roads: [
                        "#e8e2d6", "#d4cec2", "#bdb7ab", "#9d978c", "#7d786e", "#5f5a52",
                        "#45413b",
                    ],
                    water: "#2c2f33",
                    water_line: "#3a3e43",
                    green_space: "#272a26",
                    landuse: "#262626",
                    buildings: "#2e2e2e",
                    accent: None,
                    contour: None,
                    hillshade: None,
                },
            ],
        ),
        style(
            "blueprint",
            "Blueprint",
            "Drafting-table white lines on engineering blue",
            &["IBM Plex Mono", "Space Grotesk"],
            toggles(&[BASE_TOGGLES]),
            &[
                PaletteSeed {
                    id: "classic",
                    name: "Classic",
                    class: "dark",
                    background: "#1d3f73",
                    text: "#eaf2ff",
                    border: "#eaf2ff",
                    roads: [
                        "#ffffff", "#f0f5ff", "#dce8fb", "#c3d6f2", "#a6c0e6", "#88a8d6",
                        "#6a8fc4",
                    ],
                    water: "#17335e",
                    water_line: "#3c5f94",
                    green_space: "#1f4478",
                    landuse: "#1b3b6c",
                    buildings: "#24497f",
                    accent: None,
                    contour: None,
                    hillshade: None,
                },
                PaletteSeed {
                    id: "cyanotype",
                    name: "Cyanotype",
                    class: "dark",
                    background: "#0f4c81",
                    text: "#f4f9ff",
                    border: "#f4f9ff",
                    roads: [
                        "#f4f9ff", "#e1eefa", "#c9e0f5", "#a9cbeb", "#87b4de", "#6a9fd2",
                        "#4f8bc4",
                    ],
                    water: "#0b3d69",
                    water_line: "#2d6aa3",
                    green_space: "#125489",
                    landuse: "#0e4a7d",
                    buildings: "#175a93",
                    accent: Some("#ffd166"),
                    contour: None,
                    hillshade: None,
                },
            ],
        ),
        style(
            "topographic",
            "Topographic",
            "Relief shading and contour lines for mountain places",
            &["Libre Baskerville", "Montserrat", "Inter"],
            toggles(&[BASE_TOGGLES, TERRAIN_TOGGLES]),
            &[
                PaletteSeed {
                    id: "alpine",
                    name: "Alpine",
                    class: "light",
                    background: "#f4f1e8",
                    text: "#2f3b2f",
                    border: "#2f3b2f",
                    roads: [
                        "#7a2e1f", "#8c3a28", "#9e4a36", "#a86a55", "#b48a78", "#c4a89a",
                        "#d6c6bc",
                    ],
                    water: "#bfd8e6",
                    water_line: "#8db6cc",
                    green_space: "#d3e2c3",
                    landuse: "#ece7d8",
                    buildings: "#ddd6c5",
                    accent: Some("#7a2e1f"),
                    contour: Some("#b59b75"),
                    hillshade: Some("#5b5347"),
                },
                PaletteSeed {
                    id: "desert",
                    name: "Desert",
                    class: "light",
                    background: "#f3e6cf",
                    text: "#5a3d22",
                    border: "#5a3d22",
                    roads: [
                        "#5a3d22", "#6b4a2b", "#7d5a37", "#926f4b", "#a88661", "#be9f7c",
                        "#d3b99a",
                    ],
                    water: "#b7d0d1",
                    water_line: "#8fb3b5",
                    green_space: "#d9d7b3",
                    landuse: "#eddcbf",
                    buildings: "#e2cfae",
                    accent: None,
                    contour: Some("#c29a6b"),
                    hillshade: Some("#6e5434"),
                },
            ],
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_finds_registered_style() {
        let style = get_style_by_id("blueprint").unwrap();
        assert_eq!(style.name, "Blueprint");
    }

    #[test]
    fn lookup_unknown_style_is_none() {
        assert!(get_style_by_id("vaporwave").is_none());
        assert!(get_style_by_id("").is_none());
    }

    #[test]
    fn lookup_returns_the_shared_instance() {
        let a = get_style_by_id("noir").unwrap();
        let b = get_style_by_id("noir").unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn style_ids_are_unique() {
        let ids: HashSet<&str> = all_styles().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), all_styles().len());
    }

    #[test]
    fn default_palette_is_one_of_the_palettes() {
        for style in all_styles() {
            assert!(
                style.palettes.contains(&style.default_palette),
                "{} default palette not in its palette list",
                style.id
            );
        }
    }

    #[test]
    fn palette_ids_unique_within_style() {
        for style in all_styles() {
            let ids: HashSet<&str> = style.palettes.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids.len(), style.palettes.len(), "style {}", style.id);
        }
    }

    #[test]
    fn no_registry_palette_uses_custom_sentinel() {
        for style in all_styles() {
            assert!(style.palettes.iter().all(|p| !p.is_custom()));
        }
    }

    #[test]
    fn every_style_has_thumbnail_and_map_style() {
        for style in all_styles() {
            assert!(!style.thumbnail.is_empty(), "{}", style.id);
            assert!(!style.map_style.is_empty(), "{}", style.id);
        }
    }

    #[test]
    fn topographic_offers_terrain_toggles() {
        let style = get_style_by_id("topographic").unwrap();
        let keys: Vec<&str> = style.layer_toggles.iter().map(|t| t.key).collect();
        assert!(keys.contains(&"terrain"));
        assert!(keys.contains(&"contours"));
        assert!(style.default_palette.contour.is_some());
    }

    #[test]
    fn palette_lookup_within_style() {
        let style = get_style_by_id("minimal").unwrap();
        assert_eq!(style.palette("ink").unwrap().name, "Ink");
        assert!(style.palette("midnight").is_none());
    }
}
