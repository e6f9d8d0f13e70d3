//! File names for exported posters.
//!
//! Exports are named `<location-slug>-<preset-slug>.png`:
//! - `"Lisbon"`, `print` → `lisbon-print.png`
//! - `"São Paulo"`, `large` → `sao-paulo-large.png`
//! - `"New York City"`, `Digital HD` → `new-york-city-digital-hd.png`
//!
//! Slugs are lowercase ASCII. Names are NFKD-decomposed and the combining
//! marks dropped, so accented letters fold to their base letter; the few
//! letters Unicode does not decompose (`ß`, `æ`, `ø`, `đ`, ...) go through a
//! small table. Every other run of non-alphanumerics becomes a single dash.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fallback slug when nothing usable survives folding.
const EMPTY_SLUG: &str = "poster";

/// Latin letters with no canonical decomposition.
fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'ı' => "i",
        'þ' => "th",
        _ => return None,
    };
    Some(folded)
}

/// Turn a display name into a lowercase, dash-separated ASCII slug.
///
/// - `"São Paulo"` → `"sao-paulo"`
/// - `"  Rio -- de Janeiro! "` → `"rio-de-janeiro"`
/// - `"東京"` → `"poster"`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    let letters = name
        .nfkd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c));

    for c in letters {
        let piece = if c.is_ascii_alphanumeric() {
            Some(c.to_string())
        } else {
            fold_char(c).map(str::to_string)
        };

        match piece {
            Some(piece) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push_str(&piece);
            }
            None => pending_dash = true,
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// File name for a poster export.
pub fn export_file_name(location_name: &str, preset: &str) -> String {
    format!("{}-{}.png", slugify(location_name), slugify(preset))
}
