use std::collections::BTreeMap;

use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::SeriesKey;

// ---------------------------------------------------------------------------
// Base palette
// ---------------------------------------------------------------------------

/// Qualitative palette for category base colours (plotly's default
/// sequence). Categories past the end wrap around.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (0x63, 0x6e, 0xfa),
    (0xef, 0x55, 0x3b),
    (0x00, 0xcc, 0x96),
    (0xab, 0x63, 0xfa),
    (0xff, 0xa1, 0x5a),
    (0x19, 0xd3, 0xf3),
    (0xff, 0x66, 0x92),
    (0xb6, 0xe8, 0x80),
    (0xff, 0x97, 0xff),
    (0xfe, 0xcb, 0x52),
];

/// Base colour of the `ordinal`-th category.
pub fn category_color(ordinal: usize) -> Srgb<u8> {
    let (r, g, b) = PALETTE[ordinal % PALETTE.len()];
    Srgb::new(r, g, b)
}

// ---------------------------------------------------------------------------
// Shades
// ---------------------------------------------------------------------------

/// `n` increasingly light shades of `base`, none of them `base` itself.
///
/// Mixes toward white in linear light at `t = i / (n + 1)` for `i = 1..=n`,
/// so a single shade sits half way and none reaches pure white.
pub fn shades(base: Srgb<u8>, n: usize) -> Vec<Srgb<u8>> {
    let base: LinSrgb<f32> = base.into_format::<f32>().into_linear();
    let white = LinSrgb::new(1.0f32, 1.0, 1.0);
    let steps = (n + 1) as f32;

    (1..=n)
        .map(|i| {
            let mixed = base.mix(white, i as f32 / steps);
            Srgb::<f32>::from_linear(mixed).into_format::<u8>()
        })
        .collect()
}

/// Format a colour as `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Colour mapping: series → shade
// ---------------------------------------------------------------------------

/// Colour assignment for one chart: a base colour per category and a shade
/// of it per (category, subcategory) series.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    categories: Vec<(String, Srgb<u8>)>,
    series: BTreeMap<SeriesKey, Srgb<u8>>,
}

impl ColorMap {
    /// Build the map from categories in display order, each with its
    /// subcategories in display order.
    pub fn new(groups: &[(String, Vec<String>)]) -> Self {
        let mut categories = Vec::with_capacity(groups.len());
        let mut series = BTreeMap::new();

        for (ordinal, (category, subcategories)) in groups.iter().enumerate() {
            let base = category_color(ordinal);
            categories.push((category.clone(), base));
            for (subcategory, shade) in subcategories.iter().zip(shades(base, subcategories.len())) {
                let key = SeriesKey {
                    category: category.clone(),
                    subcategory: subcategory.clone(),
                };
                series.insert(key, shade);
            }
        }

        if groups.len() > PALETTE.len() {
            log::debug!(
                "{} categories share a {}-colour palette",
                groups.len(),
                PALETTE.len()
            );
        }

        ColorMap { categories, series }
    }

    pub fn color_for(&self, key: &SeriesKey) -> Option<Srgb<u8>> {
        self.series.get(key).copied()
    }

    pub fn base_for(&self, category: &str) -> Option<Srgb<u8>> {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, color)| *color)
    }

    /// Legend entries (category → base colour) in display order.
    pub fn legend_entries(&self) -> &[(String, Srgb<u8>)] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn luminance_sum(c: Srgb<u8>) -> u32 {
        c.red as u32 + c.green as u32 + c.blue as u32
    }

    #[test]
    fn category_colors_wrap_around() {
        assert_eq!(category_color(0), category_color(PALETTE.len()));
        assert_ne!(category_color(0), category_color(1));
    }

    #[test]
    fn palette_entries_are_distinct() {
        let unique: HashSet<_> = PALETTE.iter().collect();
        assert_eq!(unique.len(), PALETTE.len());
    }

    #[test]
    fn single_shade_is_lighter_than_base() {
        let base = category_color(0);
        let s = shades(base, 1);
        assert_eq!(s.len(), 1);
        assert_ne!(s[0], base);
        assert!(luminance_sum(s[0]) > luminance_sum(base));
        assert_ne!(s[0], Srgb::new(255, 255, 255));
    }

    #[test]
    fn shades_get_lighter_and_stay_distinct() {
        let base = category_color(1);
        let s = shades(base, 6);
        assert_eq!(s.len(), 6);
        for pair in s.windows(2) {
            assert!(luminance_sum(pair[1]) > luminance_sum(pair[0]));
        }
        assert!(!s.contains(&base));
    }

    #[test]
    fn zero_shades_is_empty() {
        assert!(shades(category_color(0), 0).is_empty());
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex(Srgb::new(0x63, 0x6e, 0xfa)), "#636efa");
        assert_eq!(to_hex(Srgb::new(0, 0, 0)), "#000000");
    }

    #[test]
    fn color_map_assigns_shades_per_category() {
        let groups = vec![
            ("Toys".to_string(), vec!["Online".to_string(), "Retail".to_string()]),
            ("Books".to_string(), vec!["Online".to_string()]),
        ];
        let map = ColorMap::new(&groups);
        let key = |c: &str, s: &str| SeriesKey {
            category: c.into(),
            subcategory: s.into(),
        };

        let toys_online = map.color_for(&key("Toys", "Online")).unwrap();
        let toys_retail = map.color_for(&key("Toys", "Retail")).unwrap();
        let books_online = map.color_for(&key("Books", "Online")).unwrap();

        assert_ne!(toys_online, toys_retail);
        assert_ne!(toys_online, books_online);
        assert_eq!(map.base_for("Toys"), Some(category_color(0)));
        assert_eq!(map.base_for("Books"), Some(category_color(1)));
        assert_eq!(map.legend_entries().len(), 2);
        assert!(map.color_for(&key("Books", "Retail")).is_none());
    }
}
