use std::collections::BTreeMap;
use std::collections::HashMap;
use image::Rgb;
use crate::common::CocoCategory;

/// Ten-colour cycle used when no palette is configured.
pub const DEFAULT_PALETTE: [Rgb<u8>; 10] = [
    Rgb([0x1f, 0x77, 0xb4]), // blue
    Rgb([0xff, 0x7f, 0x0e]), // orange
    Rgb([0x2c, 0xa0, 0x2c]), // green
    Rgb([0xd6, 0x27, 0x28]), // red
    Rgb([0x94, 0x67, 0xbd]), // purple
    Rgb([0x8c, 0x56, 0x4b]), // brown
    Rgb([0xe3, 0x77, 0xc2]), // pink
    Rgb([0x7f, 0x7f, 0x7f]), // grey
    Rgb([0xbc, 0xbd, 0x22]), // olive
    Rgb([0x17, 0xbe, 0xcf]), // cyan
];

/// Colour for annotations whose category is not in the map.
pub const FALLBACK_COLOUR: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColourMap {
    colours: BTreeMap<i64, Rgb<u8>>,
}

impl ColourMap {
    /// Walks the palette cyclically over the category ids in ascending order.
    pub fn build<'a>(category_ids: impl IntoIterator<Item = &'a i64>, palette: &[Rgb<u8>]) -> Self {
        let palette = if palette.is_empty() { &DEFAULT_PALETTE[..] } else { palette };

        let mut ids: Vec<i64> = category_ids.into_iter().copied().collect();
        ids.sort_unstable();
        ids.dedup();

        let colours = ids
            .into_iter()
            .zip(palette.iter().copied().cycle())
            .collect();

        Self { colours }
    }

    pub fn from_categories(categories_by_id: &HashMap<i64, CocoCategory>, palette: &[Rgb<u8>]) -> Self {
        Self::build(categories_by_id.keys(), palette)
    }

    pub fn get_category_colour(&self, category_id: Option<i64>) -> Rgb<u8> {
        category_id
            .and_then(|id| self.colours.get(&id).copied())
            .unwrap_or(FALLBACK_COLOUR)
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

/// Parses a comma-separated list of `#rrggbb` colours.
///
/// Any unreadable entry discards the whole list in favour of [`DEFAULT_PALETTE`].
pub fn resolve_palette(raw: Option<&str>) -> Vec<Rgb<u8>> {
    let Some(raw) = raw else {
        return DEFAULT_PALETTE.to_vec();
    };

    let parsed: Option<Vec<Rgb<u8>>> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_hex_colour)
        .collect();

    match parsed {
        Some(colours) if !colours.is_empty() => colours,
        _ => {
            log::warn!("Unusable palette '{}', using the default palette", raw);
            DEFAULT_PALETTE.to_vec()
        }
    }
}

pub fn parse_hex_colour(s: &str) -> Option<Rgb<u8>> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
