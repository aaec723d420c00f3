mod coco_index;
mod font_access;
mod loader;
mod locator;
mod palette;

pub use coco_index::CocoIndex;
pub use font_access::{load_label_font, FontAccess};
pub use loader::{annotation_set_from_value, load_annotation_set, REQUIRED_SECTIONS};
pub use locator::{find_annotation_file, PREFERRED_NAMES};
pub use palette::{parse_hex_colour, resolve_palette, ColourMap, DEFAULT_PALETTE, FALLBACK_COLOUR};
