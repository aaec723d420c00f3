mod annotation_box;
mod coco_types;
mod overlay_canvas;
mod overlay_config;

pub use annotation_box::*;
pub use coco_types::*;
pub use overlay_canvas::*;
pub use overlay_config::*;
