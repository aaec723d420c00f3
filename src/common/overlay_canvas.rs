use std::path::Path;
use image::{DynamicImage, ImageFormat, RgbImage};
use crate::error::OverlayError;

/// A rendered overlay: the decoded image with boxes and labels drawn on it.
///
/// Owned by the caller, who decides whether to save, show or drop it.
#[derive(Debug, Clone, Default)]
pub struct OverlayCanvas {
    pub image: RgbImage,
    pub caption: String,
    pub bbox_count: usize,
}

impl std::ops::Deref for OverlayCanvas {
    type Target = RgbImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl std::ops::DerefMut for OverlayCanvas {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.image
    }
}

impl From<RgbImage> for OverlayCanvas {
    fn from(image: RgbImage) -> Self {
        Self {
            image,
            ..Default::default()
        }
    }
}

impl From<DynamicImage> for OverlayCanvas {
    fn from(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
            ..Default::default()
        }
    }
}

impl From<OverlayCanvas> for RgbImage {
    fn from(canvas: OverlayCanvas) -> Self {
        canvas.into_rgb8()
    }
}

impl OverlayCanvas {
    pub fn new(image: RgbImage) -> Self {
        Self::from(image)
    }

    /// Caption in the form `<file_name>  |  <n> bbox[es]`.
    pub fn caption_for(file_name: &str, bbox_count: usize) -> String {
        let plural = if bbox_count != 1 { "es" } else { "" };
        format!("{}  |  {} bbox{}", file_name, bbox_count, plural)
    }

    pub fn with_caption(mut self, file_name: &str, bbox_count: usize) -> Self {
        self.caption = Self::caption_for(file_name, bbox_count);
        self.bbox_count = bbox_count;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Writes the canvas as a PNG, pixel for pixel with no margin.
    pub fn save_png(&self, path: &Path) -> Result<(), OverlayError> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| OverlayError::render(path, e))
    }

    pub fn into_rgb8(self) -> RgbImage {
        self.image
    }
}
