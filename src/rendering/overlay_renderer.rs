use std::path::Path;
use ab_glyph::FontVec;
use image::RgbImage;
use crate::common::{AnnotationBox, CocoAnnotation, OverlayCanvas};
use crate::data::{CocoIndex, ColourMap};
use crate::error::OverlayError;
use crate::rendering::draw_ops::{draw_box_outline, draw_caption, draw_label_tag, stroke_width_px};
use crate::Result;

/// Draws annotation boxes and labels onto images.
///
/// Holds only shared read-only state; every call returns a fresh canvas.
pub struct OverlayRenderer<'a> {
    index: &'a CocoIndex,
    colours: &'a ColourMap,
    font: Option<&'a FontVec>,
    dpi: u32,
}

impl<'a> OverlayRenderer<'a> {
    pub fn new(index: &'a CocoIndex, colours: &'a ColourMap, font: Option<&'a FontVec>, dpi: u32) -> Self {
        Self {
            index,
            colours,
            font,
            dpi: dpi.max(1),
        }
    }

    /// Decodes `image_path` as RGB and draws `anns` over it, captioned with `file_name`.
    pub fn render(&self, image_path: &Path, file_name: &str, anns: &[CocoAnnotation]) -> Result<OverlayCanvas> {
        let image = image::open(image_path)
            .map_err(|e| OverlayError::render(image_path, e))?
            .to_rgb8();

        self.render_image(image, image_path, file_name, anns)
    }

    /// Draws onto an already decoded image. `source` only names the image in errors.
    ///
    /// The caption is drawn last, over the top edge, so the canvas keeps the
    /// image's own dimensions.
    pub fn render_image(
        &self,
        image: RgbImage,
        source: &Path,
        file_name: &str,
        anns: &[CocoAnnotation],
    ) -> Result<OverlayCanvas> {
        let boxes = anns
            .iter()
            .map(|ann| {
                ann.bbox().map(|b| (ann, b)).map_err(|reason| {
                    let id = Some(ann.id_text()).filter(|id| !id.is_empty()).unwrap_or("?".to_string());
                    OverlayError::render(source, format!("annotation {}: {}", id, reason))
                })
            })
            .collect::<Result<Vec<(&CocoAnnotation, AnnotationBox)>>>()?;

        let (width, height) = image.dimensions();
        let thickness = stroke_width_px(width, height, self.dpi);
        let mut canvas = OverlayCanvas::new(image);

        for (ann, bbox) in &boxes {
            let colour = self.colours.get_category_colour(ann.category_id);
            draw_box_outline(&mut canvas, bbox, colour, thickness);

            let label = ann.label(self.index.category_name(ann.category_id));
            draw_label_tag(&mut canvas, bbox, &label, colour, self.font, self.dpi);
        }

        let mut canvas = canvas.with_caption(file_name, anns.len());
        let caption = canvas.caption.clone();
        draw_caption(&mut canvas, &caption, self.font, self.dpi);

        Ok(canvas)
    }
}
