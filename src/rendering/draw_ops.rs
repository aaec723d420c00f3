//! Drawing primitives for overlays.

use ab_glyph::{Font, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use crate::common::AnnotationBox;

pub const POINTS_PER_INCH: f32 = 72.0;
pub const TAG_HEIGHT: f32 = 18.0;
pub const TAG_MIN_WIDTH: f32 = 40.0;
pub const TAG_CHAR_WIDTH: f32 = 7.0;
pub const TAG_ALPHA: f32 = 0.8;
pub const LABEL_FONT_PT: f32 = 9.0;
pub const LABEL_COLOUR: Rgb<u8> = Rgb([0, 0, 0]);
pub const CAPTION_FONT_PT: f32 = 10.0;
pub const CAPTION_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Converts a size in points to pixels at `dpi`.
pub fn points_to_px(points: f32, dpi: u32) -> f32 {
    points * dpi as f32 / POINTS_PER_INCH
}

/// Outline width in pixels: 0.2% of the short image side, never under 1.5pt.
pub fn stroke_width_px(img_width: u32, img_height: u32, dpi: u32) -> u32 {
    let points = (img_width.min(img_height) as f32 * 0.002).max(1.5);
    (points_to_px(points, dpi).round() as u32).max(1)
}

/// Draws a hollow rectangle `thickness` pixels wide, centred on the box edge.
pub fn draw_box_outline(canvas: &mut RgbImage, bbox: &AnnotationBox, colour: Rgb<u8>, thickness: u32) {
    let (width, height) = canvas.dimensions();
    let (x, y, x2, y2) = bbox.clamped_x1y1_x2y2(width, height, thickness);
    let (w, h) = (x2 - x, y2 - y);
    let half = thickness as i32 / 2;

    for i in 0..thickness as i32 {
        let inset = i - half;
        let (rw, rh) = (w - 2 * inset, h - 2 * inset);
        if rw <= 0 || rh <= 0 {
            continue;
        }
        let rect = Rect::at(x + inset, y + inset).of_size(rw as u32, rh as u32);
        draw_hollow_rect_mut(canvas, rect, colour);
    }
}

/// Fills a rectangle with `colour` at `alpha` opacity, clipped to the canvas.
pub fn blend_filled_rect(canvas: &mut RgbImage, left: i32, top: i32, width: u32, height: u32, colour: Rgb<u8>, alpha: f32) {
    let (cw, ch) = canvas.dimensions();
    let x0 = left.max(0) as u32;
    let y0 = top.max(0) as u32;
    let x1 = (left.saturating_add(width as i32)).clamp(0, cw as i32) as u32;
    let y1 = (top.saturating_add(height as i32)).clamp(0, ch as i32) as u32;

    for py in y0..y1 {
        for px in x0..x1 {
            let pixel = canvas.get_pixel_mut(px, py);
            for c in 0..3 {
                let blended = alpha * colour.0[c] as f32 + (1.0 - alpha) * pixel.0[c] as f32;
                pixel.0[c] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Draws the label tag above the box's top-left corner, kept inside the top edge.
pub fn draw_label_tag<F: Font>(
    canvas: &mut RgbImage,
    bbox: &AnnotationBox,
    label: &str,
    colour: Rgb<u8>,
    font: Option<&F>,
    dpi: u32,
) {
    let scale = PxScale::from(points_to_px(LABEL_FONT_PT, dpi));
    let (text_w, text_h) = match font {
        Some(font) if !label.is_empty() => text_size(scale, font, label),
        _ => (0, 0),
    };

    let tag_w = TAG_MIN_WIDTH
        .max(label.chars().count() as f32 * TAG_CHAR_WIDTH)
        .max(text_w as f32 + 8.0);

    // far off-canvas anchors collapse to just outside the edge
    let (cw, ch) = canvas.dimensions();
    let x = bbox.x.clamp(-(tag_w + 8.0), cw as f32).round();
    let y = bbox.y.clamp(-TAG_HEIGHT, ch as f32 + TAG_HEIGHT + text_h as f32);
    let tag_top = (y - TAG_HEIGHT).max(0.0);

    blend_filled_rect(
        canvas,
        x as i32,
        tag_top.round() as i32,
        tag_w.round() as u32,
        TAG_HEIGHT as u32,
        colour,
        TAG_ALPHA,
    );

    if let Some(font) = font {
        if !label.is_empty() {
            let centre_y = (y - 4.0).max(12.0);
            let text_top = (centre_y - text_h as f32 / 2.0).round() as i32;
            draw_text_mut(canvas, LABEL_COLOUR, x as i32 + 4, text_top, scale, font, label);
        }
    }
}

/// Draws the caption centred along the top edge, inside the canvas.
pub fn draw_caption<F: Font>(canvas: &mut RgbImage, caption: &str, font: Option<&F>, dpi: u32) {
    if caption.is_empty() {
        return;
    }

    let scale = PxScale::from(points_to_px(CAPTION_FONT_PT, dpi));
    let (text_w, text_h) = match font {
        Some(font) => text_size(scale, font, caption),
        None => (0, 0),
    };

    let (cw, _) = canvas.dimensions();
    let band_w = (caption.chars().count() as u32 * TAG_CHAR_WIDTH as u32)
        .max(text_w + 8)
        .min(cw);
    let band_h = (TAG_HEIGHT as u32).max(text_h + 4);
    let left = ((cw - band_w) / 2) as i32;

    blend_filled_rect(canvas, left, 0, band_w, band_h, CAPTION_BACKGROUND, TAG_ALPHA);

    if let Some(font) = font {
        let text_left = (cw as i32 - text_w as i32) / 2;
        let text_top = (band_h as i32 - text_h as i32) / 2;
        draw_text_mut(canvas, LABEL_COLOUR, text_left, text_top, scale, font, caption);
    }
}
