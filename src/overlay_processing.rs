use std::path::PathBuf;
use std::time::Instant;
use crate::common::{CocoImage, OverlayConfig};
use crate::data::{find_annotation_file, load_annotation_set, load_label_font, resolve_palette, CocoIndex, ColourMap};
use crate::error::OverlayError;
use crate::rendering::{OverlayRenderer, OverlayViewer};
use crate::{utils, Result};

/// What happened to the images of one run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub processed: usize,
    pub saved: Vec<PathBuf>,
    /// `file_name`s listed in the annotation file but absent from the folder.
    pub missing: Vec<String>,
    /// `(file_name, reason)` for images that could not be rendered or written.
    pub failed: Vec<(String, String)>,
}

impl RunSummary {
    /// The end-of-run warning lines, in the order they are logged.
    pub fn warnings(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.missing.is_empty() {
            lines.push("The following image files listed in COCO were not found in the folder:".to_string());
            lines.extend(self.missing.iter().map(|name| format!("  - {}", name)));
        }

        if !self.failed.is_empty() {
            lines.push("The following images were skipped:".to_string());
            lines.extend(self.failed.iter().map(|(name, reason)| format!("  - {}: {}", name, reason)));
        }

        if self.processed == 0 {
            lines.push("No images were processed. Check your --subset filter or that image files exist.".to_string());
        }

        lines
    }

    pub fn report(&self) {
        for line in self.warnings() {
            log::warn!("{}", line);
        }
    }
}

/// Runs the whole pipeline over `config.folder`.
///
/// Errors are returned only for problems that prevent the run from starting;
/// per-image problems end up in the [`RunSummary`].
pub fn process_folder(config: &OverlayConfig, viewer: &mut dyn OverlayViewer) -> Result<RunSummary> {
    if !config.folder.is_dir() {
        return Err(OverlayError::Input(config.folder.clone()));
    }
    log::debug!("Overlay configuration:\n{}", config);

    let coco_path = find_annotation_file(&config.folder)?;
    let coco = load_annotation_set(&coco_path)?;
    let index = CocoIndex::build(&coco);
    let palette = resolve_palette(config.palette.as_deref());
    let colours = ColourMap::from_categories(&index.categories_by_id, &palette);

    if let Some(save_dir) = &config.save_dir {
        std::fs::create_dir_all(save_dir).map_err(|e| OverlayError::io(save_dir, e))?;
    }

    let font = if config.wants_output() {
        load_label_font(config.font_path.as_deref())
    } else {
        log::info!("Neither --show nor --save given; images are checked but not rendered");
        None
    };
    let renderer = OverlayRenderer::new(&index, &colours, font.as_ref(), config.dpi);

    let mut summary = RunSummary::default();
    for (pos, img) in &index.unindexed_images {
        if let Some((name, reason)) = unusable_image(config, *pos, img) {
            log::warn!("Skipping {}: {}", name, reason);
            summary.failed.push((name, reason));
        }
    }

    for (&image_id, img) in &index.images_by_id {
        let Some(file_name) = img.file_name.as_deref() else {
            continue;
        };
        if !config.is_selected(file_name) {
            continue;
        }

        let img_path = config.folder.join(file_name);
        if !img_path.exists() {
            summary.missing.push(file_name.to_string());
            continue;
        }

        match process_image(config, &renderer, &index, image_id, file_name, img_path, viewer) {
            Ok(saved) => {
                summary.saved.extend(saved);
                summary.processed += 1;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("Skipping {}: {}", file_name, e);
                summary.failed.push((file_name.to_string(), e.to_string()));
            }
        }
    }

    summary.report();
    Ok(summary)
}

/// Names an image entry that lacks a join key and says which key is missing.
///
/// Entries filtered out by `--subset` are not reported.
fn unusable_image(config: &OverlayConfig, pos: usize, img: &CocoImage) -> Option<(String, String)> {
    let name = match img.file_name.as_deref() {
        Some(file_name) if !config.is_selected(file_name) => return None,
        Some(file_name) => file_name.to_string(),
        None if config.subset.is_some() => return None,
        None => format!("images[{}]", pos),
    };

    let key = if img.file_name.is_none() { "file_name" } else { "id" };
    Some((name, format!("image entry has no usable '{}'", key)))
}

/// Renders one image and routes the canvas. The canvas is dropped on return.
fn process_image(
    config: &OverlayConfig,
    renderer: &OverlayRenderer,
    index: &CocoIndex,
    image_id: i64,
    file_name: &str,
    img_path: PathBuf,
    viewer: &mut dyn OverlayViewer,
) -> Result<Option<PathBuf>> {
    if !config.wants_output() {
        return Ok(None);
    }

    let start = Instant::now();
    let anns = index.annotations_for(image_id);
    let canvas = renderer.render(&img_path, file_name, anns)?;
    let elapsed = utils::trace("TIME", "Render", start, start.elapsed());

    let mut saved = None;
    if let Some(save_dir) = &config.save_dir {
        let out_path = utils::overlay_output_path(save_dir, file_name);
        canvas.save_png(&out_path)?;
        println!("Saved: {}", out_path.display());
        saved = Some(out_path);
    }
    let elapsed = utils::trace("TIME", "Save", start, elapsed);

    if config.show {
        if let Err(e) = viewer.show(&canvas) {
            log::warn!("Could not display {}: {}", file_name, e);
        }
        utils::trace("TIME", "Show", start, elapsed);
    }

    Ok(saved)
}
