mod utils;
mod overlay_processing;
pub mod common;
pub mod data;
pub mod error;
pub mod rendering;

use std::time::Instant;
use crate::common::OverlayConfig;
use crate::rendering::{OverlayViewer, SystemViewer};

pub use crate::error::OverlayError;
pub use crate::overlay_processing::{process_folder, RunSummary};
pub use crate::utils::{overlay_output_path, OVERLAY_SUFFIX};

pub type Result<T, E = OverlayError> = std::result::Result<T, E>;

/// Runs the overlay pipeline with the platform image viewer behind `--show`.
pub fn run(config: &OverlayConfig) -> Result<RunSummary> {
    run_with_viewer(config, &mut SystemViewer::new())
}

pub fn run_with_viewer(config: &OverlayConfig, viewer: &mut dyn OverlayViewer) -> Result<RunSummary> {
    let now = Instant::now();

    let summary = process_folder(config, viewer)?;

    log::info!(
        "Processed {} image(s), {} saved, {} missing, {} skipped in {:?}",
        summary.processed,
        summary.saved.len(),
        summary.missing.len(),
        summary.failed.len(),
        now.elapsed()
    );

    Ok(summary)
}
