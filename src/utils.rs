use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const OVERLAY_SUFFIX: &str = "__overlay.png";

/// `<save_dir>/<stem of file_name>__overlay.png`
pub fn overlay_output_path(save_dir: &Path, file_name: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());

    save_dir.join(format!("{}{}", stem, OVERLAY_SUFFIX))
}

pub(crate) fn trace(l_type: &str, l_step: &str, start: Instant, prev_elapsed: Duration) -> Duration {
    log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, start.elapsed(), l_step, start.elapsed() - prev_elapsed);
    start.elapsed()
}
