use std::fs;
use std::path::{Path, PathBuf};
use crate::error::OverlayError;
use crate::Result;

/// Names accepted as the annotation file when the folder holds several `.json` files.
pub const PREFERRED_NAMES: [&str; 2] = ["annotations.json", "coco.json"];

/// Finds exactly one COCO `.json` file in `folder` (non-recursive).
pub fn find_annotation_file(folder: &Path) -> Result<PathBuf> {
    let mut candidates = json_files(folder)?;

    match candidates.len() {
        0 => Err(OverlayError::NotFound(folder.to_path_buf())),
        1 => Ok(candidates.remove(0)),
        _ => {
            let mut preferred: Vec<&PathBuf> = candidates
                .iter()
                .filter(|p| file_name(p).is_some_and(|n| PREFERRED_NAMES.contains(&n)))
                .collect();

            if preferred.len() == 1 {
                let chosen = preferred.remove(0).clone();
                log::debug!("Several annotation candidates, using {}", chosen.display());
                return Ok(chosen);
            }

            Err(OverlayError::AmbiguousInput {
                candidates: candidates
                    .iter()
                    .filter_map(|p| file_name(p).map(str::to_string))
                    .collect(),
            })
        }
    }
}

fn json_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(folder).map_err(|e| OverlayError::io(folder, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| OverlayError::io(folder, e))?.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json && path.is_file() {
            files.push(path);
        }
    }

    // read_dir order is platform dependent
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
