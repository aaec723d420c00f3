use std::fs;
use std::path::Path;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use crate::common::AnnotationSet;
use crate::error::OverlayError;
use crate::Result;

pub const REQUIRED_SECTIONS: [&str; 3] = ["images", "annotations", "categories"];

/// Reads and parses a COCO annotation file.
pub fn load_annotation_set(path: &Path) -> Result<AnnotationSet> {
    let text = fs::read_to_string(path).map_err(|e| OverlayError::io(path, e))?;
    let root: Value = serde_json::from_str(&text).map_err(|source| OverlayError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let set = annotation_set_from_value(root)?;
    log::info!(
        "Loaded {}: {} images, {} annotations, {} categories",
        path.display(),
        set.images.len(),
        set.annotations.len(),
        set.categories.len()
    );
    Ok(set)
}

/// Checks that the three top-level sections exist and nothing else.
///
/// Entities are read leniently; a missing join key or a broken `bbox` only
/// shows up when the image is processed.
pub fn annotation_set_from_value(root: Value) -> Result<AnnotationSet> {
    let mut root = match root {
        Value::Object(map) => map,
        _ => return Err(OverlayError::Schema(REQUIRED_SECTIONS[0].to_string())),
    };

    for key in REQUIRED_SECTIONS {
        if !root.contains_key(key) {
            return Err(OverlayError::Schema(key.to_string()));
        }
    }

    Ok(AnnotationSet {
        images: take_section(&mut root, "images"),
        annotations: take_section(&mut root, "annotations"),
        categories: take_section(&mut root, "categories"),
    })
}

/// Entries that are not objects become empty entities; a section that is
/// not an array is read as empty.
fn take_section<T: DeserializeOwned + Default>(root: &mut Map<String, Value>, key: &str) -> Vec<T> {
    match root.remove(key) {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect(),
        other => {
            log::warn!("COCO '{}' section is not a list ({}), treating it as empty", key, other.unwrap_or(Value::Null));
            Vec::new()
        }
    }
}
