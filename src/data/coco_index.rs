use std::collections::HashMap;
use indexmap::IndexMap;
use crate::common::{AnnotationSet, CocoAnnotation, CocoCategory, CocoImage};

/// Lookups used to join annotations to images and categories.
///
/// Duplicate ids are not rejected: the later entity wins. For images the id
/// keeps the position of its first occurrence.
#[derive(Debug, Default, Clone)]
pub struct CocoIndex {
    /// Only images with both an integer `id` and a string `file_name`.
    pub images_by_id: IndexMap<i64, CocoImage>,
    pub anns_by_image: HashMap<i64, Vec<CocoAnnotation>>,
    pub categories_by_id: HashMap<i64, CocoCategory>,
    /// `(position in the images section, entry)` for images that cannot be joined.
    pub unindexed_images: Vec<(usize, CocoImage)>,
}

impl CocoIndex {
    pub fn build(set: &AnnotationSet) -> Self {
        let mut images_by_id = IndexMap::with_capacity(set.images.len());
        let mut unindexed_images = Vec::new();
        for (pos, img) in set.images.iter().enumerate() {
            match (img.id, &img.file_name) {
                (Some(id), Some(_)) => {
                    images_by_id.insert(id, img.clone());
                }
                _ => unindexed_images.push((pos, img.clone())),
            }
        }

        let mut anns_by_image: HashMap<i64, Vec<CocoAnnotation>> = HashMap::new();
        let mut orphans = 0;
        for ann in &set.annotations {
            match ann.image_id {
                Some(image_id) => anns_by_image.entry(image_id).or_default().push(ann.clone()),
                None => orphans += 1,
            }
        }
        if orphans > 0 {
            log::warn!("{} annotation(s) have no usable 'image_id' and are ignored", orphans);
        }

        let categories_by_id = set
            .categories
            .iter()
            .filter_map(|cat| cat.id.map(|id| (id, cat.clone())))
            .collect();

        Self {
            images_by_id,
            anns_by_image,
            categories_by_id,
            unindexed_images,
        }
    }

    pub fn annotations_for(&self, image_id: i64) -> &[CocoAnnotation] {
        self.anns_by_image
            .get(&image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `None` for unknown categories and for categories without a usable name.
    pub fn category_name(&self, category_id: Option<i64>) -> Option<&str> {
        category_id
            .and_then(|id| self.categories_by_id.get(&id))
            .and_then(|cat| cat.name.as_deref())
    }
}
