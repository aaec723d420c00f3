use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use crate::common::AnnotationBox;

/// Every field is optional and tolerates any JSON type: a value of the wrong
/// type reads as `None`. Entities are only checked when they are used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CocoImage {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub width: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CocoAnnotation {
    /// Only shown in the label, so any scalar is accepted.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub category_id: Option<i64>,
    /// Kept raw; interpreted by [`CocoAnnotation::bbox`] at render time.
    #[serde(default)]
    pub bbox: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CocoCategory {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// The three sections of a COCO annotation file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
    pub categories: Vec<CocoCategory>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl CocoImage {
    pub fn new(id: i64, file_name: &str) -> Self {
        Self {
            id: Some(id),
            file_name: Some(file_name.to_string()),
            ..Default::default()
        }
    }
}

impl CocoCategory {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }
}

impl CocoAnnotation {
    pub fn new(id: i64, image_id: i64, category_id: i64, bbox: [f32; 4]) -> Self {
        Self {
            id: Some(Value::from(id)),
            image_id: Some(image_id),
            category_id: Some(category_id),
            bbox: Value::from(bbox.to_vec()),
        }
    }

    pub fn bbox(&self) -> Result<AnnotationBox, String> {
        AnnotationBox::from_json(&self.bbox)
    }

    /// The annotation id as text; strings are used as-is, missing ids are empty.
    pub fn id_text(&self) -> String {
        match &self.id {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Label drawn in the tag above the box: `<category>#<id>`, without the
    /// separator when either side is empty.
    pub fn label(&self, category_name: Option<&str>) -> String {
        let name = match (category_name, self.category_id) {
            (Some(name), _) => name.to_string(),
            (None, Some(cid)) => cid.to_string(),
            (None, None) => String::new(),
        };

        format!("{}#{}", name, self.id_text()).trim_matches('#').to_string()
    }
}
