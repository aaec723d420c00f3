use serde_json::Value;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct AnnotationBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl AnnotationBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Interprets a raw COCO `bbox` value, `[x, y, width, height]`.
    ///
    /// Returns a description of the defect when the value is not an array of
    /// exactly four numbers representable as finite `f32`.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let items = value
            .as_array()
            .ok_or_else(|| format!("bbox is not an array: {}", value))?;

        if items.len() != 4 {
            return Err(format!("bbox must have 4 values, got {}", items.len()));
        }

        let mut xywh = [0f32; 4];
        for (slot, item) in xywh.iter_mut().zip(items) {
            let v = item
                .as_f64()
                .ok_or_else(|| format!("bbox value is not numeric: {}", item))?;
            let v = v as f32;
            if !v.is_finite() {
                return Err(format!("bbox value out of range: {}", item));
            }
            *slot = v;
        }

        Ok(Self::new(xywh[0], xywh[1], xywh[2], xywh[3]))
    }

    /// Returns the maximum x-coordinate of the bounding box.
    pub fn x_max(&self) -> f32 {
        self.x + self.w
    }

    /// The maximum y-coordinate of the bounding box.
    pub fn y_max(&self) -> f32 {
        self.y + self.h
    }

    /// Integer `(x1, y1, x2, y2)` with every edge clamped to `[-margin, limit + margin]`.
    ///
    /// Edges far outside the canvas collapse onto the margin, so the result
    /// is safe for integer arithmetic.
    pub fn clamped_x1y1_x2y2(&self, width: u32, height: u32, margin: u32) -> (i32, i32, i32, i32) {
        let m = margin as f32;
        let clamp_x = |v: f32| v.clamp(-m, width as f32 + m).round() as i32;
        let clamp_y = |v: f32| v.clamp(-m, height as f32 + m).round() as i32;

        (clamp_x(self.x), clamp_y(self.y), clamp_x(self.x_max()), clamp_y(self.y_max()))
    }
}
