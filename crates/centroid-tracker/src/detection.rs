use crate::BoundingBox;

/// Detection represents a bounding box detection in a single image.
///
/// Only the bounding box takes part in tracking. Confidence and class information pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box in corner format.
    bbox: BoundingBox,
    /// Detection confidence score.
    confidence: f32,
    /// Optional class identifier.
    class_id: Option<usize>,
    /// Optional class name.
    class_name: Option<String>,
}

impl Detection {
    /// Returns a new Detection
    ///
    /// # Parameters
    ///
    /// * `bbox`: A bounding box object.
    /// * `confidence`: Detection confidence score.
    /// * `class_id`: An optional class identifier.
    /// * `class_name`: An optional class name.
    pub fn new(
        bbox: BoundingBox,
        confidence: f32,
        class_id: Option<usize>,
        class_name: Option<String>,
    ) -> Detection {
        Detection {
            bbox,
            confidence,
            class_id,
            class_name,
        }
    }

    /// Returns a BoundingBox of the detection co-ordinates
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Returns the confidence of the detection
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Returns the class identifier of the detection
    pub fn class_id(&self) -> Option<usize> {
        self.class_id
    }

    /// Returns the class name of the detection
    pub fn class_name(&self) -> &Option<String> {
        &self.class_name
    }
}
