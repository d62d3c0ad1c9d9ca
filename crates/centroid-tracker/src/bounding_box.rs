use crate::{Centroid, TrackerError};
use ndarray::*;

/// BoundingBox represents the bounding box of a detection in corner format.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Left of the bounding box (i.e. min-x)
    x1: f32,
    /// Top of the bounding box (i.e. min-y)
    y1: f32,
    /// Right of the bounding box (i.e. max-x)
    x2: f32,
    /// Bottom of the bounding box (i.e. max-y)
    y2: f32,
}

impl PartialEq for BoundingBox {
    fn eq(&self, other: &Self) -> bool {
        self.x1 == other.x1 && self.y1 == other.y1 && self.x2 == other.x2 && self.y2 == other.y2
    }
}

impl BoundingBox {
    /// Returns a new BoundingBox
    ///
    /// The coordinates are taken as given. Use [`BoundingBox::validate`] to reject inverted boxes.
    ///
    /// # Parameters
    ///
    /// * `x1`: Bounding box left.
    /// * `y1`: Bounding box top.
    /// * `x2`: Bounding box right.
    /// * `y2`: Bounding box bottom.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> BoundingBox {
        BoundingBox { x1, y1, x2, y2 }
    }

    /// Returns a new BoundingBox from left, top, width, height.
    pub fn from_tlwh(x: f32, y: f32, width: f32, height: f32) -> BoundingBox {
        BoundingBox::new(x, y, x + width, y + height)
    }

    /// Returns the x1 of the bounding box
    pub fn x1(&self) -> f32 {
        self.x1
    }

    /// Returns the y1 of the bounding box
    pub fn y1(&self) -> f32 {
        self.y1
    }

    /// Returns the x2 of the bounding box
    pub fn x2(&self) -> f32 {
        self.x2
    }

    /// Returns the y2 of the bounding box
    pub fn y2(&self) -> f32 {
        self.y2
    }

    /// Returns the width of the bounding box
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the height of the bounding box
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Returns the area of the bounding box
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns the unrounded centre of the bounding box as `(x, y)`.
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Returns the integer centroid of the bounding box.
    ///
    /// Each midpoint is truncated toward zero, never rounded, so identical boxes always produce identical centroids.
    pub fn centroid(&self) -> Centroid {
        let (x, y) = self.center();
        Centroid::new(x.trunc() as i64, y.trunc() as i64)
    }

    /// Returns the bounding box in left, top, width, height format, i.e., `(min x, min y, width, height)`.
    pub fn to_tlwh(&self) -> Array1<f32> {
        arr1::<f32>(&[self.x1, self.y1, self.width(), self.height()])
    }

    /// Returns the bounding box in top-left, bottom-right format, i.e., `(min x, min y, max x, max y)`.
    pub fn to_tlbr(&self) -> Array1<f32> {
        arr1::<f32>(&[self.x1, self.y1, self.x2, self.y2])
    }

    /// Checks that all coordinates are finite and that the box is not inverted.
    ///
    /// The tracker never calls this itself: callers that want validation must opt in before calling `update`.
    pub fn validate(&self) -> Result<(), TrackerError> {
        let BoundingBox { x1, y1, x2, y2 } = *self;
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(TrackerError::NonFiniteBoundingBox { x1, y1, x2, y2 });
        }
        if x2 < x1 || y2 < y1 {
            return Err(TrackerError::InvertedBoundingBox { x1, y1, x2, y2 });
        }
        Ok(())
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        BoundingBox::new(x1, y1, x2, y2)
    }
}
