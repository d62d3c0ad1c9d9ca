/// Centroid is the integer pixel centre of a bounding box and the only positional signal used for association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Centroid {
    /// Horizontal pixel coordinate
    x: i64,
    /// Vertical pixel coordinate
    y: i64,
}

impl Centroid {
    /// Returns a new Centroid
    pub fn new(x: i64, y: i64) -> Centroid {
        Centroid { x, y }
    }

    /// Returns the x of the centroid
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Returns the y of the centroid
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Returns the Euclidean distance to `other`.
    ///
    /// Coordinates are widened to f64 before subtracting and the result is never narrowed.
    pub fn distance(&self, other: &Centroid) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i64, i64)> for Centroid {
    fn from((x, y): (i64, i64)) -> Self {
        Centroid::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn distance() {
        let a = Centroid::new(0, 0);
        assert_approx_eq!(a.distance(&Centroid::new(3, 4)), 5.0, 1e-4);
        assert_approx_eq!(a.distance(&Centroid::new(1, 1)), std::f64::consts::SQRT_2, 1e-4);
        assert_approx_eq!(Centroid::new(100, 100).distance(&a), 141.42136, 1e-4);
    }

    #[test]
    fn distance_keeps_near_ties_apart() {
        let a = Centroid::new(0, 0);
        let near = a.distance(&Centroid::new(5000, 0));
        let far = a.distance(&Centroid::new(4999, 100));
        assert_eq!(near, 5000.0);
        assert!(far > near);
    }

    #[test]
    fn distance_at_i64_limits() {
        let a = Centroid::new(i64::MAX, i64::MIN);
        let b = Centroid::new(i64::MIN, i64::MAX);
        let distance = a.distance(&b);
        assert!(distance.is_finite());
        assert!(distance > 2.0e19);
    }

    #[test]
    fn distance_to_self() {
        let a = Centroid::new(-7, 12);
        assert_eq!(a.distance(&a), 0.0);
    }
}
