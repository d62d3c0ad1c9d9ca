mod bounding_box;
mod centroid;
mod correlation;
mod detection;
mod distance;
mod error;
pub mod linear_assignment;
mod track;
mod tracker;

pub use bounding_box::BoundingBox;
pub use centroid::Centroid;
pub use correlation::assign_track_ids;
pub use detection::Detection;
pub use distance::centroid_distance_matrix;
pub use error::TrackerError;
pub use linear_assignment::{Assignment, Matching};
pub use track::Track;
pub use tracker::CentroidTracker;
