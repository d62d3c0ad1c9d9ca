use crate::Centroid;
use ndarray::*;

/// Compute the dense pair-wise Euclidean distance matrix between track and detection centroids.
///
/// # Parameters
///
/// * `tracks`: N track centroids (rows).
/// * `detections`: M detection centroids (columns).
///
/// # Returns
///
/// An NxM matrix where entry (i, j) is the distance between `tracks[i]` and `detections[j]`.
pub fn centroid_distance_matrix(tracks: &[Centroid], detections: &[Centroid]) -> Array2<f64> {
    Array2::from_shape_fn((tracks.len(), detections.len()), |(row, col)| {
        tracks[row].distance(&detections[col])
    })
}
