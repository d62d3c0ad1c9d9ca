use crate::{Centroid, Detection};
use indexmap::IndexMap;

/// Attribute each detection to the track whose centroid is nearest to the detection's own centroid.
///
/// The tracker only keeps centroids, so this is how callers recover which track a detection belongs to. Several detections may be attributed to
/// the same track. On equal distances the track listed first in `objects` wins.
///
/// # Parameters
///
/// * `detections`: The detections of the current frame.
/// * `objects`: The id to centroid mapping returned by `CentroidTracker::update` for the same frame.
///
/// # Returns
///
/// One entry per detection, `None` only when `objects` is empty.
pub fn assign_track_ids(
    detections: &[Detection],
    objects: &IndexMap<usize, Centroid>,
) -> Vec<Option<usize>> {
    detections
        .iter()
        .map(|detection| {
            let centroid = detection.bbox().centroid();
            objects
                .iter()
                .fold(None, |nearest: Option<(usize, f64)>, (track_id, other)| {
                    let distance = centroid.distance(other);
                    match nearest {
                        Some((_, nearest_distance)) if distance >= nearest_distance => nearest,
                        _ => Some((*track_id, distance)),
                    }
                })
                .map(|(track_id, _)| track_id)
        })
        .collect()
}
