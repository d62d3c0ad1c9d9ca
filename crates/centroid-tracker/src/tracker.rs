use crate::*;
use indexmap::IndexMap;
use log::{debug, trace};

/// This is the multi-target centroid tracker.
///
/// Each call to [`CentroidTracker::update`] consumes the bounding boxes of one frame and returns every live track id with its current centroid.
/// Calls must be made one frame at a time and in frame order: `update` takes `&mut self`, so a tracker shared between threads has to be owned by a
/// single worker or guarded by a lock.
///
/// # Examples
///
/// ```
/// use centroid_tracker::{BoundingBox, Centroid, CentroidTracker};
///
/// // allow a track to go unmatched for one frame
/// let mut tracker = CentroidTracker::new(1);
///
/// let objects = tracker.update(&[BoundingBox::new(0.0, 0.0, 10.0, 10.0)]);
/// assert_eq!(objects.get(&1), Some(&Centroid::new(5, 5)));
///
/// // one missed frame is tolerated
/// let objects = tracker.update(&[]);
/// assert_eq!(objects.len(), 1);
///
/// // the second is not
/// let objects = tracker.update(&[]);
/// assert!(objects.is_empty());
///```
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    /// Maximum number of consecutive misses before a track is deleted.
    max_missed: usize,
    /// Strategy used to associate tracks with detections.
    matching: Matching,
    /// The live tracks keyed by id, in creation order.
    tracks: IndexMap<usize, Track>,
    /// Used to allocate identifiers to new tracks.
    next_id: usize,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(30)
    }
}

impl CentroidTracker {
    /// Returns a new CentroidTracker
    ///
    /// # Arguments
    ///
    /// * `max_missed`: Maximum number of consecutive misses before a track is deleted. A track is deleted once it has been missed `max_missed + 1` times in a row.
    pub fn new(max_missed: usize) -> CentroidTracker {
        CentroidTracker {
            max_missed,
            matching: Matching::default(),
            tracks: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Set matching
    pub fn with_matching(&mut self, matching: Matching) -> &mut Self {
        self.matching = matching;
        self
    }

    /// Set the id given to the next new track. Ids already issued are never handed out again, so this only moves the counter forward.
    pub fn with_first_id(&mut self, first_id: usize) -> &mut Self {
        self.next_id = self.next_id.max(first_id);
        self
    }

    /// Return max_missed
    pub fn max_missed(&self) -> usize {
        self.max_missed
    }

    /// Return the matching strategy
    pub fn matching(&self) -> Matching {
        self.matching
    }

    /// Return the id that the next new track will receive
    pub fn next_id(&self) -> usize {
        self.next_id
    }

    /// Return the live tracks in creation order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Return the live track with `track_id`
    pub fn track(&self, track_id: usize) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Return the number of live tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Return whether there are no live tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Drop every live track. The id counter is kept so ids are not reused.
    pub fn reset(&mut self) {
        debug!("reset: dropping {} tracks", self.tracks.len());
        self.tracks.clear();
    }

    /// Perform association and track management for one frame.
    ///
    /// # Parameters
    ///
    /// * `bboxes`: The bounding boxes detected in the current frame, in any order. Boxes are not validated.
    ///
    /// # Returns
    ///
    /// Every track alive after this update mapped to its current centroid.
    ///
    /// When there are at least as many tracks as detections, unmatched tracks are counted as missed and no new track is created, even if a
    /// detection lost its nearest track to another one. When there are more detections than tracks, unmatched detections become new tracks and
    /// unmatched tracks are left untouched for this frame.
    pub fn update(&mut self, bboxes: &[BoundingBox]) -> IndexMap<usize, Centroid> {
        if bboxes.is_empty() {
            let track_ids = self.tracks.keys().copied().collect::<Vec<_>>();
            self.mark_missed(&track_ids);
            return self.objects();
        }

        let centroids = bboxes
            .iter()
            .map(|bbox| bbox.centroid())
            .collect::<Vec<_>>();

        if self.tracks.is_empty() {
            centroids
                .into_iter()
                .for_each(|centroid| self.register(centroid));
            debug!("registered {} tracks", self.tracks.len());
            return self.objects();
        }

        let track_centroids = self
            .tracks
            .values()
            .map(|track| track.centroid())
            .collect::<Vec<_>>();
        let cost_matrix = centroid_distance_matrix(&track_centroids, &centroids);
        let Assignment {
            matches,
            unmatched_rows,
            unmatched_cols,
        } = self.matching.assign(&cost_matrix);

        matches.iter().for_each(|&(row, col)| {
            if let Some((_, track)) = self.tracks.get_index_mut(row) {
                trace!(
                    "track {} matched {:?} distance {}",
                    track.track_id(),
                    centroids[col],
                    cost_matrix[[row, col]]
                );
                track.update(centroids[col]);
            }
        });

        let (num_tracks, num_detections) = cost_matrix.dim();
        debug!(
            "{} tracks, {} detections, {} matched",
            num_tracks,
            num_detections,
            matches.len()
        );

        if num_tracks >= num_detections {
            let track_ids = unmatched_rows
                .into_iter()
                .filter_map(|row| self.tracks.get_index(row).map(|(track_id, _)| *track_id))
                .collect::<Vec<_>>();
            self.mark_missed(&track_ids);
            if !unmatched_cols.is_empty() {
                debug!(
                    "{} detections left without a track",
                    unmatched_cols.len()
                );
            }
        } else {
            unmatched_cols
                .into_iter()
                .for_each(|col| self.register(centroids[col]));
        }

        self.objects()
    }

    /// Returns the live tracks as id to centroid.
    fn objects(&self) -> IndexMap<usize, Centroid> {
        self.tracks
            .iter()
            .map(|(track_id, track)| (*track_id, track.centroid()))
            .collect()
    }

    fn register(&mut self, centroid: Centroid) {
        let track_id = self.next_id;
        trace!("track {} registered at {:?}", track_id, centroid);
        self.tracks.insert(track_id, Track::new(track_id, centroid));
        self.next_id += 1;
    }

    /// Count a miss for each of `track_ids` and delete those that exceeded `max_missed`.
    fn mark_missed(&mut self, track_ids: &[usize]) {
        let max_missed = self.max_missed;
        let expired = track_ids
            .iter()
            .filter_map(|track_id| {
                let track = self.tracks.get_mut(track_id)?;
                track.mark_missed();
                track.is_expired(max_missed).then_some(*track_id)
            })
            .collect::<Vec<_>>();

        expired.iter().for_each(|track_id| {
            if let Some(track) = self.tracks.shift_remove(track_id) {
                trace!(
                    "track {} removed after {} misses",
                    track_id,
                    track.missed_count()
                );
            }
        });

        if !expired.is_empty() {
            debug!("removed {} tracks", expired.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn bbox(cx: f32, cy: f32) -> BoundingBox {
        BoundingBox::new(cx - 5.0, cy - 5.0, cx + 5.0, cy + 5.0)
    }

    #[test]
    fn first_update_registers_every_detection() {
        let mut tracker = CentroidTracker::new(5);
        let objects = tracker.update(&[bbox(10.0, 10.0), bbox(50.0, 50.0), bbox(90.0, 10.0)]);

        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(objects[&2], Centroid::new(50, 50));
        assert_eq!(tracker.next_id(), 4);
        assert!(tracker.tracks().all(|track| track.missed_count() == 0));
    }

    #[test]
    fn with_first_id() {
        let mut tracker = CentroidTracker::new(5);
        tracker.with_first_id(100);
        let objects = tracker.update(&[bbox(10.0, 10.0), bbox(50.0, 50.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![100, 101]);

        // cannot move backwards
        tracker.with_first_id(1);
        assert_eq!(tracker.next_id(), 102);
    }

    #[test]
    fn matched_tracks_follow_detections() {
        let mut tracker = CentroidTracker::new(5);
        tracker.update(&[bbox(10.0, 10.0), bbox(50.0, 50.0)]);

        // detections arrive in reverse order and have moved slightly
        let objects = tracker.update(&[bbox(53.0, 52.0), bbox(12.0, 9.0)]);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&1], Centroid::new(12, 9));
        assert_eq!(objects[&2], Centroid::new(53, 52));
    }

    #[test]
    fn miss_count_resets_on_match() {
        let mut tracker = CentroidTracker::new(3);
        tracker.update(&[bbox(10.0, 10.0)]);

        tracker.update(&[]);
        tracker.update(&[]);
        assert_eq!(tracker.track(1).map(|track| track.missed_count()), Some(2));

        tracker.update(&[bbox(11.0, 11.0)]);
        assert_eq!(tracker.track(1).map(|track| track.missed_count()), Some(0));
    }

    #[test]
    fn track_removed_only_after_exceeding_max_missed() {
        let mut tracker = CentroidTracker::new(2);
        tracker.update(&[bbox(10.0, 10.0)]);

        assert_eq!(tracker.update(&[]).len(), 1);
        assert_eq!(tracker.update(&[]).len(), 1);
        assert_eq!(tracker.track(1).map(|track| track.missed_count()), Some(2));
        assert!(tracker.update(&[]).is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn zero_max_missed_removes_on_first_miss() {
        let mut tracker = CentroidTracker::new(0);
        tracker.update(&[bbox(10.0, 10.0), bbox(100.0, 100.0)]);

        let objects = tracker.update(&[bbox(11.0, 11.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn surplus_tracks_are_missed_not_registered() {
        let mut tracker = CentroidTracker::new(5);
        tracker.update(&[bbox(0.0, 0.0), bbox(100.0, 100.0)]);

        let objects = tracker.update(&[bbox(1.0, 1.0)]);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&1], Centroid::new(1, 1));
        assert_eq!(tracker.track(2).map(|track| track.missed_count()), Some(1));
        assert_eq!(tracker.next_id(), 3);
    }

    #[test]
    fn surplus_detections_are_registered_and_tracks_not_missed() {
        let mut tracker = CentroidTracker::new(5);
        tracker.update(&[bbox(0.0, 0.0), bbox(10.0, 0.0)]);

        // both tracks are nearest to the first detection, track 2 goes unmatched but is not counted as missed
        let objects = tracker.update(&[bbox(1.0, 0.0), bbox(-50.0, 0.0), bbox(60.0, 0.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(objects[&1], Centroid::new(1, 0));
        assert_eq!(objects[&2], Centroid::new(10, 0));
        assert_eq!(objects[&3], Centroid::new(-50, 0));
        assert_eq!(objects[&4], Centroid::new(60, 0));
        assert_eq!(tracker.track(2).map(|track| track.missed_count()), Some(0));
    }

    #[test]
    fn collision_drops_detection_when_counts_equal() {
        let mut tracker = CentroidTracker::new(5);
        tracker.update(&[bbox(0.0, 0.0), bbox(10.0, 0.0)]);

        // both tracks are nearest to the first detection, the second detection is dropped
        let objects = tracker.update(&[bbox(4.0, 0.0), bbox(100.0, 100.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(objects[&1], Centroid::new(4, 0));
        assert_eq!(objects[&2], Centroid::new(10, 0));
        assert_eq!(tracker.track(2).map(|track| track.missed_count()), Some(1));
        assert_eq!(tracker.next_id(), 3);
    }

    #[test]
    fn optimal_matching_resolves_collision() {
        let mut tracker = CentroidTracker::new(5);
        tracker.with_matching(Matching::Optimal);
        tracker.update(&[bbox(0.0, 0.0), bbox(10.0, 0.0)]);

        let objects = tracker.update(&[bbox(4.0, 0.0), bbox(100.0, 100.0)]);
        assert_eq!(objects.len(), 2);
        assert!(tracker.tracks().all(|track| track.missed_count() == 0));
        assert_eq!(objects[&1], Centroid::new(4, 0));
        assert_eq!(objects[&2], Centroid::new(100, 100));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut tracker = CentroidTracker::new(0);
        tracker.update(&[bbox(10.0, 10.0)]);
        tracker.update(&[]);
        assert!(tracker.is_empty());

        let objects = tracker.update(&[bbox(10.0, 10.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![2]);

        tracker.reset();
        let objects = tracker.update(&[bbox(10.0, 10.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn removal_keeps_creation_order() {
        let mut tracker = CentroidTracker::new(0);
        tracker.update(&[bbox(0.0, 0.0), bbox(100.0, 0.0), bbox(200.0, 0.0)]);

        let objects = tracker.update(&[bbox(0.0, 0.0), bbox(200.0, 0.0)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(
            tracker.tracks().map(|track| track.track_id()).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }
}
