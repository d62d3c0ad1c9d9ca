use crate::Centroid;
use std::hash::{Hash, Hasher};

/// A single target track identified by a unique id and positioned by the centroid of its latest matched detection.
#[derive(Debug, Clone)]
pub struct Track {
    /// A unique track identifier.
    track_id: usize,
    /// The last observed or matched centroid.
    centroid: Centroid,
    /// Number of consecutive updates without a matching detection.
    missed_count: usize,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.track_id == other.track_id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.track_id.hash(state);
    }
}

impl Track {
    /// Returns a new Track
    ///
    /// # Parameters
    ///
    /// * `track_id`: A unique track identifier.
    /// * `centroid`: Centroid of the detection this track originates from.
    pub(crate) fn new(track_id: usize, centroid: Centroid) -> Track {
        Track {
            track_id,
            centroid,
            missed_count: 0,
        }
    }

    /// Return the identifier of the track
    pub fn track_id(&self) -> usize {
        self.track_id
    }

    /// Return the centroid of the track
    pub fn centroid(&self) -> Centroid {
        self.centroid
    }

    /// Return the number of consecutive updates this track went unmatched
    pub fn missed_count(&self) -> usize {
        self.missed_count
    }

    /// Return whether the track has been missed more than `max_missed` consecutive times.
    pub fn is_expired(&self, max_missed: usize) -> bool {
        self.missed_count > max_missed
    }

    /// Move the track to a newly matched centroid and reset the miss counter.
    pub(crate) fn update(&mut self, centroid: Centroid) {
        self.centroid = centroid;
        self.missed_count = 0;
    }

    /// Record one more consecutive update without a match.
    pub(crate) fn mark_missed(&mut self) {
        self.missed_count += 1;
    }
}
