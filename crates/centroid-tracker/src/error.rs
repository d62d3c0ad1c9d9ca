use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("inverted bounding box ({x1}, {y1}, {x2}, {y2}): expected x1 <= x2 and y1 <= y2")]
    InvertedBoundingBox { x1: f32, y1: f32, x2: f32, y2: f32 },

    #[error("bounding box has a non-finite coordinate ({x1}, {y1}, {x2}, {y2})")]
    NonFiniteBoundingBox { x1: f32, y1: f32, x2: f32, y2: f32 },

    #[error("unknown matching strategy '{0}', expected 'greedy' or 'optimal'")]
    UnknownMatching(String),
}
