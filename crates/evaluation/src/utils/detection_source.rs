use anyhow::{Context, Result};
use centroid_tracker::{BoundingBox, Detection};
use indexmap::IndexMap;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

/// One detector output row: `frame,label,confidence,x1,y1,x2,y2`.
#[derive(Debug, Deserialize)]
pub struct DetectionRecord {
  pub frame: u64,
  pub label: String,
  pub confidence: f32,
  pub x1: f32,
  pub y1: f32,
  pub x2: f32,
  pub y2: f32,
}

impl DetectionRecord {
  /// Convert to a Detection. Coordinates are truncated to whole pixels as the detector reports them.
  pub fn into_detection(self) -> Detection {
    Detection::new(
      BoundingBox::new(self.x1.trunc(), self.y1.trunc(), self.x2.trunc(), self.y2.trunc()),
      self.confidence,
      None,
      Some(self.label),
    )
  }
}

/// Read detections grouped by frame.
///
/// Frames are returned in ascending frame order. Frames whose detections all fall below `confidence_threshold` map to an empty list.
/// Frame numbers that never appear are not materialised, see [`missing_frames`].
pub fn read_frames<R: Read>(reader: R, confidence_threshold: f32) -> Result<IndexMap<u64, Vec<Detection>>> {
  let mut frames = IndexMap::<u64, Vec<Detection>>::new();

  let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
  for (line, record) in reader.deserialize::<DetectionRecord>().enumerate() {
    // header is line 1
    let record = record.with_context(|| format!("invalid detection on line {}", line + 2))?;
    let detections = frames.entry(record.frame).or_default();
    if record.confidence >= confidence_threshold {
      detections.push(record.into_detection());
    }
  }

  frames.sort_keys();
  Ok(frames)
}

/// Number of empty frames to replay between `previous` and `frame`.
///
/// Absent frame numbers count as frames with no detections, but once `max_missed + 1` empty frames have passed every track is gone and
/// further empty frames change nothing, so the count is capped there.
pub fn missing_frames(previous: Option<u64>, frame: u64, max_missed: usize) -> u64 {
  let gap = previous.map_or(0, |previous| frame.saturating_sub(previous).saturating_sub(1));
  gap.min((max_missed as u64).saturating_add(1))
}

/// Read detections grouped by frame from a CSV file.
pub fn load_frames(path: &Path, confidence_threshold: f32) -> Result<IndexMap<u64, Vec<Detection>>> {
  let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
  read_frames(file, confidence_threshold)
}
