use anyhow::{Context, Result};
use centroid_tracker::Detection;
use chrono::Local;
use serde::Serialize;
use std::{
  fs::{File, OpenOptions},
  io::Write,
  path::Path,
};

/// One row of the detection log.
#[derive(Debug, Serialize)]
pub struct LogRecord<'a> {
  pub timestamp: String,
  pub frame_id: u64,
  pub object_label: &'a str,
  pub confidence: f32,
  pub track_id: usize,
  pub x_center: f32,
  pub y_center: f32,
  pub width: f32,
  pub height: f32,
}

/// Appends tracked detections to a CSV log.
pub struct DetectionLogger<W: Write> {
  writer: csv::Writer<W>,
  records: usize,
}

impl DetectionLogger<File> {
  /// Open `path` for appending. The header row is only written when the file is new or empty.
  pub fn open(path: &Path) -> Result<Self> {
    let is_new = std::fs::metadata(path).map(|metadata| metadata.len() == 0).unwrap_or(true);
    let file = OpenOptions::new()
      .append(true)
      .create(true)
      .open(path)
      .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Self::from_writer(file, is_new))
  }
}

impl<W: Write> DetectionLogger<W> {
  pub fn from_writer(writer: W, write_header: bool) -> Self {
    DetectionLogger {
      writer: csv::WriterBuilder::new().has_headers(write_header).from_writer(writer),
      records: 0,
    }
  }

  /// Number of detections logged so far
  pub fn records(&self) -> usize {
    self.records
  }

  /// Log a single detection attributed to `track_id`.
  pub fn log_detection(&mut self, frame_id: u64, detection: &Detection, track_id: usize) -> Result<()> {
    let bbox = detection.bbox();
    let (x_center, y_center) = bbox.center();
    self.writer.serialize(LogRecord {
      timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
      frame_id,
      object_label: detection.class_name().as_deref().unwrap_or(""),
      confidence: detection.confidence(),
      track_id,
      x_center,
      y_center,
      width: bbox.width(),
      height: bbox.height(),
    })?;
    self.records += 1;
    Ok(())
  }

  pub fn flush(&mut self) -> Result<()> {
    Ok(self.writer.flush()?)
  }
}
