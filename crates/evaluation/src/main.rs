mod utils;
use anyhow::{Context, Ok, Result};
use centroid_tracker::{assign_track_ids, BoundingBox, CentroidTracker, Matching};
use clap::Parser;
use log::{debug, info};
use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::PathBuf,
};
use utils::*;

/// Track objects through a sequence of per-frame detections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV of detections with columns frame,label,confidence,x1,y1,x2,y2
    #[arg(short, long)]
    input: PathBuf,

    /// Detection log to append to
    #[arg(short, long, default_value = "detection_logs.csv")]
    output: PathBuf,

    /// Detections below this confidence are ignored
    #[arg(short, long, default_value_t = 0.4)]
    confidence_threshold: f32,

    /// Number of consecutive frames an object may be missing before its id is retired
    #[arg(short, long, default_value_t = 30)]
    max_missed: usize,

    /// Association strategy, either greedy or optimal
    #[arg(long, default_value_t = Matching::Greedy)]
    matching: Matching,

    /// Also write tracked detections in MOTChallenge format to this file
    #[arg(long)]
    mot_output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let frames = detection_source::load_frames(&args.input, args.confidence_threshold)?;
    info!(
        "loaded {} frames from {}",
        frames.len(),
        args.input.display()
    );

    let mut tracker = CentroidTracker::new(args.max_missed);
    tracker.with_matching(args.matching);

    let mut logger = detection_logger::DetectionLogger::open(&args.output)?;
    let mut mot_file = args
        .mot_output
        .as_ref()
        .map(|path| {
            OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map(BufWriter::new)
                .with_context(|| format!("failed to open {}", path.display()))
        })
        .transpose()?;

    let mut previous_frame = None;
    frames.iter().try_for_each(|(frame_id, detections)| {
        // frames without detections still age tracks
        for _ in 0..detection_source::missing_frames(previous_frame, *frame_id, args.max_missed) {
            tracker.update(&[]);
        }
        previous_frame = Some(*frame_id);

        let bboxes = detections
            .iter()
            .map(|detection| *detection.bbox())
            .collect::<Vec<BoundingBox>>();

        let objects = tracker.update(&bboxes);
        let track_ids = assign_track_ids(detections, &objects);
        debug!(
            "frame {}: {} detections, {} tracks",
            frame_id,
            detections.len(),
            objects.len()
        );

        detections
            .iter()
            .zip(track_ids)
            .filter_map(|(detection, track_id)| track_id.map(|track_id| (detection, track_id)))
            .try_for_each(|(detection, track_id)| {
                logger.log_detection(*frame_id, detection, track_id)?;

                if let Some(file) = mot_file.as_mut() {
                    // output format
                    // <frame>, <id>, <bb_left>, <bb_top>, <bb_width>, <bb_height>, <conf>, <x>, <y>, <z>
                    let bbox = detection.bbox();
                    writeln!(
                        file,
                        "{frame_id},{track_id},{:.3},{:.3},{:.3},{:.3},{:.3},-1,-1,-1",
                        bbox.x1(),
                        bbox.y1(),
                        bbox.width(),
                        bbox.height(),
                        detection.confidence(),
                    )?;
                }

                Ok(())
            })
    })?;

    logger.flush()?;
    if let Some(file) = mot_file.as_mut() {
        file.flush()?;
    }

    info!(
        "processed {} frames, logged {} detections, issued {} ids, {} tracks alive",
        frames.len(),
        logger.records(),
        tracker.next_id() - 1,
        tracker.len()
    );
    info!("detection log saved to {}", args.output.display());

    Ok(())
}
