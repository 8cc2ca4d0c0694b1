//! Frame sampling.
//!
//! [`extract_frames`] opens a video and writes one image per planned
//! timestamp into the output directory. [`sample_frames`] runs the same loop
//! against any [`FrameSource`].
//!
//! Sampling is best-effort: a timestamp whose frame cannot be decoded, encoded
//! or written becomes a [`FrameOutcome::Failed`] entry and the loop moves on.
//! Output files are numbered by their position in the sample plan, so a
//! failure leaves a gap in the numbering rather than shifting later frames.
//!
//! # Example
//!
//! ```no_run
//! use frameseq::{SamplerConfig, extract_frames};
//!
//! let config = SamplerConfig::new("video/WebVideo.mp4", "frames");
//! let report = extract_frames(&config)?;
//! println!("wrote {} frames", report.extracted_count());
//! # Ok::<(), frameseq::FrameSeqError>(())
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    configuration::SamplerConfig,
    encoder,
    error::FrameSeqError,
    metadata::VideoMetadata,
    progress::ProgressTracker,
    source::{FrameSource, VideoFile},
    timestamps::{SamplePlan, seconds_to_millis},
    utilities,
};

/// What happened at one planned timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The frame was decoded and written.
    Written {
        /// Position in the sample plan; also the number in the file name.
        index: usize,
        /// Seek point in seconds.
        timestamp: f64,
        /// Path of the written image.
        path: PathBuf,
        /// Encoded size in bytes.
        bytes: u64,
    },
    /// No image was written for this timestamp.
    Failed {
        /// Position in the sample plan.
        index: usize,
        /// Seek point in seconds.
        timestamp: f64,
        /// Why the frame was skipped.
        reason: String,
    },
}

impl FrameOutcome {
    pub fn index(&self) -> usize {
        match self {
            FrameOutcome::Written { index, .. } | FrameOutcome::Failed { index, .. } => *index,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            FrameOutcome::Written { timestamp, .. } | FrameOutcome::Failed { timestamp, .. } => {
                *timestamp
            }
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, FrameOutcome::Written { .. })
    }
}

/// Summary of a sampling run.
#[derive(Debug, Clone)]
#[must_use]
pub struct ExtractionReport {
    /// Metadata of the sampled video.
    pub video: VideoMetadata,
    /// Width of the written images.
    pub output_width: u32,
    /// Height of the written images.
    pub output_height: u32,
    /// One outcome per planned timestamp, in plan order.
    pub outcomes: Vec<FrameOutcome>,
    /// Number of timestamps before the frame cap was applied.
    pub uncapped_count: usize,
    /// Wall-clock time spent in the sampling loop.
    pub elapsed: Duration,
    /// Combined size of every image with the output extension in the output
    /// directory, including files left over from earlier runs.
    pub output_bytes: u64,
}

impl ExtractionReport {
    /// Number of frames successfully written.
    pub fn extracted_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_written()).count()
    }

    /// Number of timestamps that produced no image.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.extracted_count()
    }

    /// Whether the frame cap removed any timestamps.
    pub fn is_capped(&self) -> bool {
        self.uncapped_count > self.outcomes.len()
    }

    /// Paths of the written images, in plan order.
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FrameOutcome::Written { path, .. } => Some(path.as_path()),
            FrameOutcome::Failed { .. } => None,
        })
    }

    /// [`output_bytes`](Self::output_bytes) in mebibytes.
    pub fn output_megabytes(&self) -> f64 {
        self.output_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Open the configured video and sample it into the output directory.
///
/// The output directory is created first (it is fine if it already exists),
/// so it exists even when the video cannot be opened.
///
/// # Errors
///
/// - [`FrameSeqError::InvalidSamplingRate`] or
///   [`FrameSeqError::InvalidResolutionScale`] for a bad config.
/// - [`FrameSeqError::FileOpen`] or [`FrameSeqError::NoVideoStream`] if the
///   video cannot be opened.
/// - [`FrameSeqError::IoError`] if the output directory cannot be created
///   or listed.
pub fn extract_frames(config: &SamplerConfig) -> Result<ExtractionReport, FrameSeqError> {
    config.validate()?;
    fs::create_dir_all(&config.output_directory)?;

    let mut video = VideoFile::open(&config.video_path).inspect_err(|error| {
        log::error!("Could not open video file {}: {error}", config.video_path.display());
    })?;

    sample_frames(config, &mut video)
}

/// Sample `source` according to `config`.
///
/// # Errors
///
/// Only configuration and output-directory errors are returned; per-frame
/// problems are reported in [`ExtractionReport::outcomes`].
pub fn sample_frames<S: FrameSource + ?Sized>(
    config: &SamplerConfig,
    source: &mut S,
) -> Result<ExtractionReport, FrameSeqError> {
    config.validate()?;
    fs::create_dir_all(&config.output_directory)?;

    let video = source.metadata().clone();
    let (output_width, output_height) = config.resolve_dimensions(video.width, video.height);

    log::info!("Video duration: {:.2} seconds", video.duration());
    log::info!("Original video FPS: {}", video.frames_per_second);
    log::info!("Extracting at: {} FPS", config.sampling_rate);
    log::info!("Output resolution: {output_width}x{output_height}");

    let plan = SamplePlan::new(video.duration(), config.sampling_rate, config.frame_cap);
    if plan.is_capped() {
        log::warn!(
            "Limiting frames from {} to {} (frame cap)",
            plan.uncapped_count,
            plan.len()
        );
    }
    log::info!("Will extract {} frames", plan.len());

    let mut tracker = ProgressTracker::new(
        config.progress.clone(),
        plan.len() as u64,
        config.progress_interval,
    );
    let mut outcomes = Vec::with_capacity(plan.len());

    for (index, &timestamp) in plan.timestamps.iter().enumerate() {
        let outcome = match sample_one(config, source, index, timestamp, output_width, output_height)
        {
            Ok((path, bytes)) => FrameOutcome::Written {
                index,
                timestamp,
                path,
                bytes,
            },
            Err(error) => {
                log::warn!("Failed to extract frame at timestamp {timestamp}: {error}");
                FrameOutcome::Failed {
                    index,
                    timestamp,
                    reason: error.to_string(),
                }
            }
        };

        tracker.advance(outcome.is_written(), timestamp);
        outcomes.push(outcome);
    }

    tracker.finish();
    let elapsed = tracker.elapsed();

    let extension = config.image_format.extension();
    let images = utilities::list_files_with_extension(&config.output_directory, extension)?;
    let output_bytes = utilities::total_size(&images);

    let report = ExtractionReport {
        video,
        output_width,
        output_height,
        outcomes,
        uncapped_count: plan.uncapped_count,
        elapsed,
        output_bytes,
    };

    log::info!("Extraction complete!");
    log::info!("Total frames extracted: {}", report.extracted_count());
    if report.failed_count() > 0 {
        log::warn!("Frames skipped: {}", report.failed_count());
    }
    log::info!("Time taken: {:.2} seconds", elapsed.as_secs_f64());
    log::info!(
        "Total size of {} files: {:.2} MB",
        config.image_format,
        report.output_megabytes()
    );

    Ok(report)
}

fn sample_one<S: FrameSource + ?Sized>(
    config: &SamplerConfig,
    source: &mut S,
    index: usize,
    timestamp: f64,
    output_width: u32,
    output_height: u32,
) -> Result<(PathBuf, u64), FrameSeqError> {
    let mut image = source.frame_at(seconds_to_millis(timestamp))?;
    if config.needs_resize() {
        image = encoder::resize_frame(&image, output_width, output_height);
    }

    let path = config
        .output_directory
        .join(utilities::frame_file_name(index, config.image_format));
    let bytes = encoder::write_frame(&image, &path, config.image_format, config.quality)?;
    Ok((path, bytes))
}
