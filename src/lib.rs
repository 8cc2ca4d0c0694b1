//! # frameseq
//!
//! Turn a video into a numbered sequence of still images plus a JavaScript
//! manifest listing them, ready for a page that plays the sequence as a
//! scroll-driven slideshow.
//!
//! Decoding is done by FFmpeg through the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate. Frames are
//! encoded as lossy WebP via `libwebp` or as JPEG via the `image` crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frameseq::{ManifestOptions, SamplerConfig, extract_frames, write_manifest};
//!
//! let config = SamplerConfig::new("video/WebVideo.mp4", "frames")
//!     .with_sampling_rate(30.0)
//!     .with_quality(90);
//! let report = extract_frames(&config)?;
//!
//! if report.extracted_count() > 0 {
//!     write_manifest("frames", "js/preloader.js", &ManifestOptions::new())?;
//! }
//! # Ok::<(), frameseq::FrameSeqError>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Sampling**: timestamps are planned at a fixed rate from 0 to the
//!    video's duration (rounded to the millisecond and capped at
//!    [`DEFAULT_FRAME_CAP`] entries by default). Each one is decoded, scaled
//!    if requested, and written as `frame_NNNN.<ext>` where `NNNN` is its
//!    position in the plan.
//! 2. **Manifest**: the output directory is listed, sorted by name, and
//!    written out as an ES module exporting `getPreloadedFrames()`.
//!
//! Frames that fail to decode are skipped and reported in
//! [`ExtractionReport::outcomes`]; only an unopenable video stops a run.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system, as must
//! `libwebp` (built from source by `libwebp-sys` if absent).

pub mod configuration;
pub mod encoder;
pub mod error;
pub mod ffmpeg;
pub mod manifest;
pub mod metadata;
pub mod progress;
pub mod sampler;
pub mod source;
pub mod timestamps;
mod utilities;

pub use configuration::{
    DEFAULT_FRAME_CAP, DEFAULT_MANIFEST_PATH, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_QUALITY,
    DEFAULT_RESOLUTION_SCALE, DEFAULT_SAMPLING_RATE, DEFAULT_VIDEO_PATH, ManifestOptions,
    SamplerConfig,
};
pub use encoder::ImageFormat;
pub use error::FrameSeqError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use manifest::{ManifestOutcome, ManifestSkip, write_manifest};
pub use metadata::VideoMetadata;
pub use progress::{LogProgress, ProgressCallback, ProgressInfo};
pub use sampler::{ExtractionReport, FrameOutcome, extract_frames, sample_frames};
pub use source::{FrameSource, VideoFile};
pub use timestamps::SamplePlan;
pub use utilities::frame_file_name;
