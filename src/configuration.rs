//! Sampling and manifest configuration.
//!
//! [`SamplerConfig`] carries everything the frame sampler needs (paths,
//! sampling rate, quality, scale, frame cap, output format and progress
//! callback). [`ManifestOptions`] controls how the manifest module is
//! rendered. Both are builders with `with_*` methods.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use frameseq::{ImageFormat, LogProgress, SamplerConfig};
//!
//! let config = SamplerConfig::new("video/WebVideo.mp4", "frames")
//!     .with_sampling_rate(24.0)
//!     .with_quality(80)
//!     .with_resolution_scale(0.5)
//!     .with_image_format(ImageFormat::WebP)
//!     .with_progress(Arc::new(LogProgress));
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use crate::{
    encoder::ImageFormat,
    error::FrameSeqError,
    progress::{NoOpProgress, ProgressCallback},
};

/// Default number of frames sampled per second of video.
pub const DEFAULT_SAMPLING_RATE: f64 = 30.0;

/// Default encoder quality (0–100).
pub const DEFAULT_QUALITY: u8 = 90;

/// Default resolution scale (native size).
pub const DEFAULT_RESOLUTION_SCALE: f64 = 1.0;

/// Default ceiling on the number of sampled frames.
///
/// The slideshow page that consumes the manifest froze on its last frame
/// once a sequence grew past 2033 images, so sequences are truncated to this
/// length. Override it with [`SamplerConfig::with_frame_cap`].
pub const DEFAULT_FRAME_CAP: usize = 2033;

/// Highest accepted sampling rate. Timestamps are rounded to whole
/// milliseconds, so faster rates would produce duplicate seek points.
pub const MAX_SAMPLING_RATE: f64 = 1000.0;

/// Video read by the command-line tool when no path is given.
pub const DEFAULT_VIDEO_PATH: &str = "video/WebVideo.mp4";

/// Directory frames are written to by default.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "frames";

/// Manifest written by default.
pub const DEFAULT_MANIFEST_PATH: &str = "js/preloader.js";

/// Name of the exported manifest function.
pub const DEFAULT_MANIFEST_FUNCTION: &str = "getPreloadedFrames";

/// Configuration for a sampling run.
///
/// All fields have defaults matching the original fixed settings: 30 samples
/// per second, quality 90, scale 1.0, a 2033-frame cap, WebP output and no
/// progress callback.
#[derive(Clone)]
pub struct SamplerConfig {
    pub(crate) video_path: PathBuf,
    pub(crate) output_directory: PathBuf,
    pub(crate) sampling_rate: f64,
    pub(crate) quality: u8,
    pub(crate) resolution_scale: f64,
    pub(crate) frame_cap: Option<usize>,
    pub(crate) image_format: ImageFormat,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) progress_interval: Duration,
}

impl Debug for SamplerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SamplerConfig")
            .field("video_path", &self.video_path)
            .field("output_directory", &self.output_directory)
            .field("sampling_rate", &self.sampling_rate)
            .field("quality", &self.quality)
            .field("resolution_scale", &self.resolution_scale)
            .field("frame_cap", &self.frame_cap)
            .field("image_format", &self.image_format)
            .field("progress_interval", &self.progress_interval)
            .finish_non_exhaustive()
    }
}

impl SamplerConfig {
    /// Create a configuration for sampling `video_path` into
    /// `output_directory` with default settings.
    pub fn new<V: AsRef<Path>, O: AsRef<Path>>(video_path: V, output_directory: O) -> Self {
        Self {
            video_path: video_path.as_ref().to_path_buf(),
            output_directory: output_directory.as_ref().to_path_buf(),
            sampling_rate: DEFAULT_SAMPLING_RATE,
            quality: DEFAULT_QUALITY,
            resolution_scale: DEFAULT_RESOLUTION_SCALE,
            frame_cap: Some(DEFAULT_FRAME_CAP),
            image_format: ImageFormat::default(),
            progress: Arc::new(NoOpProgress),
            progress_interval: Duration::from_secs(1),
        }
    }

    /// Set the number of frames sampled per second of video.
    #[must_use]
    pub fn with_sampling_rate(mut self, frames_per_second: f64) -> Self {
        self.sampling_rate = frames_per_second;
        self
    }

    /// Set the encoder quality. Clamped to a maximum of 100.
    #[must_use]
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(100);
        self
    }

    /// Set the factor applied to the native width and height.
    #[must_use]
    pub fn with_resolution_scale(mut self, scale: f64) -> Self {
        self.resolution_scale = scale;
        self
    }

    /// Set the maximum number of sampled frames. `None` removes the cap.
    #[must_use]
    pub fn with_frame_cap(mut self, cap: Option<usize>) -> Self {
        self.frame_cap = cap;
        self
    }

    /// Set the output image format.
    #[must_use]
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set the minimum wall-clock time between progress reports.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn resolution_scale(&self) -> f64 {
        self.resolution_scale
    }

    pub fn frame_cap(&self) -> Option<usize> {
        self.frame_cap
    }

    pub fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    /// Check the numeric settings.
    ///
    /// # Errors
    ///
    /// - [`FrameSeqError::InvalidSamplingRate`] unless `0 < rate <= 1000`.
    /// - [`FrameSeqError::InvalidResolutionScale`] unless the scale is
    ///   positive and finite.
    pub fn validate(&self) -> Result<(), FrameSeqError> {
        let rate = self.sampling_rate;
        if !rate.is_finite() || rate <= 0.0 || rate > MAX_SAMPLING_RATE {
            return Err(FrameSeqError::InvalidSamplingRate(rate));
        }

        let scale = self.resolution_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(FrameSeqError::InvalidResolutionScale(scale));
        }

        Ok(())
    }

    /// Resolve the output dimensions for a source of `width` x `height`.
    ///
    /// A scale of exactly 1.0 keeps the native size. Any other scale
    /// truncates `width * scale` and `height * scale` toward zero, with a
    /// floor of one pixel.
    pub fn resolve_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if self.resolution_scale == 1.0 {
            return (width, height);
        }
        let scaled = |value: u32| ((value as f64 * self.resolution_scale) as u32).max(1);
        (scaled(width), scaled(height))
    }

    /// Whether frames need resizing before encoding.
    pub(crate) fn needs_resize(&self) -> bool {
        self.resolution_scale != 1.0
    }
}

/// Options for rendering the frame manifest.
#[derive(Debug, Clone)]
pub struct ManifestOptions {
    pub(crate) image_format: ImageFormat,
    pub(crate) path_prefix: Option<String>,
    pub(crate) function_name: String,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestOptions {
    /// WebP files, paths prefixed with the frames directory, exported as
    /// `getPreloadedFrames`.
    pub fn new() -> Self {
        Self {
            image_format: ImageFormat::default(),
            path_prefix: None,
            function_name: DEFAULT_MANIFEST_FUNCTION.to_string(),
        }
    }

    /// Only list files with this format's extension.
    #[must_use]
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    /// Prefix entries with `prefix` instead of the frames directory path.
    ///
    /// A trailing `/` is ignored. An empty prefix lists bare file names.
    #[must_use]
    pub fn with_path_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Name of the exported JavaScript function.
    #[must_use]
    pub fn with_function_name<S: Into<String>>(mut self, name: S) -> Self {
        self.function_name = name.into();
        self
    }
}
