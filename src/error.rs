//! Error types for the `frameseq` crate.
//!
//! [`FrameSeqError`] is returned by every fallible operation. Per-frame
//! decode and encode problems are not errors: the sampler records them as
//! [`FrameOutcome::Failed`](crate::FrameOutcome::Failed) and keeps going.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `frameseq` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameSeqError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// A frame could not be encoded to the output image format.
    #[error("Failed to encode image: {0}")]
    ImageEncodeError(String),

    /// The sampling rate is not a positive finite number of frames per
    /// second, or is too high for millisecond timestamps.
    #[error("Invalid sampling rate: {0} (expected 0 < rate <= 1000)")]
    InvalidSamplingRate(f64),

    /// The resolution scale is not a positive finite number.
    #[error("Invalid resolution scale: {0}")]
    InvalidResolutionScale(f64),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for FrameSeqError {
    fn from(error: FfmpegError) -> Self {
        FrameSeqError::FfmpegError(error.to_string())
    }
}
