//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use frameseq::{FrameSeqError, FrameSource, VideoMetadata};
use image::{Rgb, RgbImage};

pub fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

/// An in-memory video: every frame is a flat colour derived from its frame
/// number, so tests can tell which frame was decoded.
pub struct SyntheticVideo {
    metadata: VideoMetadata,
    failing_millis: HashSet<u64>,
    pub requested_millis: Vec<u64>,
}

impl SyntheticVideo {
    pub fn new(width: u32, height: u32, frames_per_second: f64, frame_count: u64) -> Self {
        Self {
            metadata: VideoMetadata {
                width,
                height,
                frames_per_second,
                frame_count,
                codec: "synthetic".to_string(),
            },
            failing_millis: HashSet::new(),
            requested_millis: Vec::new(),
        }
    }

    /// Make `frame_at` fail for these millisecond timestamps.
    pub fn failing_at(mut self, millis: impl IntoIterator<Item = u64>) -> Self {
        self.failing_millis.extend(millis);
        self
    }
}

impl FrameSource for SyntheticVideo {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn frame_at(&mut self, timestamp_ms: u64) -> Result<RgbImage, FrameSeqError> {
        self.requested_millis.push(timestamp_ms);
        if self.failing_millis.contains(&timestamp_ms) {
            return Err(FrameSeqError::VideoDecodeError(format!(
                "synthetic failure at {timestamp_ms} ms"
            )));
        }

        let frame_number =
            (timestamp_ms as f64 / 1000.0 * self.metadata.frames_per_second).round() as u64;
        let shade = (frame_number % 256) as u8;
        Ok(RgbImage::from_pixel(
            self.metadata.width,
            self.metadata.height,
            Rgb([shade, 255 - shade, 64]),
        ))
    }
}

/// File names in `directory`, sorted.
pub fn file_names(directory: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
