//! Frame sources.
//!
//! The sampler pulls frames through the [`FrameSource`] trait. [`VideoFile`]
//! is the FFmpeg-backed implementation: it opens a container, reads the best
//! video stream's metadata, and decodes the frame shown at a requested
//! millisecond timestamp.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Packet, Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use ffmpeg_sys_next::{AV_NOPTS_VALUE, AV_TIME_BASE};
use image::RgbImage;

use crate::{error::FrameSeqError, metadata::VideoMetadata, utilities};

/// Seconds of video the decoder reads forward through before it prefers a
/// seek.
const FORWARD_DECODE_WINDOW_SECONDS: f64 = 2.0;

/// Anything that can hand out decoded frames by timestamp.
pub trait FrameSource {
    /// Metadata for the video stream.
    fn metadata(&self) -> &VideoMetadata;

    /// Decode the frame displayed at `timestamp_ms` milliseconds, converted
    /// to packed RGB at native resolution.
    ///
    /// # Errors
    ///
    /// Returns an error when no frame can be produced for the timestamp. The
    /// sampler records the error and moves on to the next timestamp.
    fn frame_at(&mut self, timestamp_ms: u64) -> Result<RgbImage, FrameSeqError>;
}

/// An opened video file.
///
/// Created via [`VideoFile::open`]. Holds the demuxer, a decoder for the
/// best video stream and an RGB24 converter. Everything is released when the
/// value is dropped.
///
/// # Example
///
/// ```no_run
/// use frameseq::{FrameSource, VideoFile};
///
/// let mut video = VideoFile::open("input.mp4")?;
/// println!("{:.2} seconds", video.metadata().duration());
/// video.frame_at(1500)?.save("at_1500ms.png")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct VideoFile {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    video_stream_index: usize,
    time_base: Rational,
    start_pts: i64,
    metadata: VideoMetadata,
    /// Lowest frame number reachable by decoding forward without a seek.
    next_frame_number: u64,
    end_of_stream: bool,
    file_path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("next_frame_number", &self.next_frame_number)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file for sampling.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, picks the best
    /// video stream and prepares its decoder.
    ///
    /// # Errors
    ///
    /// - [`FrameSeqError::FileOpen`] if the file cannot be opened or its
    ///   video decoder cannot be created.
    /// - [`FrameSeqError::NoVideoStream`] if the file has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameSeqError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        let open_error = |reason: String| FrameSeqError::FileOpen {
            path: file_path.clone(),
            reason,
        };

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| open_error(error.to_string()))?;

        let (video_stream_index, time_base, start_pts, frames_per_second, stream_frames, decoder) = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or(FrameSeqError::NoVideoStream)?;

            let start_time = stream.start_time();
            let start_pts = if start_time == AV_NOPTS_VALUE {
                0
            } else {
                start_time
            };

            let decoder = CodecContext::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().video())
                .map_err(|error| open_error(format!("Failed to create video decoder: {error}")))?;

            (
                stream.index(),
                stream.time_base(),
                start_pts,
                stream_frames_per_second(stream.avg_frame_rate(), stream.rate()),
                stream.frames(),
                decoder,
            )
        };

        let frame_count = if stream_frames > 0 {
            stream_frames as u64
        } else {
            // Fall back to the container duration.
            let duration_microseconds = input_context.duration();
            if duration_microseconds > 0 && frames_per_second > 0.0 {
                let seconds = duration_microseconds as f64 / AV_TIME_BASE as f64;
                (seconds * frames_per_second).round() as u64
            } else {
                0
            }
        };

        let width = decoder.width();
        let height = decoder.height();
        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|error| open_error(format!("Failed to create RGB converter: {error}")))?;

        let metadata = VideoMetadata {
            width,
            height,
            frames_per_second,
            frame_count,
            codec,
        };

        log::debug!("Video stream {video_stream_index}: {metadata:?}");

        Ok(Self {
            input_context,
            decoder,
            scaler,
            video_stream_index,
            time_base,
            start_pts,
            metadata,
            next_frame_number: 0,
            end_of_stream: false,
            file_path,
        })
    }

    /// Path the video was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Seek the demuxer to the keyframe at or before `timestamp_ms` and
    /// reset the decoder.
    fn seek(&mut self, timestamp_ms: u64) -> Result<(), FrameSeqError> {
        let start_microseconds = utilities::pts_to_seconds(self.start_pts, self.time_base)
            * AV_TIME_BASE as f64;
        let target = timestamp_ms as i64 * 1000 + start_microseconds as i64;

        self.input_context.seek(target, ..target)?;
        self.decoder.flush();
        self.end_of_stream = false;
        self.next_frame_number = 0;
        Ok(())
    }

    fn next_video_packet(&mut self) -> Option<Packet> {
        let index = self.video_stream_index;
        self.input_context
            .packets()
            .find(|(stream, _)| stream.index() == index)
            .map(|(_, packet)| packet)
    }

    /// Pull the next decoded frame, feeding packets as needed.
    ///
    /// Returns `None` once the decoder has been drained at end of stream.
    fn next_decoded_frame(&mut self) -> Result<Option<VideoFrame>, FrameSeqError> {
        let mut decoded_frame = VideoFrame::empty();
        loop {
            if self.decoder.receive_frame(&mut decoded_frame).is_ok() {
                return Ok(Some(decoded_frame));
            }
            if self.end_of_stream {
                return Ok(None);
            }

            match self.next_video_packet() {
                Some(packet) => {
                    if let Err(error) = self.decoder.send_packet(&packet) {
                        log::debug!("Dropping undecodable packet: {error}");
                    }
                }
                None => {
                    self.decoder.send_eof()?;
                    self.end_of_stream = true;
                }
            }
        }
    }

    fn frame_number(&self, frame: &VideoFrame) -> u64 {
        match frame.timestamp().or_else(|| frame.pts()) {
            Some(pts) => {
                let seconds = utilities::pts_to_seconds(pts - self.start_pts, self.time_base);
                (seconds * self.metadata.frames_per_second).round().max(0.0) as u64
            }
            None => self.next_frame_number,
        }
    }

    fn convert_frame(&mut self, frame: &VideoFrame) -> Result<RgbImage, FrameSeqError> {
        let mut rgb_frame = VideoFrame::empty();
        self.scaler.run(frame, &mut rgb_frame)?;

        let width = self.metadata.width;
        let height = self.metadata.height;
        let buffer = utilities::frame_to_buffer(&rgb_frame, width, height, 3);
        RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            FrameSeqError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }
}

impl FrameSource for VideoFile {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn frame_at(&mut self, timestamp_ms: u64) -> Result<RgbImage, FrameSeqError> {
        let frames_per_second = self.metadata.frames_per_second;
        let target_frame = (timestamp_ms as f64 / 1000.0 * frames_per_second).round() as u64;
        let window = (frames_per_second * FORWARD_DECODE_WINDOW_SECONDS).max(1.0) as u64;

        if target_frame < self.next_frame_number
            || target_frame - self.next_frame_number > window
        {
            self.seek(timestamp_ms)?;
        }

        while let Some(decoded_frame) = self.next_decoded_frame()? {
            let current_frame_number = self.frame_number(&decoded_frame);
            self.next_frame_number = current_frame_number + 1;

            // A seek may land past the target; take the first frame at or
            // after it.
            if current_frame_number >= target_frame {
                return self.convert_frame(&decoded_frame);
            }
        }

        Err(FrameSeqError::VideoDecodeError(format!(
            "Reached end of stream before {timestamp_ms} ms"
        )))
    }
}

/// Frames per second from a stream's average frame rate, falling back to its
/// real base rate.
fn stream_frames_per_second(average: Rational, base: Rational) -> f64 {
    [average, base]
        .into_iter()
        .find(|rate| rate.numerator() > 0 && rate.denominator() > 0)
        .map_or(0.0, |rate| {
            rate.numerator() as f64 / rate.denominator() as f64
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rate_wins() {
        let rate = stream_frames_per_second(Rational::new(30000, 1001), Rational::new(60, 1));
        assert!((rate - 29.97).abs() < 0.001);
    }

    #[test]
    fn falls_back_to_base_rate() {
        let rate = stream_frames_per_second(Rational::new(0, 0), Rational::new(25, 1));
        assert_eq!(rate, 25.0);
    }

    #[test]
    fn unknown_rate_is_zero() {
        let rate = stream_frames_per_second(Rational::new(0, 1), Rational::new(0, 0));
        assert_eq!(rate, 0.0);
    }
}
