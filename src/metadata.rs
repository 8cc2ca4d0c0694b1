//! Video stream metadata.
//!
//! [`VideoMetadata`] is read once when a [`VideoFile`](crate::VideoFile) is
//! opened and drives timestamp planning and output sizing.

/// Metadata for the sampled video stream.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Native frames per second (average rate for variable-rate content).
    pub frames_per_second: f64,
    /// Total number of frames, as reported by the container or estimated
    /// from its duration.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
}

impl VideoMetadata {
    /// Duration in seconds, derived as `frame_count / frames_per_second`.
    ///
    /// Zero when the frame rate is unknown.
    ///
    /// ```
    /// use frameseq::VideoMetadata;
    ///
    /// let metadata = VideoMetadata {
    ///     width: 1280,
    ///     height: 720,
    ///     frames_per_second: 30.0,
    ///     frame_count: 300,
    ///     codec: "h264".to_string(),
    /// };
    /// assert_eq!(metadata.duration(), 10.0);
    /// ```
    pub fn duration(&self) -> f64 {
        if self.frames_per_second > 0.0 {
            self.frame_count as f64 / self.frames_per_second
        } else {
            0.0
        }
    }
}
