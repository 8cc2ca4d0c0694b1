//! Progress reporting for frame sampling.
//!
//! The sampler feeds a [`ProgressCallback`] with [`ProgressInfo`] snapshots,
//! throttled to at most one report per progress interval (one second of
//! wall-clock time by default) plus a final report when the loop ends.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use frameseq::{ProgressCallback, ProgressInfo, SamplerConfig};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:.1}% complete", info.percentage);
//!     }
//! }
//!
//! let config = SamplerConfig::new("input.mp4", "frames")
//!     .with_progress(Arc::new(PrintProgress));
//! ```

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// A snapshot of sampling progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Timestamps processed so far, successful or not.
    pub completed: u64,
    /// Frames written successfully so far.
    pub extracted: u64,
    /// Total timestamps in the (capped) sample plan.
    pub total: u64,
    /// Completion percentage (0.0 – 100.0).
    pub percentage: f32,
    /// Wall-clock time elapsed since sampling started.
    pub elapsed: Duration,
    /// Processing throughput in frames per second of wall-clock time.
    pub frames_per_second: f64,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
    /// The timestamp (seconds) most recently processed.
    pub current_timestamp: Option<f64>,
}

/// Trait for receiving progress updates during sampling.
///
/// Implementations must be [`Send`] and [`Sync`] so a callback can be shared
/// through an [`Arc`] between the config and the caller.
pub trait ProgressCallback: Send + Sync {
    /// Called at most once per progress interval, and once at the end.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Logs one `info` line per report through the [`log`] facade.
///
/// ```text
/// Progress: 42.0% (126/300) | Speed: 61.3 fps | ETA: 2.8 seconds
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        let eta = info
            .estimated_remaining
            .map_or(0.0, |remaining| remaining.as_secs_f64());
        log::info!(
            "Progress: {:.1}% ({}/{}) | Speed: {:.1} fps | ETA: {:.1} seconds",
            info.percentage,
            info.completed,
            info.total,
            info.frames_per_second,
            eta,
        );
    }
}

/// Tracks progress timing and fires the callback when the interval elapses.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: u64,
    completed: u64,
    extracted: u64,
    interval: Duration,
    start_time: Instant,
    last_report: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, total: u64, interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            callback,
            total,
            completed: 0,
            extracted: 0,
            interval,
            start_time: now,
            last_report: now,
        }
    }

    /// Record one processed timestamp and report if the interval has passed.
    pub(crate) fn advance(&mut self, extracted: bool, timestamp: f64) {
        self.completed += 1;
        if extracted {
            self.extracted += 1;
        }

        let now = Instant::now();
        if now.duration_since(self.last_report) >= self.interval {
            self.report(now, Some(timestamp));
            self.last_report = now;
        }
    }

    /// Unconditionally emit a final progress report.
    pub(crate) fn finish(&mut self) {
        self.report(Instant::now(), None);
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn report(&self, now: Instant, timestamp: Option<f64>) {
        let elapsed = now.duration_since(self.start_time);
        let seconds = elapsed.as_secs_f64();

        let percentage = if self.total > 0 {
            (self.completed as f32 / self.total as f32) * 100.0
        } else {
            100.0
        };

        let frames_per_second = if seconds > 0.0 {
            self.completed as f64 / seconds
        } else {
            0.0
        };

        let estimated_remaining = (frames_per_second > 0.0).then(|| {
            let remaining = self.total.saturating_sub(self.completed);
            Duration::from_secs_f64(remaining as f64 / frames_per_second)
        });

        let info = ProgressInfo {
            completed: self.completed,
            extracted: self.extracted,
            total: self.total,
            percentage,
            elapsed,
            frames_per_second,
            estimated_remaining,
            current_timestamp: timestamp,
        };

        self.callback.on_progress(&info);
    }
}
