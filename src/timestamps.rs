//! Sample timestamp planning.
//!
//! A [`SamplePlan`] is the ordered list of seek points (seconds, rounded to
//! the millisecond) at which the sampler captures frames, together with the
//! length the list had before the frame cap was applied.

/// Ordered seek points for a sampling run.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct SamplePlan {
    /// Seek points in seconds, strictly increasing.
    pub timestamps: Vec<f64>,
    /// Number of timestamps before the frame cap was applied.
    pub uncapped_count: usize,
}

impl SamplePlan {
    /// Plan timestamps for a video of `duration` seconds sampled at
    /// `sampling_rate` frames per second, truncated to `frame_cap` entries.
    ///
    /// ```
    /// use frameseq::SamplePlan;
    ///
    /// let plan = SamplePlan::new(1.0, 4.0, None);
    /// assert_eq!(plan.timestamps, vec![0.0, 0.25, 0.5, 0.75]);
    ///
    /// let capped = SamplePlan::new(10.0, 30.0, Some(100));
    /// assert_eq!(capped.len(), 100);
    /// assert_eq!(capped.uncapped_count, 300);
    /// ```
    pub fn new(duration: f64, sampling_rate: f64, frame_cap: Option<usize>) -> Self {
        let mut timestamps = sample_timestamps(duration, sampling_rate);
        let uncapped_count = timestamps.len();
        if let Some(cap) = frame_cap {
            timestamps.truncate(cap);
        }
        Self {
            timestamps,
            uncapped_count,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Whether the frame cap removed any timestamps.
    pub fn is_capped(&self) -> bool {
        self.uncapped_count > self.timestamps.len()
    }
}

/// Step from 0 (inclusive) to `duration` (exclusive) at `1 / sampling_rate`
/// seconds, rounding every value to three decimal places.
///
/// Produces `ceil(duration * sampling_rate)` entries. Returns an empty list
/// for non-positive or non-finite inputs.
pub fn sample_timestamps(duration: f64, sampling_rate: f64) -> Vec<f64> {
    let usable = |value: f64| value.is_finite() && value > 0.0;
    if !usable(duration) || !usable(sampling_rate) {
        return Vec::new();
    }

    // (300 / 29.97) * 29.97 can land a hair above 300.
    let count = (duration * sampling_rate - 1e-9).ceil().max(0.0) as usize;

    (0..count)
        .map(|index| round_to_millis(index as f64 / sampling_rate))
        .collect()
}

/// Round seconds to three decimal places.
pub fn round_to_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Convert seconds to whole milliseconds for seeking.
pub fn seconds_to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_ceiling_of_duration_times_rate() {
        assert_eq!(sample_timestamps(10.0, 30.0).len(), 300);
        assert_eq!(sample_timestamps(10.01, 30.0).len(), 301);
        assert_eq!(sample_timestamps(2.5, 1.0).len(), 3);
        assert_eq!(sample_timestamps(0.001, 30.0).len(), 1);
    }

    #[test]
    fn ntsc_duration_does_not_gain_a_frame() {
        // 300 frames at 29.97 fps, sampled at the native rate.
        let fps = 30000.0 / 1001.0;
        let duration = 300.0 / fps;
        assert_eq!(sample_timestamps(duration, fps).len(), 300);
    }

    #[test]
    fn timestamps_are_strictly_increasing_and_rounded() {
        let timestamps = sample_timestamps(60.0, 29.97);
        assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
        for value in &timestamps {
            let millis = value * 1000.0;
            assert!((millis - millis.round()).abs() < 1e-6, "{value} not rounded");
        }
        assert_eq!(timestamps[0], 0.0);
        assert_eq!(timestamps[1], 0.033);
        assert_eq!(timestamps[2], 0.067);
    }

    #[test]
    fn highest_rate_still_increases() {
        let timestamps = sample_timestamps(2.0, 1000.0);
        assert_eq!(timestamps.len(), 2000);
        assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        assert!(sample_timestamps(0.0, 30.0).is_empty());
        assert!(sample_timestamps(-3.0, 30.0).is_empty());
        assert!(sample_timestamps(10.0, 0.0).is_empty());
        assert!(sample_timestamps(f64::NAN, 30.0).is_empty());
    }

    #[test]
    fn cap_keeps_prefix() {
        let uncapped = SamplePlan::new(120.0, 30.0, None);
        let capped = SamplePlan::new(120.0, 30.0, Some(2033));
        assert_eq!(uncapped.len(), 3600);
        assert!(!uncapped.is_capped());
        assert_eq!(capped.len(), 2033);
        assert_eq!(capped.uncapped_count, 3600);
        assert!(capped.is_capped());
        assert_eq!(capped.timestamps[..], uncapped.timestamps[..2033]);
    }

    #[test]
    fn cap_above_count_is_a_no_op() {
        let plan = SamplePlan::new(10.0, 30.0, Some(2033));
        assert_eq!(plan.len(), 300);
        assert!(!plan.is_capped());
    }

    #[test]
    fn millis_conversion_rounds() {
        assert_eq!(seconds_to_millis(0.033), 33);
        assert_eq!(seconds_to_millis(1.9996), 2000);
        assert_eq!(seconds_to_millis(0.0), 0);
    }
}
