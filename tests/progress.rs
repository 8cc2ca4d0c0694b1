//! Progress reporting integration tests.

mod common;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use frameseq::{ProgressCallback, ProgressInfo, SamplerConfig, sample_frames};

use common::SyntheticVideo;

#[derive(Default)]
struct RecordingProgress {
    reports: Mutex<Vec<ProgressInfo>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.reports.lock().unwrap().push(info.clone());
    }
}

#[test]
fn every_frame_reports_with_zero_interval() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let recorder = Arc::new(RecordingProgress::default());

    let mut video = SyntheticVideo::new(8, 8, 10.0, 10).failing_at([500]);
    let config = SamplerConfig::new("synthetic.mp4", temporary_directory.path())
        .with_sampling_rate(10.0)
        .with_progress(recorder.clone())
        .with_progress_interval(Duration::ZERO);

    sample_frames(&config, &mut video).expect("Sampling failed");

    let reports = recorder.reports.lock().unwrap();
    // One per frame plus the final report.
    assert_eq!(reports.len(), 11);

    let completed: Vec<u64> = reports.iter().take(10).map(|info| info.completed).collect();
    assert_eq!(completed, (1..=10).collect::<Vec<_>>());
    assert_eq!(reports[4].current_timestamp, Some(0.4));

    let last = reports.last().unwrap();
    assert_eq!(last.total, 10);
    assert_eq!(last.completed, 10);
    assert_eq!(last.extracted, 9);
    assert!((last.percentage - 100.0).abs() < f32::EPSILON);
    assert_eq!(last.current_timestamp, None);
}

#[test]
fn long_interval_still_sends_final_report() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let recorder = Arc::new(RecordingProgress::default());

    let mut video = SyntheticVideo::new(8, 8, 10.0, 5);
    let config = SamplerConfig::new("synthetic.mp4", temporary_directory.path())
        .with_sampling_rate(10.0)
        .with_progress(recorder.clone())
        .with_progress_interval(Duration::from_secs(3600));

    sample_frames(&config, &mut video).expect("Sampling failed");

    let reports = recorder.reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].completed, 5);
}

#[test]
fn empty_plan_reports_complete() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let recorder = Arc::new(RecordingProgress::default());

    let mut video = SyntheticVideo::new(8, 8, 0.0, 0);
    let config = SamplerConfig::new("synthetic.mp4", temporary_directory.path())
        .with_progress(recorder.clone());

    sample_frames(&config, &mut video).expect("Sampling failed");

    let reports = recorder.reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].total, 0);
    assert!((reports[0].percentage - 100.0).abs() < f32::EPSILON);
}
