//! Benchmarks for sample planning, encoding and manifest rendering.
//!
//! Run with: cargo bench
//!
//! The extraction benchmark needs `tests/fixtures/sample_video.mp4` from
//! `tests/fixtures/generate_fixtures.sh` and is skipped without it.

use std::{hint::black_box, path::Path, time::Duration};

use criterion::{BenchmarkId, Criterion};
use frameseq::{
    FfmpegLogLevel, ImageFormat, SamplePlan, SamplerConfig, encoder, extract_frames,
    frame_file_name, manifest::render_manifest, set_ffmpeg_log_level,
};
use image::{Rgb, RgbImage};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn benchmark_sample_plan(criterion: &mut Criterion) {
    criterion.bench_function("plan 10 minutes at 30 fps (capped)", |bencher| {
        bencher.iter(|| SamplePlan::new(black_box(600.0), black_box(30.0), Some(2033)));
    });

    criterion.bench_function("plan 10 minutes at 30 fps (uncapped)", |bencher| {
        bencher.iter(|| SamplePlan::new(black_box(600.0), black_box(30.0), None));
    });
}

fn benchmark_encoding(criterion: &mut Criterion) {
    let frame = gradient(640, 360);
    let mut group = criterion.benchmark_group("encode 640x360");

    for format in [ImageFormat::WebP, ImageFormat::Jpeg] {
        for quality in [60u8, 90] {
            group.bench_with_input(
                BenchmarkId::new(format.to_string(), quality),
                &quality,
                |bencher, &quality| {
                    bencher.iter(|| encoder::encode_frame(&frame, format, quality).unwrap());
                },
            );
        }
    }

    group.finish();

    criterion.bench_function("resize 1920x1080 to half", |bencher| {
        let frame = gradient(1920, 1080);
        bencher.iter(|| encoder::resize_frame(&frame, 960, 540));
    });
}

fn benchmark_manifest(criterion: &mut Criterion) {
    let entries: Vec<String> = (0..2033)
        .map(|index| format!("frames/{}", frame_file_name(index, ImageFormat::WebP)))
        .collect();

    criterion.bench_function("render manifest (2033 entries)", |bencher| {
        bencher.iter(|| render_manifest(black_box(&entries), "getPreloadedFrames"));
    });
}

fn benchmark_extraction(criterion: &mut Criterion) {
    set_ffmpeg_log_level(FfmpegLogLevel::Error);

    if !Path::new(SAMPLE_VIDEO).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    let mut group = criterion.benchmark_group("extract sample video");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    for rate in [5.0, 30.0] {
        group.bench_with_input(BenchmarkId::from_parameter(rate), &rate, |bencher, &rate| {
            bencher.iter(|| {
                let output = tempfile::tempdir().unwrap();
                let config = SamplerConfig::new(SAMPLE_VIDEO, output.path())
                    .with_sampling_rate(rate)
                    .with_resolution_scale(0.5);
                extract_frames(&config).unwrap()
            });
        });
    }

    group.finish();
}

criterion::criterion_group!(
    benches,
    benchmark_sample_plan,
    benchmark_encoding,
    benchmark_manifest,
    benchmark_extraction,
);
criterion::criterion_main!(benches);
