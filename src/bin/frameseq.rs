use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use frameseq::{
    DEFAULT_FRAME_CAP, DEFAULT_MANIFEST_PATH, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_QUALITY,
    DEFAULT_RESOLUTION_SCALE, DEFAULT_SAMPLING_RATE, DEFAULT_VIDEO_PATH, ExtractionReport,
    FfmpegLogLevel, FrameSeqError, ImageFormat, LogProgress, ManifestOptions, ManifestOutcome,
    ProgressCallback, ProgressInfo, SamplerConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  frameseq\n  frameseq video/intro.mp4 --out frames --fps 24 --quality 80\n  frameseq input.mp4 --scale 0.5 --format jpg --prefix /static/frames --progress\n  frameseq input.mp4 --no-frame-cap --json";

#[derive(Debug, Parser)]
#[command(
    name = "frameseq",
    version,
    about = "Sample a video into numbered still images and write a JavaScript preload manifest",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    #[arg(default_value = DEFAULT_VIDEO_PATH)]
    video: PathBuf,

    /// Output directory for frame images.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIRECTORY)]
    out: PathBuf,

    /// Path of the generated manifest module.
    #[arg(long, default_value = DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,

    /// Frames sampled per second of video.
    #[arg(long, default_value_t = DEFAULT_SAMPLING_RATE)]
    fps: f64,

    /// Encoder quality (0-100).
    #[arg(long, default_value_t = DEFAULT_QUALITY)]
    quality: u8,

    /// Factor applied to the native resolution.
    #[arg(long, default_value_t = DEFAULT_RESOLUTION_SCALE)]
    scale: f64,

    /// Maximum number of frames to sample.
    #[arg(long, default_value_t = DEFAULT_FRAME_CAP)]
    frame_cap: usize,

    /// Sample the whole video regardless of length.
    #[arg(long, conflicts_with = "frame_cap")]
    no_frame_cap: bool,

    /// Output image format (webp, jpg).
    #[arg(long, default_value = "webp")]
    format: String,

    /// Prefix for manifest entries. Defaults to the --out path.
    #[arg(long)]
    prefix: Option<String>,

    /// Show a progress bar instead of progress log lines.
    #[arg(long)]
    progress: bool,

    /// Show debug logging output.
    #[arg(long)]
    verbose: bool,

    /// Print a machine-readable summary to stdout.
    #[arg(long)]
    json: bool,

    /// FFmpeg log level (quiet, fatal, error, warning, info, debug).
    #[arg(long, default_value = "error")]
    ffmpeg_log_level: String,
}

fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            let label = match record.level() {
                log::Level::Error => "error".red().bold(),
                log::Level::Warn => "warning".yellow().bold(),
                log::Level::Info => "info".cyan(),
                log::Level::Debug | log::Level::Trace => "debug".dimmed(),
            };
            out.finish(format_args!("{label}: {message}"))
        })
        .chain(std::io::stderr())
        .apply()
}

struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_length(info.total);
        self.bar.set_position(info.completed);
        let eta = info
            .estimated_remaining
            .map_or(0.0, |remaining| remaining.as_secs_f64());
        self.bar
            .set_message(format!("{:.1} fps, ETA {eta:.1}s", info.frames_per_second));
    }
}

fn print_json_summary(
    report: Option<&ExtractionReport>,
    manifest: Option<&ManifestOutcome>,
) -> Result<(), serde_json::Error> {
    let frames = report.map(|report| {
        json!({
            "duration_seconds": report.video.duration(),
            "source_fps": report.video.frames_per_second,
            "width": report.output_width,
            "height": report.output_height,
            "planned": report.outcomes.len(),
            "uncapped": report.uncapped_count,
            "extracted": report.extracted_count(),
            "failed": report.failed_count(),
            "elapsed_seconds": report.elapsed.as_secs_f64(),
            "output_bytes": report.output_bytes,
        })
    });
    let manifest = manifest.map(|outcome| match outcome {
        ManifestOutcome::Written { path, entries } => json!({
            "path": path.display().to_string(),
            "entries": entries,
        }),
        ManifestOutcome::Skipped(reason) => json!({ "skipped": format!("{reason:?}") }),
    });
    let payload = json!({ "frames": frames, "manifest": manifest });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn print_next_steps(manifest: &std::path::Path) {
    println!();
    println!("{}", "Next steps:".green().bold());
    println!(
        "1. Use {} to load frames instead of extracting them from the video at runtime",
        manifest.display()
    );
    println!("2. Update main.js to use the preloaded frames:");
    println!();
    println!("   import {{ getPreloadedFrames }} from './preloader.js';");
    println!();
    println!("   const preloadedFrames = getPreloadedFrames();");
    println!("   initSlideshow(preloadedFrames);");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let ffmpeg_level: FfmpegLogLevel = cli.ffmpeg_log_level.parse()?;
    frameseq::set_ffmpeg_log_level(ffmpeg_level);

    let image_format = ImageFormat::from_extension(&cli.format)
        .ok_or_else(|| format!("unsupported --format: {} (webp, jpg)", cli.format))?;

    let progress_bar = if cli.progress {
        Some(Arc::new(BarProgress::new()?))
    } else {
        None
    };
    let progress: Arc<dyn ProgressCallback> = match &progress_bar {
        Some(bar) => bar.clone() as Arc<dyn ProgressCallback>,
        None => Arc::new(LogProgress),
    };

    let frame_cap = (!cli.no_frame_cap).then_some(cli.frame_cap);
    let config = SamplerConfig::new(&cli.video, &cli.out)
        .with_sampling_rate(cli.fps)
        .with_quality(cli.quality)
        .with_resolution_scale(cli.scale)
        .with_frame_cap(frame_cap)
        .with_image_format(image_format)
        .with_progress(progress);

    let report = match frameseq::extract_frames(&config) {
        Ok(report) => Some(report),
        // The extractor already logged why; nothing was produced.
        Err(FrameSeqError::FileOpen { .. } | FrameSeqError::NoVideoStream) => None,
        Err(error) => return Err(error.into()),
    };

    if let Some(progress_bar) = &progress_bar {
        progress_bar.bar.finish_with_message("done");
    }

    let extracted = report.as_ref().map_or(0, ExtractionReport::extracted_count);

    let manifest = if extracted > 0 {
        let mut options = ManifestOptions::new().with_image_format(image_format);
        if let Some(prefix) = &cli.prefix {
            options = options.with_path_prefix(prefix.clone());
        }
        Some(frameseq::write_manifest(&cli.out, &cli.manifest, &options)?)
    } else {
        None
    };

    if cli.json {
        print_json_summary(report.as_ref(), manifest.as_ref())?;
    } else if let Some(ManifestOutcome::Written { path, .. }) = &manifest {
        print_next_steps(path);
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
