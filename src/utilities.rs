//! Internal helpers shared by the sampler, the video source and the manifest
//! writer.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from an FFmpeg video frame into a tightly-packed buffer,
/// dropping any per-row padding.
pub(crate) fn frame_to_buffer(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = (width as usize) * bytes_per_pixel;
    let data = video_frame.data(0);

    if stride == row_length {
        return data[..row_length * (height as usize)].to_vec();
    }

    data.chunks(stride)
        .take(height as usize)
        .flat_map(|row| &row[..row_length])
        .copied()
        .collect()
}

/// Rescale a PTS value from a stream time base to seconds.
pub(crate) fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// File name for the frame at `index` in the sample plan.
///
/// ```
/// use frameseq::{ImageFormat, frame_file_name};
///
/// assert_eq!(frame_file_name(7, ImageFormat::WebP), "frame_0007.webp");
/// ```
pub fn frame_file_name(index: usize, format: crate::ImageFormat) -> String {
    format!("frame_{index:04}.{}", format.extension())
}

/// Regular files in `directory` whose extension equals `extension`
/// (case-insensitive), sorted by file name.
pub(crate) fn list_files_with_extension(
    directory: &Path,
    extension: &str,
) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|value| value.to_str())
            .is_some_and(|value| value.eq_ignore_ascii_case(extension));
        if matches && entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
    Ok(files)
}

/// Total size in bytes of `files`. Files that vanished are counted as empty.
pub(crate) fn total_size(files: &[PathBuf]) -> u64 {
    files
        .iter()
        .filter_map(|path| fs::metadata(path).ok())
        .map(|metadata| metadata.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pts_rescale() {
        let seconds = pts_to_seconds(90_000, Rational::new(1, 90_000));
        assert!((seconds - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn listing_filters_and_sorts() {
        let directory = tempfile::tempdir().unwrap();
        for name in ["b.webp", "a.WEBP", "c.jpg", "notes.txt"] {
            fs::write(directory.path().join(name), b"x").unwrap();
        }
        fs::create_dir(directory.path().join("nested.webp")).unwrap();

        let files = list_files_with_extension(directory.path(), "webp").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.WEBP", "b.webp"]);
        assert_eq!(total_size(&files), 2);
    }

    #[test]
    fn wide_indices_keep_growing() {
        assert_eq!(frame_file_name(12345, crate::ImageFormat::Jpeg), "frame_12345.jpg");
    }
}
