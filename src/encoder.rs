//! Still-image encoding for sampled frames.
//!
//! Frames leave the decoder as [`RgbImage`] values. This module resizes them
//! when a resolution scale is configured and encodes them to a lossy format:
//! WebP through `libwebp` (the `webp` crate) or JPEG through the `image`
//! crate.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    path::Path,
};

use image::{
    ExtendedColorType, ImageEncoder, RgbImage,
    codecs::jpeg::JpegEncoder,
    imageops::{self, FilterType},
};

use crate::error::FrameSeqError;

/// Output image format for sampled frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Lossy WebP. This is the default.
    #[default]
    WebP,
    /// Baseline JPEG.
    Jpeg,
}

impl ImageFormat {
    /// File extension used for frames in this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::WebP => "webp",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// Parse a format from a file extension or format name.
    ///
    /// Case-insensitive; a leading dot is ignored.
    ///
    /// ```
    /// use frameseq::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_extension(".WEBP"), Some(ImageFormat::WebP));
    /// assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
    /// assert_eq!(ImageFormat::from_extension("png"), None);
    /// ```
    pub fn from_extension(value: &str) -> Option<Self> {
        match value.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "webp" => Some(ImageFormat::WebP),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImageFormat::WebP => write!(f, "WebP"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Resize a frame to exactly `width` x `height` with bilinear filtering.
///
/// Returns a copy unchanged in size when the dimensions already match.
pub fn resize_frame(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Encode a frame into an in-memory buffer.
///
/// `quality` is in `0..=100`; larger values mean better quality and bigger
/// files.
///
/// # Errors
///
/// Returns [`FrameSeqError::ImageEncodeError`] if WebP encoding fails, or
/// [`FrameSeqError::ImageError`] if JPEG encoding fails.
pub fn encode_frame(
    image: &RgbImage,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, FrameSeqError> {
    let (width, height) = image.dimensions();
    let quality = quality.min(100);

    match format {
        ImageFormat::WebP => {
            let encoder = webp::Encoder::from_rgb(image.as_raw(), width, height);
            let memory = encoder
                .encode_simple(false, f32::from(quality))
                .map_err(|error| FrameSeqError::ImageEncodeError(format!("WebP: {error:?}")))?;
            Ok(memory.to_vec())
        }
        ImageFormat::Jpeg => {
            let mut buffer = Vec::new();
            JpegEncoder::new_with_quality(&mut buffer, quality.max(1)).write_image(
                image.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
            Ok(buffer)
        }
    }
}

/// Encode a frame and write it to `path`, returning the number of bytes
/// written.
///
/// # Errors
///
/// Returns errors from [`encode_frame`], or [`FrameSeqError::IoError`] if the
/// file cannot be written.
pub fn write_frame<P: AsRef<Path>>(
    image: &RgbImage,
    path: P,
    format: ImageFormat,
    quality: u8,
) -> Result<u64, FrameSeqError> {
    let bytes = encode_frame(image, format, quality)?;
    fs::write(path.as_ref(), &bytes)?;
    Ok(bytes.len() as u64)
}
