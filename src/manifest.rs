//! Frame manifest generation.
//!
//! The manifest is a small JavaScript module that exports a function
//! returning every frame path in order, so a page can preload the sequence
//! instead of decoding the video itself:
//!
//! ```text
//! // Preloaded frames for faster loading
//! export function getPreloadedFrames() {
//!     return [
//!         "frames/frame_0000.webp",
//!         "frames/frame_0001.webp",
//!     ];
//! }
//! ```

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use crate::{configuration::ManifestOptions, error::FrameSeqError, utilities};

/// Result of [`write_manifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    /// The manifest was written.
    Written {
        /// Where the manifest was written.
        path: PathBuf,
        /// Number of frame paths listed.
        entries: usize,
    },
    /// Nothing was written.
    Skipped(ManifestSkip),
}

/// Why a manifest was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSkip {
    /// The frames directory holds no files with the image extension.
    NoFrames,
    /// The frames directory is missing or cannot be read.
    DirectoryUnreadable(String),
}

/// List the frame paths that a manifest for `frames_directory` would hold,
/// sorted by file name.
///
/// # Errors
///
/// Returns the I/O error if the directory cannot be read.
pub fn collect_entries(
    frames_directory: &Path,
    options: &ManifestOptions,
) -> std::io::Result<Vec<String>> {
    let files =
        utilities::list_files_with_extension(frames_directory, options.image_format.extension())?;

    let prefix = match &options.path_prefix {
        Some(prefix) => prefix.clone(),
        None => frames_directory.to_string_lossy().replace('\\', "/"),
    };
    let prefix = prefix.trim_end_matches('/');

    Ok(files
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| {
            let name = name.to_string_lossy();
            if prefix.is_empty() {
                name.into_owned()
            } else {
                format!("{prefix}/{name}")
            }
        })
        .collect())
}

/// Render the manifest module for `entries`.
///
/// Entries are emitted as JSON string literals, which are valid JavaScript
/// string literals.
pub fn render_manifest(entries: &[String], function_name: &str) -> String {
    let mut content = String::new();
    content.push_str("// Preloaded frames for faster loading\n");
    let _ = writeln!(content, "export function {function_name}() {{");
    content.push_str("    return [\n");
    for entry in entries {
        let literal = serde_json::Value::from(entry.as_str()).to_string();
        let _ = writeln!(content, "        {literal},");
    }
    content.push_str("    ];\n");
    content.push_str("}\n");
    content
}

/// Scan `frames_directory` and write the manifest to `manifest_path`.
///
/// A missing directory or one without frames is logged as a warning and
/// reported as [`ManifestOutcome::Skipped`]; no file is written in that case.
/// The manifest's parent directory is created if needed.
///
/// # Errors
///
/// Returns [`FrameSeqError::IoError`] if the manifest file cannot be written.
///
/// # Example
///
/// ```no_run
/// use frameseq::{ManifestOptions, ManifestOutcome, write_manifest};
///
/// let outcome = write_manifest("frames", "js/preloader.js", &ManifestOptions::new())?;
/// if let ManifestOutcome::Written { entries, .. } = outcome {
///     println!("{entries} frames listed");
/// }
/// # Ok::<(), frameseq::FrameSeqError>(())
/// ```
pub fn write_manifest<D: AsRef<Path>, M: AsRef<Path>>(
    frames_directory: D,
    manifest_path: M,
    options: &ManifestOptions,
) -> Result<ManifestOutcome, FrameSeqError> {
    let frames_directory = frames_directory.as_ref();
    let manifest_path = manifest_path.as_ref();

    let entries = match collect_entries(frames_directory, options) {
        Ok(entries) => entries,
        Err(error) => {
            log::warn!(
                "Cannot read frames directory {}: {error}",
                frames_directory.display()
            );
            return Ok(ManifestOutcome::Skipped(ManifestSkip::DirectoryUnreadable(
                error.to_string(),
            )));
        }
    };

    if entries.is_empty() {
        log::warn!(
            "No {} files found in {}",
            options.image_format,
            frames_directory.display()
        );
        return Ok(ManifestOutcome::Skipped(ManifestSkip::NoFrames));
    }

    if let Some(parent) = manifest_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(manifest_path, render_manifest(&entries, &options.function_name))?;

    log::info!("Preloader JavaScript file created: {}", manifest_path.display());
    log::info!("It contains paths to {} preloaded frames.", entries.len());

    Ok(ManifestOutcome::Written {
        path: manifest_path.to_path_buf(),
        entries: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_expected_layout() {
        let entries = vec![
            "frames/frame_0000.webp".to_string(),
            "frames/frame_0001.webp".to_string(),
        ];
        let expected = "// Preloaded frames for faster loading\n\
                        export function getPreloadedFrames() {\n    \
                        return [\n        \
                        \"frames/frame_0000.webp\",\n        \
                        \"frames/frame_0001.webp\",\n    \
                        ];\n\
                        }\n";
        assert_eq!(render_manifest(&entries, "getPreloadedFrames"), expected);
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        let entries = vec![r#"odd "dir"\frame_0000.webp"#.to_string()];
        let rendered = render_manifest(&entries, "frames");
        assert!(rendered.contains(r#""odd \"dir\"\\frame_0000.webp","#));
    }

    #[test]
    fn empty_prefix_lists_bare_names() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("frame_0000.webp"), b"x").unwrap();
        let options = ManifestOptions::new().with_path_prefix("");
        let entries = collect_entries(directory.path(), &options).unwrap();
        assert_eq!(entries, ["frame_0000.webp"]);
    }

    #[test]
    fn custom_prefix_drops_trailing_slash() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("frame_0000.jpg"), b"x").unwrap();
        let options = ManifestOptions::new()
            .with_image_format(crate::ImageFormat::Jpeg)
            .with_path_prefix("static/frames/");
        let entries = collect_entries(directory.path(), &options).unwrap();
        assert_eq!(entries, ["static/frames/frame_0000.jpg"]);
    }
}
