use std::{env, path::PathBuf};

// Linking is handled by ffmpeg-sys-next and libwebp-sys. This script only
// points Windows users at a vcpkg FFmpeg when discovery is likely to fail.
fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows")
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Some(vcpkg_root) = env::var_os("VCPKG_ROOT") else {
        println!(
            "cargo:warning=frameseq: FFMPEG_DIR is not set. Install FFmpeg with vcpkg (`vcpkg install ffmpeg`) and set FFMPEG_DIR to its install prefix."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let prefix = PathBuf::from(vcpkg_root).join("installed").join(&triplet);

    if prefix.join("include").join("libavformat").exists() {
        println!(
            "cargo:warning=frameseq: found FFmpeg headers under {0}; set FFMPEG_DIR={0} to use them.",
            prefix.display()
        );
    } else {
        println!(
            "cargo:warning=frameseq: no FFmpeg found for triplet {triplet} under {}.",
            prefix.display()
        );
    }
}
