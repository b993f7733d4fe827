// Gets the base image into memory. Decoding is the one operation that is
// allowed to fail hard; nothing selection-related runs until it succeeds.
// Visual expectation: after `load_image` returns, the window opens at the
// image's native size showing it unmodified.

use crate::error::Error;
use crate::types::{pack, PixelBuffer};
use std::path::{Path, PathBuf};

/// Decode an image file into a packed-u32 RGBA buffer.
pub fn load_image(path: &Path) -> Result<PixelBuffer, Error> {
    let img = image::open(path).map_err(|e| Error::ImageLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    // Whatever the file's native format, we normalize to 8-bit RGBA.
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
    for p in rgba.pixels() {
        pixels.push(pack(p[0], p[1], p[2], p[3]));
    }

    log::info!("loaded {} ({w}x{h})", path.display());
    Ok(PixelBuffer { width: w as usize, height: h as usize, pixels })
}

/// Ask the user for an image file with the native open dialog.
/// Visual: the OS file picker appears; cancelling it quits the program
/// before any window opens.
pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
        .set_title("Choose an image to edit")
        .pick_file()
}
