//! Image file I/O for the command-line tool.
//!
//! Decoding goes through RGBA so every format reduces to luminance the same
//! way; see [`luminance_u8`].

use std::path::Path;

use image::GrayImage;
use ndarray::{Array2, Array3};
use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::filters::grayscale::luminance_u8;

/// Decode an image file into a (height, width) luminance plane.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> FilterResult<Array2<u8>> {
    let path = path.as_ref();
    let rgba = image::open(path)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(path = %path.display(), width, height, "decoded image");

    let pixels = Array3::from_shape_vec((height as usize, width as usize, 4), rgba.into_raw())?;
    luminance_u8(pixels.view())
}

/// Encode a luminance plane as an 8-bit grayscale file.
///
/// The format follows the path extension.
pub fn save_grayscale<P: AsRef<Path>>(path: P, image: &Array2<u8>) -> FilterResult<()> {
    let path = path.as_ref();
    let (height, width) = image.dim();

    let raw: Vec<u8> = image.iter().copied().collect();
    let gray = GrayImage::from_raw(width as u32, height as u32, raw).ok_or_else(|| {
        FilterError::InvalidInput(format!("buffer does not fit {}x{}", width, height))
    })?;
    gray.save(path)?;

    debug!(path = %path.display(), width, height, "encoded image");
    Ok(())
}
