//! Luminance conversion between channel images and 2D gray planes.
//!
//! The homomorphic filter works on a single channel. These helpers reduce
//! (height, width, channels) images to that plane and put a filtered plane
//! back into the source channel layout.
//!
//! Uses ITU-R BT.709 luminosity coefficients.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - copied as is
//! - **RGB**: (height, width, 3) - weighted sum
//! - **RGBA**: (height, width, 4) - weighted sum, alpha ignored on reduction
//!   and preserved on expansion

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::error::{FilterError, FilterResult};

/// ITU-R BT.709 luminosity coefficients
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

fn check_channels(channels: usize) -> FilterResult<()> {
    match channels {
        1 | 3 | 4 => Ok(()),
        n => Err(FilterError::InvalidInput(format!(
            "expected 1, 3 or 4 channels, got {}",
            n
        ))),
    }
}

/// Reduce an image with 1, 3 or 4 channels to a u8 luminance plane.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, channels), values 0-255
///
/// # Returns
/// 2D array of shape (height, width)
pub fn luminance_u8(input: ArrayView3<u8>) -> FilterResult<Array2<u8>> {
    let (height, width, channels) = input.dim();
    check_channels(channels)?;

    if channels == 1 {
        return Ok(input.index_axis(Axis(2), 0).to_owned());
    }

    Ok(Array2::from_shape_fn((height, width), |(y, x)| {
        let r = input[[y, x, 0]] as f32;
        let g = input[[y, x, 1]] as f32;
        let b = input[[y, x, 2]] as f32;
        // Rounded so gray pixels stored as RGB come back unchanged
        (LUMA_R * r + LUMA_G * g + LUMA_B * b).round() as u8
    }))
}

/// Write a gray plane into every color channel of an image shaped like `source`.
///
/// Alpha (channel 3 of RGBA sources) is copied from `source`.
///
/// # Arguments
/// * `gray` - Filtered plane of shape (height, width)
/// * `source` - Image the plane was derived from
pub fn expand_gray_u8(gray: ArrayView2<u8>, source: ArrayView3<u8>) -> FilterResult<Array3<u8>> {
    let (height, width, channels) = source.dim();
    check_channels(channels)?;
    if gray.dim() != (height, width) {
        return Err(FilterError::InvalidInput(format!(
            "gray plane {:?} does not match source {}x{}",
            gray.dim(),
            height,
            width
        )));
    }

    let color_channels = if channels == 4 { 3 } else { channels };
    Ok(Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
        if c < color_channels {
            gray[[y, x]]
        } else {
            source[[y, x, c]]
        }
    }))
}
