//! WebAssembly exports for the homomorphic filter.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Errors
//! (bad dimensions, invalid parameters) are thrown as JS strings.

use ndarray::{Array2, Array3};
use wasm_bindgen::prelude::*;

use crate::error::FilterError;
use crate::filters::grayscale::{expand_gray_u8, luminance_u8};
use crate::filters::homomorphic::{homomorphic_filter_u8, HomomorphicParams};

fn to_js_err(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn check_len(len: usize, expected: usize) -> Result<(), JsValue> {
    if len != expected {
        return Err(to_js_err(FilterError::InvalidInput(format!(
            "expected {} bytes, got {}",
            expected, len
        ))));
    }
    Ok(())
}

// ============================================================================
// Grayscale Input
// ============================================================================

/// Apply homomorphic filtering to a gray image.
///
/// # Arguments
/// * `data` - Flat array of gray bytes (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `cutoff`, `order`, `gamma_low`, `gamma_high` - Filter parameters
///
/// # Returns
/// Flat array of filtered gray bytes
#[wasm_bindgen]
pub fn homomorphic_filter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    cutoff: f64,
    order: f64,
    gamma_low: f64,
    gamma_high: f64,
) -> Result<Vec<u8>, JsValue> {
    check_len(data.len(), width * height)?;
    let input = Array2::from_shape_vec((height, width), data.to_vec())
        .map_err(|e| to_js_err(e.into()))?;

    let params = HomomorphicParams::new(cutoff, order, gamma_low, gamma_high);
    let result = homomorphic_filter_u8(input.view(), &params).map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// RGBA Input (canvas ImageData)
// ============================================================================

/// Filter the luminance of an RGBA image, keeping alpha.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of RGBA bytes with R=G=B=filtered luminance
#[wasm_bindgen]
pub fn homomorphic_filter_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    cutoff: f64,
    order: f64,
    gamma_low: f64,
    gamma_high: f64,
) -> Result<Vec<u8>, JsValue> {
    check_len(data.len(), width * height * 4)?;
    let input = Array3::from_shape_vec((height, width, 4), data.to_vec())
        .map_err(|e| to_js_err(e.into()))?;

    let params = HomomorphicParams::new(cutoff, order, gamma_low, gamma_high);
    let gray = luminance_u8(input.view()).map_err(to_js_err)?;
    let filtered = homomorphic_filter_u8(gray.view(), &params).map_err(to_js_err)?;
    let result = expand_gray_u8(filtered.view(), input.view()).map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}
