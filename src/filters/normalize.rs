//! Intensity-domain transforms around the frequency stage.
//!
//! - Log compression (`ln(1 + x)`) of normalized input
//! - Exponential restore (`exp(x) - 1`) clamped to non-negative values
//! - Min-max stretch to the output range
//!
//! ## Bit Depth Support
//!
//! - **u8 (8-bit)**: input 0-255, stretched output 0-255
//! - **f32 (float)**: input 0.0-1.0, stretched output 0.0-1.0

use ndarray::{Array2, ArrayView2};

/// Arguments above this are clamped before `exp_m1` so the result stays finite.
pub const MAX_EXP_ARG: f64 = 709.0;

/// Ranges at or below this width are treated as constant.
pub const DEGENERATE_RANGE: f64 = f64::EPSILON;

/// How [`stretch_to_u8`] / [`stretch_to_unit`] mapped their input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stretch {
    /// `min` mapped to the bottom of the output range, `max` to the top
    Linear { min: f64, max: f64 },
    /// Input was (numerically) constant at `value`; output filled with zero
    Degenerate { value: f64 },
}

impl Stretch {
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Stretch::Degenerate { .. })
    }
}

// ============================================================================
// Log / Exp
// ============================================================================

/// Map u8 intensities to `ln(1 + x / 255)`.
pub fn log_compress_u8(input: ArrayView2<u8>) -> Array2<f64> {
    input.mapv(|v| (v as f64 / 255.0).ln_1p())
}

/// Map f32 intensities (clamped to 0.0-1.0) to `ln(1 + x)`.
pub fn log_compress_f32(input: ArrayView2<f32>) -> Array2<f64> {
    input.mapv(|v| (v.clamp(0.0, 1.0) as f64).ln_1p())
}

/// Invert the log compression and drop negative intensities.
///
/// Input must be finite; arguments above [`MAX_EXP_ARG`] saturate.
pub fn exp_restore(log_image: &Array2<f64>) -> Array2<f64> {
    log_image.mapv(|v| v.min(MAX_EXP_ARG).exp_m1().max(0.0))
}

// ============================================================================
// Min-Max Stretch
// ============================================================================

/// Stretch the value range to 0-255, truncating to u8.
///
/// The minimum maps to exactly 0 and the maximum to exactly 255.
/// A constant image yields all zeros and [`Stretch::Degenerate`].
pub fn stretch_to_u8(image: &Array2<f64>) -> (Array2<u8>, Stretch) {
    stretch_with(image, 0u8, |t| (t * 255.0) as u8)
}

/// Stretch the value range to 0.0-1.0.
pub fn stretch_to_unit(image: &Array2<f64>) -> (Array2<f32>, Stretch) {
    stretch_with(image, 0.0f32, |t| t as f32)
}

fn stretch_with<T: Clone>(
    image: &Array2<f64>,
    fill: T,
    map: impl Fn(f64) -> T,
) -> (Array2<T>, Stretch) {
    let (min, max) = image
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    // Also catches empty input, where range is -inf
    if !(range > DEGENERATE_RANGE) {
        let value = if min.is_finite() { min } else { 0.0 };
        return (
            Array2::from_elem(image.dim(), fill),
            Stretch::Degenerate { value },
        );
    }

    let output = image.mapv(|v| map(((v - min) / range).clamp(0.0, 1.0)));
    (output, Stretch::Linear { min, max })
}
