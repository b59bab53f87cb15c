//! Homomorphic filter: illumination/reflectance separation in the log domain.
//!
//! An image is modelled as `illumination * reflectance`. Taking the log turns
//! the product into a sum, so the slowly varying illumination lands in low
//! spatial frequencies and reflectance detail in high ones. A Butterworth
//! high-pass envelope then damps the former toward `gamma_low` and boosts the
//! latter toward `gamma_high`.
//!
//! ## Pipeline
//!
//! 1. `ln(1 + x)` of the normalized intensities
//! 2. 2D FFT, zero frequency shifted to the center
//! 3. `(gamma_high - gamma_low) * H * spectrum + gamma_low`
//! 4. Inverse shift and inverse FFT, real part kept
//! 5. `exp(x) - 1`, clamp at 0, min-max stretch
//!
//! The `gamma_low` offset in step 3 is added to every spectral coefficient,
//! not only to the mask. In the spatial domain it shows up as an impulse at
//! the origin pixel.
//!
//! ## Bit Depth Support
//!
//! - **u8 (8-bit)**: [`homomorphic_filter_u8`], output stretched to 0-255
//! - **f32 (float)**: [`homomorphic_filter_f32`], output stretched to 0.0-1.0

use ndarray::{Array2, ArrayView2};
use rustfft::num_complex::Complex64;
use tracing::debug;

use super::butterworth::{apply_gain, butterworth_high_pass};
use super::fft::{fft2, fftshift, ifft2, ifftshift};
use super::normalize::{
    exp_restore, log_compress_f32, log_compress_u8, stretch_to_u8, stretch_to_unit, Stretch,
};
use crate::error::{FilterError, FilterResult};

// ============================================================================
// Parameters
// ============================================================================

/// Tuning parameters of the homomorphic filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomomorphicParams {
    /// Butterworth cutoff radius in frequency bins (> 0)
    pub cutoff: f64,
    /// Butterworth order (>= 1); higher is a steeper roll-off
    pub order: f64,
    /// Gain applied to low frequencies (illumination), typically < 1
    pub gamma_low: f64,
    /// Gain applied to high frequencies (reflectance), typically > 1
    pub gamma_high: f64,
}

impl Default for HomomorphicParams {
    fn default() -> Self {
        Self {
            cutoff: 30.0,
            order: 2.0,
            gamma_low: 0.5,
            gamma_high: 2.0,
        }
    }
}

impl HomomorphicParams {
    pub fn new(cutoff: f64, order: f64, gamma_low: f64, gamma_high: f64) -> Self {
        Self {
            cutoff,
            order,
            gamma_low,
            gamma_high,
        }
    }

    /// Check every parameter against its domain.
    ///
    /// `gamma_high < gamma_low` is accepted; see [`Self::is_emphasis_inverted`].
    pub fn validate(&self) -> FilterResult<()> {
        require_finite("cutoff", self.cutoff)?;
        require_finite("order", self.order)?;
        require_finite("gamma_low", self.gamma_low)?;
        require_finite("gamma_high", self.gamma_high)?;

        if self.cutoff <= 0.0 {
            return Err(FilterError::InvalidParameter {
                name: "cutoff",
                value: self.cutoff,
                reason: "must be greater than 0",
            });
        }
        if self.order < 1.0 {
            return Err(FilterError::InvalidParameter {
                name: "order",
                value: self.order,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// True when low frequencies get more gain than high ones.
    pub fn is_emphasis_inverted(&self) -> bool {
        self.gamma_high < self.gamma_low
    }
}

fn require_finite(name: &'static str, value: f64) -> FilterResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn require_non_empty(rows: usize, cols: usize) -> FilterResult<()> {
    if rows == 0 || cols == 0 {
        return Err(FilterError::InvalidInput(format!(
            "image must be non-empty, got {}x{}",
            rows, cols
        )));
    }
    Ok(())
}

/// Filtered image together with how its range was stretched.
#[derive(Debug, Clone)]
pub struct HomomorphicOutput<T> {
    pub image: Array2<T>,
    pub stretch: Stretch,
}

// ============================================================================
// 8-bit (u8) Implementation
// ============================================================================

/// Apply homomorphic filtering to a u8 grayscale image.
///
/// # Arguments
/// * `input` - 2D array view of shape (height, width), values 0-255
/// * `params` - Filter parameters, see [`HomomorphicParams::default`]
///
/// # Returns
/// New image of the same shape spanning 0-255. If the filtered range
/// collapses to a constant, every pixel is 0.
pub fn homomorphic_filter_u8(
    input: ArrayView2<u8>,
    params: &HomomorphicParams,
) -> FilterResult<Array2<u8>> {
    homomorphic_filter_u8_detailed(input, params).map(|output| output.image)
}

/// Same as [`homomorphic_filter_u8`], also reporting the stretch outcome.
pub fn homomorphic_filter_u8_detailed(
    input: ArrayView2<u8>,
    params: &HomomorphicParams,
) -> FilterResult<HomomorphicOutput<u8>> {
    params.validate()?;
    let (rows, cols) = input.dim();
    require_non_empty(rows, cols)?;

    debug!(
        rows,
        cols,
        cutoff = params.cutoff,
        order = params.order,
        gamma_low = params.gamma_low,
        gamma_high = params.gamma_high,
        "homomorphic filter (u8)"
    );

    let restored = filter_log_domain(&log_compress_u8(input), params)?;
    let (image, stretch) = stretch_to_u8(&restored);
    debug!(?stretch, "output stretched");

    Ok(HomomorphicOutput { image, stretch })
}

// ============================================================================
// Float (f32) Implementation
// ============================================================================

/// Apply homomorphic filtering to an f32 grayscale image.
///
/// # Arguments
/// * `input` - 2D array view of shape (height, width), values 0.0-1.0
///   (out-of-range values are clamped)
/// * `params` - Filter parameters
///
/// # Returns
/// New image of the same shape spanning 0.0-1.0
pub fn homomorphic_filter_f32(
    input: ArrayView2<f32>,
    params: &HomomorphicParams,
) -> FilterResult<Array2<f32>> {
    params.validate()?;
    let (rows, cols) = input.dim();
    require_non_empty(rows, cols)?;
    if input.iter().any(|v| !v.is_finite()) {
        return Err(FilterError::InvalidInput(
            "image contains non-finite samples".to_string(),
        ));
    }

    debug!(
        rows,
        cols,
        cutoff = params.cutoff,
        order = params.order,
        gamma_low = params.gamma_low,
        gamma_high = params.gamma_high,
        "homomorphic filter (f32)"
    );

    let restored = filter_log_domain(&log_compress_f32(input), params)?;
    let (image, stretch) = stretch_to_unit(&restored);
    debug!(?stretch, "output stretched");

    Ok(image)
}

// ============================================================================
// Frequency Stage
// ============================================================================

/// Run the frequency-domain stages on a log-compressed image.
///
/// Covers everything between log compression and the final stretch:
/// forward FFT, gain shaping, inverse FFT and exponential restore.
/// Returned intensities are finite and non-negative.
pub fn filter_log_domain(
    log_image: &Array2<f64>,
    params: &HomomorphicParams,
) -> FilterResult<Array2<f64>> {
    let (rows, cols) = log_image.dim();
    if params.is_emphasis_inverted() {
        debug!("gamma_high < gamma_low, emphasis inverted");
    }

    let spectrum = fftshift(&fft2(&log_image.mapv(|v| Complex64::new(v, 0.0)))?);

    let mask = butterworth_high_pass(rows, cols, params.cutoff, params.order);
    let shaped = apply_gain(&spectrum, &mask, params.gamma_low, params.gamma_high)?;
    if shaped.iter().any(|c| !c.re.is_finite() || !c.im.is_finite()) {
        return Err(FilterError::NumericOverflow {
            stage: "gain shaping",
        });
    }

    let filtered = ifft2(&ifftshift(&shaped))?.mapv(|c| c.re);
    if filtered.iter().any(|v| !v.is_finite()) {
        return Err(FilterError::NumericOverflow {
            stage: "inverse transform",
        });
    }

    Ok(exp_restore(&filtered))
}
