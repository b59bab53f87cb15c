//! Butterworth high-pass mask and spectral gain shaping.
//!
//! The mask is defined on a center-shifted spectrum: distance is measured
//! from `(rows / 2, cols / 2)`, where [`fftshift`](super::fft::fftshift)
//! puts the zero frequency.
//!
//! ```text
//! H(D) = 1 / (1 + (cutoff / (D + eps))^(2 * order))
//! ```
//!
//! H is ~0 at the center and rises monotonically toward 1.

use ndarray::{Array2, Zip};
use rustfft::num_complex::Complex64;

use crate::error::{FilterError, FilterResult};

/// Added to the distance so the center bin does not divide by zero.
pub const DISTANCE_EPSILON: f64 = 1e-5;

/// Euclidean distance of every bin from the spectrum center.
///
/// # Arguments
/// * `rows` - Spectrum height
/// * `cols` - Spectrum width
///
/// # Returns
/// Array of shape (rows, cols) with `sqrt(u^2 + v^2)` where
/// `u = row - rows / 2` and `v = col - cols / 2`
pub fn distance_grid(rows: usize, cols: usize) -> Array2<f64> {
    let center_y = (rows / 2) as f64;
    let center_x = (cols / 2) as f64;

    Array2::from_shape_fn((rows, cols), |(y, x)| {
        let u = y as f64 - center_y;
        let v = x as f64 - center_x;
        (u * u + v * v).sqrt()
    })
}

/// Build a Butterworth high-pass mask for a center-shifted spectrum.
///
/// Values are always finite and within [0, 1]. If the power term overflows
/// (very high `order` near the center), the bin is fully attenuated.
///
/// # Arguments
/// * `rows` - Spectrum height
/// * `cols` - Spectrum width
/// * `cutoff` - Radius where H = 0.5 (in frequency bins, > 0)
/// * `order` - Roll-off steepness (>= 1)
pub fn butterworth_high_pass(rows: usize, cols: usize, cutoff: f64, order: f64) -> Array2<f64> {
    let exponent = 2.0 * order;
    distance_grid(rows, cols).mapv(|d| butterworth_response(d, cutoff, exponent))
}

#[inline]
fn butterworth_response(distance: f64, cutoff: f64, exponent: f64) -> f64 {
    let term = (cutoff / (distance + DISTANCE_EPSILON)).powf(exponent);
    if !term.is_finite() {
        return 0.0;
    }
    (1.0 / (1.0 + term)).clamp(0.0, 1.0)
}

/// Apply the homomorphic gain envelope to a center-shifted spectrum.
///
/// Computes `(gamma_high - gamma_low) * H * spectrum + gamma_low` per bin.
/// The real offset is added to every coefficient, DC included.
///
/// # Arguments
/// * `spectrum` - Center-shifted spectrum
/// * `mask` - High-pass mask of the same shape
/// * `gamma_low` - Gain toward which low frequencies are pulled
/// * `gamma_high` - Gain reached by high frequencies
pub fn apply_gain(
    spectrum: &Array2<Complex64>,
    mask: &Array2<f64>,
    gamma_low: f64,
    gamma_high: f64,
) -> FilterResult<Array2<Complex64>> {
    if spectrum.dim() != mask.dim() {
        return Err(FilterError::InvalidInput(format!(
            "mask shape {:?} does not match spectrum shape {:?}",
            mask.dim(),
            spectrum.dim()
        )));
    }

    let gain = gamma_high - gamma_low;
    let mut output = spectrum.clone();
    Zip::from(&mut output).and(mask).for_each(|s, &h| {
        *s = *s * (gain * h) + gamma_low;
    });
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // ========================================================================
    // Mask Tests
    // ========================================================================

    #[test]
    fn test_distance_grid_center_is_zero() {
        let d = distance_grid(5, 8);
        assert_eq!(d[[2, 4]], 0.0);
        assert_relative_eq!(d[[0, 0]], (4.0f64 + 16.0).sqrt());
        assert_relative_eq!(d[[4, 7]], (4.0f64 + 9.0).sqrt());
    }

    #[test]
    fn test_mask_zero_at_center() {
        for &(rows, cols) in &[(64, 64), (7, 9), (1, 1), (2, 3)] {
            for &(cutoff, order) in &[(30.0, 2.0), (5.0, 1.0), (0.5, 3.0), (30.0, 1.5)] {
                let h = butterworth_high_pass(rows, cols, cutoff, order);
                assert!(
                    h[[rows / 2, cols / 2]] < 1e-8,
                    "H(center) = {} for cutoff={} order={}",
                    h[[rows / 2, cols / 2]],
                    cutoff,
                    order
                );
            }
        }
    }

    #[test]
    fn test_mask_half_power_at_cutoff() {
        let h = butterworth_high_pass(1, 81, 20.0, 2.0);
        // Column 60 is 20 bins from the center at 40
        assert_abs_diff_eq!(h[[0, 60]], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_mask_monotonic_with_distance() {
        let (rows, cols) = (33, 48);
        let d = distance_grid(rows, cols);
        let h = butterworth_high_pass(rows, cols, 10.0, 2.0);

        let mut pairs: Vec<(f64, f64)> = d.iter().copied().zip(h.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        for w in pairs.windows(2) {
            assert!(w[1].1 >= w[0].1, "H decreased from {:?} to {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn test_mask_approaches_one() {
        let h = butterworth_high_pass(1, 4001, 30.0, 2.0);
        assert!(h[[0, 0]] > 0.999_99);
        assert!(h[[0, 4000]] > 0.999_99);
        assert!(h[[0, 0]] <= 1.0);
    }

    #[test]
    fn test_mask_extreme_order_stays_finite() {
        let h = butterworth_high_pass(64, 64, 30.0, 500.0);
        assert!(h.iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v)));
        assert_eq!(h[[32, 32]], 0.0);
        assert_eq!(h[[0, 0]], 1.0);
    }

    // ========================================================================
    // Gain Tests
    // ========================================================================

    #[test]
    fn test_apply_gain_blends_affine() {
        let spectrum = Array2::from_elem((1, 2), Complex64::new(2.0, -1.0));
        let mask = ndarray::array![[0.0, 1.0]];

        let out = apply_gain(&spectrum, &mask, 0.5, 2.0).unwrap();

        // H = 0: only the offset survives
        assert_abs_diff_eq!(out[[0, 0]].re, 0.5);
        assert_abs_diff_eq!(out[[0, 0]].im, 0.0);
        // H = 1: 1.5 * (2 - i) + 0.5
        assert_abs_diff_eq!(out[[0, 1]].re, 3.5);
        assert_abs_diff_eq!(out[[0, 1]].im, -1.5);
    }

    #[test]
    fn test_apply_gain_shape_mismatch() {
        let spectrum = Array2::from_elem((2, 2), Complex64::new(1.0, 0.0));
        let mask = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            apply_gain(&spectrum, &mask, 0.5, 2.0),
            Err(FilterError::InvalidInput(_))
        ));
    }
}
