//! 2D discrete Fourier transform helpers.
//!
//! Thin wrappers over `rustfft` that follow numpy's conventions:
//! - [`fft2`] is unnormalized, [`ifft2`] scales by `1 / (rows * cols)`
//! - [`fftshift`] moves the zero frequency to `(rows / 2, cols / 2)`
//! - [`ifftshift`] undoes it, including for odd dimensions
//!
//! The row and column passes are independent 1-D transforms and run on the
//! rayon pool. Each transform is computed by a single task, so results do
//! not depend on scheduling.

use ndarray::Array2;
use rayon::prelude::*;
use rustfft::num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

use crate::error::FilterResult;

// ============================================================================
// Transforms
// ============================================================================

/// Forward 2D DFT.
///
/// # Arguments
/// * `input` - Complex array of shape (rows, cols)
///
/// # Returns
/// Unnormalized spectrum with DC at `[0, 0]`
pub fn fft2(input: &Array2<Complex64>) -> FilterResult<Array2<Complex64>> {
    transform_2d(input, FftDirection::Forward)
}

/// Inverse 2D DFT, normalized so that `ifft2(fft2(x)) == x`.
pub fn ifft2(input: &Array2<Complex64>) -> FilterResult<Array2<Complex64>> {
    let (rows, cols) = input.dim();
    let mut output = transform_2d(input, FftDirection::Inverse)?;
    if rows * cols > 0 {
        let scale = 1.0 / (rows * cols) as f64;
        output.mapv_inplace(|c| c * scale);
    }
    Ok(output)
}

/// Separable transform: rows first, then columns via a transposed buffer.
fn transform_2d(
    input: &Array2<Complex64>,
    direction: FftDirection,
) -> FilterResult<Array2<Complex64>> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return Ok(input.clone());
    }

    let mut planner = FftPlanner::<f64>::new();
    let row_fft = planner.plan_fft(cols, direction);
    let col_fft = planner.plan_fft(rows, direction);

    // Row pass
    let mut data: Vec<Complex64> = input.iter().copied().collect();
    data.par_chunks_exact_mut(cols)
        .for_each(|row| row_fft.process(row));

    // Column pass
    let mut columns = transpose(&data, rows, cols);
    columns
        .par_chunks_exact_mut(rows)
        .for_each(|column| col_fft.process(column));

    let data = transpose(&columns, cols, rows);
    Ok(Array2::from_shape_vec((rows, cols), data)?)
}

/// Transpose a row-major (rows, cols) buffer into a row-major (cols, rows) one.
fn transpose(data: &[Complex64], rows: usize, cols: usize) -> Vec<Complex64> {
    let mut output = vec![Complex64::new(0.0, 0.0); data.len()];
    for y in 0..rows {
        for x in 0..cols {
            output[x * rows + y] = data[y * cols + x];
        }
    }
    output
}

// ============================================================================
// Quadrant Shifts
// ============================================================================

/// Move the zero-frequency term from the corner to the center.
///
/// Element `[0, 0]` lands at `[rows / 2, cols / 2]`.
pub fn fftshift<T: Clone>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    roll(input, rows / 2, cols / 2)
}

/// Inverse of [`fftshift`].
pub fn ifftshift<T: Clone>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    roll(input, rows - rows / 2, cols - cols / 2)
}

/// Cyclic shift: `output[(y + dy) % rows, (x + dx) % cols] = input[y, x]`.
fn roll<T: Clone>(input: &Array2<T>, shift_rows: usize, shift_cols: usize) -> Array2<T> {
    let (rows, cols) = input.dim();
    Array2::from_shape_fn((rows, cols), |(y, x)| {
        let sy = (y + rows - shift_rows) % rows;
        let sx = (x + cols - shift_cols) % cols;
        input[[sy, sx]].clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::f64::consts::PI;

    fn to_complex(real: &Array2<f64>) -> Array2<Complex64> {
        real.mapv(|v| Complex64::new(v, 0.0))
    }

    /// Direct O(N^2) DFT used as a reference.
    fn naive_dft(input: &Array2<Complex64>) -> Array2<Complex64> {
        let (rows, cols) = input.dim();
        Array2::from_shape_fn((rows, cols), |(u, v)| {
            let mut sum = Complex64::new(0.0, 0.0);
            for y in 0..rows {
                for x in 0..cols {
                    let angle = -2.0 * PI
                        * ((u * y) as f64 / rows as f64 + (v * x) as f64 / cols as f64);
                    sum += input[[y, x]] * Complex64::new(angle.cos(), angle.sin());
                }
            }
            sum
        })
    }

    // ========================================================================
    // Transform Tests
    // ========================================================================

    #[test]
    fn test_fft2_constant_has_only_dc() {
        let input = to_complex(&Array2::from_elem((4, 6), 0.5));
        let spectrum = fft2(&input).unwrap();

        assert_abs_diff_eq!(spectrum[[0, 0]].re, 12.0, epsilon = 1e-9);
        for ((y, x), c) in spectrum.indexed_iter() {
            if (y, x) != (0, 0) {
                assert!(c.norm() < 1e-9, "bin ({}, {}) = {}", y, x, c);
            }
        }
    }

    #[test]
    fn test_fft2_matches_naive_dft_odd_shape() {
        let real = Array2::from_shape_fn((3, 5), |(y, x)| (y * 5 + x) as f64 * 0.1 - 0.4);
        let input = to_complex(&real);

        let fast = fft2(&input).unwrap();
        let slow = naive_dft(&input);

        for (a, b) in fast.iter().zip(slow.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-9);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ifft2_recovers_signal() {
        let real = Array2::from_shape_fn((6, 7), |(y, x)| ((y * 7 + x) % 5) as f64);
        let input = to_complex(&real);

        let restored = ifft2(&fft2(&input).unwrap()).unwrap();

        for (a, b) in restored.iter().zip(input.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-9);
            assert_abs_diff_eq!(a.im, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ifft2_of_flat_spectrum_is_impulse() {
        let spectrum = Array2::from_elem((4, 4), Complex64::new(0.5, 0.0));
        let image = ifft2(&spectrum).unwrap();

        assert_abs_diff_eq!(image[[0, 0]].re, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(image[[2, 3]].re, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fft2_single_pixel() {
        let input = array![[Complex64::new(0.25, 0.0)]];
        let spectrum = fft2(&input).unwrap();
        assert_eq!(spectrum, input);
    }

    // ========================================================================
    // Shift Tests
    // ========================================================================

    #[test]
    fn test_fftshift_even() {
        let input = array![[0, 1, 2, 3]];
        assert_eq!(fftshift(&input), array![[2, 3, 0, 1]]);
    }

    #[test]
    fn test_fftshift_odd_matches_numpy() {
        let input = array![[0, 1, 2, 3, 4]];
        assert_eq!(fftshift(&input), array![[3, 4, 0, 1, 2]]);
        assert_eq!(ifftshift(&input), array![[2, 3, 4, 0, 1]]);
    }

    #[test]
    fn test_shift_places_dc_at_center() {
        for &(rows, cols) in &[(4, 4), (5, 7), (1, 3), (8, 5)] {
            let mut spectrum = Array2::<i32>::zeros((rows, cols));
            spectrum[[0, 0]] = 1;

            let shifted = fftshift(&spectrum);
            assert_eq!(shifted[[rows / 2, cols / 2]], 1, "shape ({}, {})", rows, cols);
            assert_eq!(ifftshift(&shifted), spectrum);
        }
    }
}
