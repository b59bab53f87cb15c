//! Homomorphic filtering for grayscale images.
//!
//! Separates multiplicative illumination and reflectance by filtering in the
//! log-intensity domain: low spatial frequencies (uneven lighting) are damped,
//! high ones (surface detail) are boosted, and the result is stretched back to
//! the full intensity range.
//!
//! ```
//! use homomorphic_rust::{homomorphic_filter_u8, HomomorphicParams};
//! use ndarray::Array2;
//!
//! let image = Array2::<u8>::from_elem((64, 64), 128);
//! let enhanced = homomorphic_filter_u8(image.view(), &HomomorphicParams::default())?;
//! assert_eq!(enhanced.dim(), (64, 64));
//! # Ok::<(), homomorphic_rust::FilterError>(())
//! ```
//!
//! ## Image Format
//! - `u8`: (height, width), 0-255
//! - `f32`: (height, width), 0.0-1.0
//!
//! Color images must be reduced to luminance first, e.g. with
//! [`filters::grayscale::luminance_u8`].
//!
//! ## Bindings
//! - `python` feature: PyO3 module `homomorphic_rust`
//! - `wasm` feature: wasm-bindgen exports in [`wasm`]
//! - `io` / `cli` features: file I/O and the `homomorphic` binary

pub mod error;
pub mod filters;

#[cfg(feature = "io")]
pub mod io;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FilterError, FilterResult};
pub use filters::homomorphic::{
    homomorphic_filter_f32, homomorphic_filter_u8, homomorphic_filter_u8_detailed,
    HomomorphicOutput, HomomorphicParams,
};
pub use filters::normalize::Stretch;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::grayscale::{expand_gray_u8, luminance_u8};
    use crate::filters::homomorphic::{
        homomorphic_filter_f32 as filter_f32_impl, homomorphic_filter_u8 as filter_u8_impl,
        HomomorphicParams,
    };

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Homomorphic Filter
    // ========================================================================

    /// Apply homomorphic filtering to a u8 grayscale image.
    ///
    /// # Arguments
    /// * `image` - 2D array (height, width), values 0-255
    /// * `cutoff` - Butterworth cutoff radius in frequency bins (default: 30)
    /// * `order` - Butterworth order (default: 2)
    /// * `gamma_low` - Low-frequency (illumination) gain (default: 0.5)
    /// * `gamma_high` - High-frequency (detail) gain (default: 2.0)
    ///
    /// Raises `ValueError` for empty images or invalid parameters.
    #[pyfunction]
    #[pyo3(signature = (image, cutoff=30.0, order=2.0, gamma_low=0.5, gamma_high=2.0))]
    pub fn homomorphic_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        cutoff: f64,
        order: f64,
        gamma_low: f64,
        gamma_high: f64,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let params = HomomorphicParams::new(cutoff, order, gamma_low, gamma_high);
        let result = filter_u8_impl(image.as_array(), &params).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Apply homomorphic filtering to an f32 grayscale image.
    ///
    /// Input/output values are 0.0-1.0.
    #[pyfunction]
    #[pyo3(signature = (image, cutoff=30.0, order=2.0, gamma_low=0.5, gamma_high=2.0))]
    pub fn homomorphic_filter_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f32>,
        cutoff: f64,
        order: f64,
        gamma_low: f64,
        gamma_high: f64,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let params = HomomorphicParams::new(cutoff, order, gamma_low, gamma_high);
        let result = filter_f32_impl(image.as_array(), &params).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Filter the luminance of a (height, width, channels) u8 image.
    ///
    /// Output has the input's channel count with the filtered luminance in
    /// every color channel; alpha is preserved.
    #[pyfunction]
    #[pyo3(signature = (image, cutoff=30.0, order=2.0, gamma_low=0.5, gamma_high=2.0))]
    pub fn homomorphic_filter_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        cutoff: f64,
        order: f64,
        gamma_low: f64,
        gamma_high: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let params = HomomorphicParams::new(cutoff, order, gamma_low, gamma_high);

        let gray = luminance_u8(input).map_err(to_py_err)?;
        let filtered = filter_u8_impl(gray.view(), &params).map_err(to_py_err)?;
        let result = expand_gray_u8(filtered.view(), input).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Homomorphic filter Rust extension module
    #[pymodule]
    pub fn homomorphic_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(homomorphic_filter, m)?)?;
        m.add_function(wrap_pyfunction!(homomorphic_filter_f32, m)?)?;
        m.add_function(wrap_pyfunction!(homomorphic_filter_rgba, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::homomorphic_rust;
