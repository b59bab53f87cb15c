//! Filter modules for homomorphic image enhancement.
//!
//! ## Supported Formats
//!
//! The filter itself operates on single-channel images:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W) | u8 | Luminance, 0-255 |
//! | Grayscale float | (H, W) | f32 | Luminance, 0.0-1.0 |
//!
//! Color images are reduced with [`grayscale::luminance_u8`] first.
//!
//! ## Architecture
//!
//! - **homomorphic** - the filter pipeline and its parameters
//! - **fft** - 2D FFT and quadrant shifts (rayon-parallel row/column passes)
//! - **butterworth** - high-pass mask and gain envelope
//! - **normalize** - log/exp transforms and min-max stretch
//! - **grayscale** - luminance reduction and expansion
//!
//! Every function allocates its own output and keeps no state between calls.

pub mod butterworth;
pub mod fft;
pub mod grayscale;
pub mod homomorphic;
pub mod normalize;
