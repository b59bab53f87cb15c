//! Error types for the homomorphic filter.
//!
//! Parameter and input problems are reported before any computation starts.
//! A degenerate output range is not an error; see
//! [`Stretch`](crate::filters::normalize::Stretch).

use thiserror::Error;

/// Errors that can occur while filtering an image.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Image is empty, malformed, or its buffer does not match its shape
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A tuning parameter is out of its accepted domain
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        /// Parameter name as exposed to callers
        name: &'static str,
        /// Offending value
        value: f64,
        /// What the parameter must satisfy
        reason: &'static str,
    },

    /// Intermediate data became non-finite
    #[error("numeric overflow during {stage}")]
    NumericOverflow {
        /// Pipeline stage where the overflow was detected
        stage: &'static str,
    },

    /// Array reshape failed
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Image decoding or encoding failed
    #[cfg(feature = "io")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error
    #[cfg(feature = "io")]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
