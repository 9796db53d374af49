use thiserror::Error;

/// Errors returned by the embedding map pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// A vector's length differs from the first vector's length.
    #[error("dimension mismatch at vector {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Index of the offending vector.
        index: usize,
        /// Length of the first vector.
        expected: usize,
        /// Length of the offending vector.
        found: usize,
    },

    /// A vector contains NaN or an infinity.
    #[error("non-finite value at vector {index}, component {component}")]
    NonFinite {
        /// Index of the offending vector.
        index: usize,
        /// Position of the offending value within the vector.
        component: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A `color_by` selector that names no known field.
    #[error("unknown color_by selector {0:?} (expected artist, year, medium, cluster or none)")]
    UnknownColorBy(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
