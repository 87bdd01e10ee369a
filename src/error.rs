//! Error types for bnn-quantize.

use thiserror::Error;

/// Result type alias for bnn-quantize operations.
pub type Result<T> = std::result::Result<T, QuantizeError>;

/// Errors that can occur during quantizer operations.
#[derive(Debug, Error)]
pub enum QuantizeError {
    /// Invalid configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A quantizer identifier that the registry cannot resolve.
    #[error("could not interpret quantization function identifier: {0:?}")]
    UnknownQuantizer(String),

    /// Candle tensor operation error.
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),
}
