//! Error types for the signature widget.

use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cannot allocate a {width}x{height} surface")]
    Allocate { width: u32, height: u32 },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Signature widget errors.
///
/// Drawing never fails; these only cover host misuse, bad input data and
/// image encoding.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("Method {0} does not exist on signature")]
    UnknownOperation(String),
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("Invalid result size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Container leaves no room for the signature ({width}x{height})")]
    EmptyDisplay { width: f64, height: f64 },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Result type for signature widget operations.
pub type SignatureResult<T> = Result<T, SignatureError>;
