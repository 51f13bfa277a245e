//! # Error Types
//!
//! This module defines error types used throughout the ticketera library.
//!
//! The content model itself never fails: malformed input is normalized, not
//! rejected. Errors only surface at the image-loading seam of the preview.

use thiserror::Error;

/// Main error type for ticketera operations
#[derive(Debug, Error)]
pub enum TicketeraError {
    /// Image loading or decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
