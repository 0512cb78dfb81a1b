//! Error types for capture framing and demultiplexing

use thiserror::Error;

/// Fatal framing errors
///
/// Any of these means the capture is corrupted or the transient length
/// does not match the one the capture was taken with. None are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// Buffer length is not a whole number of 32-bit words
    #[error("Capture length {len} bytes is not a multiple of 4")]
    UnalignedLength { len: usize },

    /// Transient length must hold at least one sample
    #[error("Transient length must be greater than zero")]
    InvalidTransientLength,

    /// The event signature pattern never occurs in the buffer
    #[error("No event signature found in capture")]
    NoSignatureFound,

    /// A signature was expected at a computed stride but is absent
    #[error("Expected event signature at word {offset}")]
    MisalignedSignature { offset: usize },

    /// No burst boundary shows the required index increment
    #[error("No valid burst boundary found after checking {boundaries_checked} boundaries")]
    NoValidBoundary { boundaries_checked: usize },
}

/// Result type alias using FramingError
pub type FramingResult<T> = Result<T, FramingError>;
