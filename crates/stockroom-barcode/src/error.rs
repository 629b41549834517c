//! Domain error types for barcode validation.

use thiserror::Error;

/// Errors from checksum computation.
///
/// These indicate a caller bug (wrong payload handed to the mod-10
/// routine), not bad user input; the format validator screens user input
/// before the checksum ever runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// Payload is empty or contains non-digit characters.
    #[error("Checksum payload must be a non-empty digit string")]
    InvalidPayload,
}

/// Errors from validating a barcode value against its symbology.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Value length does not match the symbology's fixed length.
    #[error("Wrong length: expected {expected} characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// Variable-length value exceeds the practical maximum.
    #[error("Value too long: {actual} characters exceeds maximum of {max}")]
    TooLong { actual: usize, max: usize },

    /// Value contains characters outside the symbology's character set.
    #[error("Invalid characters for this barcode type")]
    InvalidCharacters,

    /// Trailing check digit does not match the mod-10 computation.
    ///
    /// Carries the correct digit so callers can render a
    /// "did you mean" correction.
    #[error("Bad check digit: expected {expected}")]
    BadCheckDigit { expected: u8 },
}
