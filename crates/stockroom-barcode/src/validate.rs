//! Format validation for barcode values.
//!
//! Pure and idempotent: the same input always yields the same verdict.
//! Rules are applied in order: character set, length, then checksum.

use crate::checksum;
use crate::error::FormatError;
use crate::pack::PackLevel;
use crate::symbology::BarcodeType;

/// Practical maximum length for variable-length symbologies.
pub const MAX_VARIABLE_LENGTH: usize = 48;

/// Validate a candidate barcode value against its declared symbology.
pub fn validate(value: &str, barcode_type: BarcodeType) -> Result<(), FormatError> {
    let spec = barcode_type.spec();

    // 1. Character set
    if spec.uses_gtin_checksum {
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError::InvalidCharacters);
        }
    } else {
        // Code 128 family: printable ASCII, control characters rejected
        if !value.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
            return Err(FormatError::InvalidCharacters);
        }
    }

    // 2. Length
    match spec.fixed_length {
        Some(expected) => {
            if value.len() != expected {
                return Err(FormatError::WrongLength {
                    expected,
                    actual: value.len(),
                });
            }
        }
        None => {
            if value.is_empty() {
                return Err(FormatError::WrongLength {
                    expected: 1,
                    actual: 0,
                });
            }
            if value.len() > MAX_VARIABLE_LENGTH {
                return Err(FormatError::TooLong {
                    actual: value.len(),
                    max: MAX_VARIABLE_LENGTH,
                });
            }
        }
    }

    // 3. Checksum
    if spec.uses_gtin_checksum {
        // Charset and length are already established, so the only failure
        // left is a digit mismatch.
        let payload = &value[..value.len() - 1];
        let expected = checksum::compute_check_digit(payload)
            .map_err(|_| FormatError::InvalidCharacters)?;
        let actual = value.as_bytes()[value.len() - 1] - b'0';
        if expected != actual {
            return Err(FormatError::BadCheckDigit { expected });
        }
    }

    Ok(())
}

/// Extract the ITF-14 packaging indicator (the leading digit), if the value
/// is a well-formed ITF-14.
pub fn itf14_packaging_indicator(value: &str) -> Option<u8> {
    if value.len() != 14 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(value.as_bytes()[0] - b'0')
}

/// The ITF-14 packaging indicator digit conventionally used for a tier.
pub fn packaging_indicator_for(level: PackLevel) -> u8 {
    match level {
        PackLevel::Each => 0,
        PackLevel::Inner => 1,
        PackLevel::Case => 2,
        PackLevel::Pallet => 3,
    }
}

/// Best-effort GS1-128 structural recognition.
///
/// The engine never decodes Application Identifier payloads; recognizing a
/// leading AI is only used for UI hints and is never a validation failure.
pub mod gs1 {
    /// A recognized leading GS1 Application Identifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ApplicationIdentifier {
        /// The AI code, e.g. "01".
        pub code: &'static str,
        /// Human-readable meaning of the AI.
        pub title: &'static str,
    }

    /// Leading AIs this engine recognizes structurally.
    const KNOWN_AIS: &[ApplicationIdentifier] = &[
        ApplicationIdentifier { code: "00", title: "SSCC" },
        ApplicationIdentifier { code: "01", title: "GTIN" },
        ApplicationIdentifier { code: "02", title: "GTIN of contained items" },
        ApplicationIdentifier { code: "10", title: "Batch or lot number" },
        ApplicationIdentifier { code: "17", title: "Expiration date" },
        ApplicationIdentifier { code: "37", title: "Count of trade items" },
    ];

    /// Recognize a leading Application Identifier in a GS1-128 value.
    ///
    /// Accepts both the human-readable parenthesized form `(01)...` and a
    /// bare leading digit pair `01...`.
    pub fn leading_ai(value: &str) -> Option<ApplicationIdentifier> {
        let digits = if let Some(rest) = value.strip_prefix('(') {
            rest.get(..2).filter(|_| rest.as_bytes().get(2) == Some(&b')'))?
        } else {
            value.get(..2)?
        };
        KNOWN_AIS.iter().copied().find(|ai| ai.code == digits)
    }
}
