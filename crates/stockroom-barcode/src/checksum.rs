//! GTIN mod-10 check digit computation.
//!
//! One algorithm covers the whole GTIN family (UPC-A, UPC-E, EAN-13,
//! EAN-8, ITF-14); only the payload length differs between symbologies.

use crate::error::ChecksumError;

/// Compute the mod-10 check digit for a digit payload.
///
/// Digits are weighted 3 and 1 alternately starting from the rightmost
/// payload digit (rightmost weight 3); the check digit is
/// `(10 - sum % 10) % 10`.
pub fn compute_check_digit(payload: &str) -> Result<u8, ChecksumError> {
    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChecksumError::InvalidPayload);
    }

    let mut sum: u32 = 0;
    let mut odd = true;
    for b in payload.bytes().rev() {
        let digit = (b - b'0') as u32;
        sum += if odd { digit * 3 } else { digit };
        odd = !odd;
    }

    Ok(((10 - (sum % 10)) % 10) as u8)
}

/// Verify the trailing check digit of a complete GTIN value.
///
/// Recomputes over all but the last digit and compares.
pub fn verify_check_digit(value: &str) -> Result<bool, ChecksumError> {
    if value.len() < 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChecksumError::InvalidPayload);
    }

    let (payload, check) = value.split_at(value.len() - 1);
    let expected = compute_check_digit(payload)?;
    let actual = check.as_bytes()[0] - b'0';
    Ok(expected == actual)
}

/// Append the computed check digit to a payload, yielding a complete GTIN.
pub fn complete(payload: &str) -> Result<String, ChecksumError> {
    let check = compute_check_digit(payload)?;
    Ok(format!("{payload}{check}"))
}
