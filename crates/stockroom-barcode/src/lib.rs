//! Barcode domain types and pure validation logic for Stockroom.
//!
//! This crate holds the side-effect-free half of the barcode engine:
//!
//! - **Symbologies**: supported barcode types, fixed lengths, permitted
//!   pack levels
//! - **Checksum**: the GTIN mod-10 check digit algorithm
//! - **Validation**: character set, length, and checksum rules per symbology
//! - **Entity**: the `Barcode` record and its status state machine
//!
//! Allocation, persistence, and lifecycle operations live in
//! `stockroom-directory`, which builds on these types.
//!
//! # Example
//!
//! ```rust
//! use stockroom_barcode::prelude::*;
//!
//! // Validate user input before submission
//! assert!(validate("4006381333931", BarcodeType::Ean13).is_ok());
//!
//! // A bad check digit comes back with the correction
//! assert_eq!(
//!     validate("4006381333930", BarcodeType::Ean13),
//!     Err(FormatError::BadCheckDigit { expected: 1 }),
//! );
//! ```

pub mod barcode;
pub mod checksum;
pub mod error;
pub mod ids;
pub mod pack;
pub mod symbology;
pub mod validate;

pub use barcode::{Barcode, BarcodeStatus};
pub use error::{ChecksumError, FormatError};
pub use ids::*;
pub use pack::PackLevel;
pub use symbology::{BarcodeType, SymbologySpec};
pub use validate::validate;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::barcode::{Barcode, BarcodeStatus};
    pub use crate::checksum::{complete, compute_check_digit, verify_check_digit};
    pub use crate::error::{ChecksumError, FormatError};
    pub use crate::ids::{BarcodeId, TenantId, UomId, VariantId};
    pub use crate::pack::PackLevel;
    pub use crate::symbology::{BarcodeType, SymbologySpec};
    pub use crate::validate::{validate, MAX_VARIABLE_LENGTH};
}
