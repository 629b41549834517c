//! Error types for allocation, lifecycle, and directory operations.

use stockroom_barcode::barcode::BarcodeStatus;
use stockroom_barcode::error::FormatError;
use stockroom_barcode::pack::PackLevel;
use stockroom_barcode::symbology::BarcodeType;
use thiserror::Error;

/// Errors from the persistence collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The value is already assigned within the tenant.
    #[error("Barcode value already exists: {0}")]
    DuplicateValue(String),

    /// No barcode with the given id in the tenant.
    #[error("Barcode not found: {0}")]
    NotFound(String),
}

/// Errors from generating new barcode values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The symbology may not be assigned at the requested pack level.
    #[error("{barcode_type:?} is not supported at pack level {pack_level:?}")]
    PackLevelNotSupported {
        barcode_type: BarcodeType,
        pack_level: PackLevel,
    },

    /// Variable-length symbologies need a caller-supplied value or template.
    #[error("{0:?} values must be entered manually or generated from a template")]
    ManualEntryRequired(BarcodeType),

    /// Every candidate within the retry budget collided with an existing value.
    #[error("Could not find an unused value in {attempts} attempts")]
    ExhaustedAttempts { attempts: u32 },
}

/// Errors from lifecycle transitions and primary-flag management.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The requested status change is not in the transition table.
    #[error("Illegal transition from {from:?} to {to:?}")]
    IllegalTransition {
        from: BarcodeStatus,
        to: BarcodeStatus,
    },

    /// Only reserved or active barcodes may carry the primary flag.
    #[error("Barcode in status {0:?} cannot be primary")]
    CannotBePrimary(BarcodeStatus),

    /// No barcode with the given id in the tenant.
    #[error("Barcode not found: {0}")]
    NotFound(String),
}

/// Errors surfaced by the directory facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The value is already assigned within the tenant.
    #[error("Barcode value already exists: {0}")]
    DuplicateValue(String),

    /// Deleting this barcode would leave its pack level without an
    /// active primary.
    #[error("Barcode {0} is the active primary for its pack level; designate a replacement first")]
    WouldOrphanPrimary(String),

    /// No barcode with the given id in the tenant.
    #[error("Barcode not found: {0}")]
    NotFound(String),

    /// The value failed format validation.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Allocation failed before any value could be minted.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// A lifecycle rule rejected the operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl From<StoreError> for DirectoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateValue(value) => DirectoryError::DuplicateValue(value),
            StoreError::NotFound(id) => DirectoryError::NotFound(id),
        }
    }
}
