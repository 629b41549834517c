//! Barcode allocation, lifecycle, and directory operations for Stockroom.
//!
//! This crate is the effectful half of the barcode engine:
//!
//! - **Store**: the persistence contract (`BarcodeStore`) plus an in-memory
//!   reference implementation
//! - **Allocation**: minting values unique within a tenant, with bounded
//!   collision retries and explicit partial success
//! - **Lifecycle**: the status state machine and the single-primary
//!   invariant per (variant, pack level)
//! - **Directory**: the facade the API/UI layer calls
//!
//! # Example
//!
//! ```rust
//! use stockroom_directory::prelude::*;
//!
//! let directory = BarcodeDirectory::new(MemoryStore::new());
//! let tenant = TenantId::new("acme");
//! let variant = VariantId::new("sku-1-red");
//!
//! let request = AllocationRequest::new(
//!     tenant.clone(),
//!     variant.clone(),
//!     BarcodeType::Ean13,
//!     PackLevel::Each,
//!     3,
//! );
//! let outcome = directory.generate(&request, true).unwrap();
//! assert_eq!(outcome.succeeded(), 3);
//! assert!(outcome.created[0].is_primary);
//! ```

pub mod allocate;
pub mod directory;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod store;

pub use allocate::{AllocationEngine, AllocationOutcome, AllocationRequest, Code128Template};
pub use directory::BarcodeDirectory;
pub use error::{AllocationError, DirectoryError, LifecycleError, StoreError};
pub use lifecycle::{BulkResult, LifecycleManager};
pub use memory::MemoryStore;
pub use store::BarcodeStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::allocate::{
        AllocationEngine, AllocationOutcome, AllocationRequest, Code128Template,
    };
    pub use crate::directory::BarcodeDirectory;
    pub use crate::error::{AllocationError, DirectoryError, LifecycleError, StoreError};
    pub use crate::lifecycle::{BulkResult, LifecycleManager};
    pub use crate::memory::MemoryStore;
    pub use crate::store::BarcodeStore;

    pub use stockroom_barcode::prelude::*;
}
