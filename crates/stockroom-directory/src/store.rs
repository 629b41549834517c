//! The persistence contract for barcode records.

use crate::error::StoreError;
use stockroom_barcode::barcode::Barcode;
use stockroom_barcode::ids::{BarcodeId, TenantId, VariantId};
use stockroom_barcode::pack::PackLevel;

/// Persistence collaborator for barcode records.
///
/// Implementations must provide two atomic check-then-act operations:
///
/// - [`insert`](BarcodeStore::insert) enforces tenant-scoped uniqueness of
///   `value` (a unique index or equivalent); a violation surfaces as
///   [`StoreError::DuplicateValue`], never as a partial write.
/// - [`swap_primary`](BarcodeStore::swap_primary) clears every other primary
///   flag in the `(variant, pack level)` scope and sets the target's, as a
///   single transaction; two concurrent swaps on the same scope must not
///   both leave their target primary.
///
/// Values are permanently unique: rows in terminal statuses keep occupying
/// their value, so a deprecated or blocked number is never re-issued.
pub trait BarcodeStore {
    /// Insert a new record, enforcing value uniqueness within the tenant.
    fn insert(&self, barcode: Barcode) -> Result<(), StoreError>;

    /// Fetch a record by id within the tenant.
    fn get(&self, tenant: &TenantId, id: &BarcodeId) -> Result<Barcode, StoreError>;

    /// Overwrite an existing record.
    fn update(&self, barcode: Barcode) -> Result<(), StoreError>;

    /// All records owned by a variant, in insertion order.
    fn list_by_variant(&self, tenant: &TenantId, variant: &VariantId) -> Vec<Barcode>;

    /// The record carrying a value, if one exists. A deleted value still
    /// occupies the unique index but no longer resolves here.
    fn find_by_value(&self, tenant: &TenantId, value: &str) -> Option<Barcode>;

    /// The current primary for a `(variant, pack level)` scope, if one has
    /// been designated.
    fn primary_for(
        &self,
        tenant: &TenantId,
        variant: &VariantId,
        pack_level: PackLevel,
    ) -> Option<Barcode>;

    /// Whether a value is already assigned within the tenant: the
    /// uniqueness probe used during allocation.
    fn value_exists(&self, tenant: &TenantId, value: &str) -> bool;

    /// Atomically make `target` the only primary in its
    /// `(variant, pack level)` scope.
    fn swap_primary(
        &self,
        tenant: &TenantId,
        variant: &VariantId,
        pack_level: PackLevel,
        target: &BarcodeId,
    ) -> Result<(), StoreError>;

    /// Remove a record. Whether history rows elsewhere still reference the
    /// value is the surrounding system's concern, not this trait's.
    fn delete(&self, tenant: &TenantId, id: &BarcodeId) -> Result<(), StoreError>;
}
