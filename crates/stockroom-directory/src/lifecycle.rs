//! Status transitions and primary-barcode management.

use crate::error::LifecycleError;
use crate::store::BarcodeStore;
use stockroom_barcode::barcode::BarcodeStatus;
use stockroom_barcode::ids::{BarcodeId, TenantId};
use tracing::debug;

/// Outcome of a bulk status change: per-item results, never aborted
/// mid-batch.
#[derive(Debug, Default)]
pub struct BulkResult {
    pub succeeded: usize,
    pub failed: usize,
    /// The ids that failed, each with its specific error.
    pub errors: Vec<(BarcodeId, LifecycleError)>,
}

/// Owns the per-barcode status machine and the per-(variant, pack level)
/// primary invariant.
pub struct LifecycleManager<'a, S: BarcodeStore> {
    store: &'a S,
}

impl<'a, S: BarcodeStore> LifecycleManager<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Make a barcode the sole primary for its (variant, pack level).
    ///
    /// Only `Reserved` or `Active` barcodes are eligible. The swap is
    /// atomic at the scope: the previous primary's flag clears in the same
    /// store operation that sets the new one.
    pub fn set_primary(&self, tenant: &TenantId, id: &BarcodeId) -> Result<(), LifecycleError> {
        let barcode = self
            .store
            .get(tenant, id)
            .map_err(|_| LifecycleError::NotFound(id.to_string()))?;

        if !barcode.status.can_be_primary() {
            return Err(LifecycleError::CannotBePrimary(barcode.status));
        }

        self.store
            .swap_primary(tenant, &barcode.variant_id, barcode.pack_level, id)
            .map_err(|_| LifecycleError::NotFound(id.to_string()))?;

        debug!(
            barcode = %id,
            variant = %barcode.variant_id,
            pack_level = barcode.pack_level.as_str(),
            "primary barcode swapped"
        );
        Ok(())
    }

    /// Move a barcode to `target` status.
    ///
    /// Validated against the transition table; moving the current primary
    /// into a terminal status clears its primary flag in the same write.
    pub fn transition(
        &self,
        tenant: &TenantId,
        id: &BarcodeId,
        target: BarcodeStatus,
    ) -> Result<(), LifecycleError> {
        let mut barcode = self
            .store
            .get(tenant, id)
            .map_err(|_| LifecycleError::NotFound(id.to_string()))?;

        if !barcode.status.can_transition_to(target) {
            return Err(LifecycleError::IllegalTransition {
                from: barcode.status,
                to: target,
            });
        }

        let from = barcode.status;
        barcode.status = target;
        if barcode.is_primary && !target.can_be_primary() {
            barcode.is_primary = false;
        }
        barcode.touch();

        self.store
            .update(barcode)
            .map_err(|_| LifecycleError::NotFound(id.to_string()))?;

        debug!(
            barcode = %id,
            from = from.as_str(),
            to = target.as_str(),
            "barcode status changed"
        );
        Ok(())
    }

    /// Apply `transition` to each id independently; individual failures
    /// never abort the batch.
    pub fn bulk_transition(
        &self,
        tenant: &TenantId,
        ids: &[BarcodeId],
        target: BarcodeStatus,
    ) -> BulkResult {
        let mut result = BulkResult::default();
        for id in ids {
            match self.transition(tenant, id, target) {
                Ok(()) => result.succeeded += 1,
                Err(e) => {
                    result.failed += 1;
                    result.errors.push((id.clone(), e));
                }
            }
        }
        debug!(
            succeeded = result.succeeded,
            failed = result.failed,
            to = target.as_str(),
            "bulk transition finished"
        );
        result
    }
}
