//! The barcode directory: the public surface composing validation,
//! allocation, lifecycle, and persistence.

use crate::allocate::{AllocationEngine, AllocationOutcome, AllocationRequest, MAX_ATTEMPTS};
use crate::error::{AllocationError, DirectoryError, StoreError};
use crate::lifecycle::{BulkResult, LifecycleManager};
use crate::store::BarcodeStore;
use stockroom_barcode::barcode::{Barcode, BarcodeStatus};
use stockroom_barcode::error::FormatError;
use stockroom_barcode::ids::{BarcodeId, TenantId, UomId, VariantId};
use stockroom_barcode::pack::PackLevel;
use stockroom_barcode::symbology::BarcodeType;
use stockroom_barcode::validate;
use tracing::debug;

/// Facade over the barcode engine for the API/UI layer.
///
/// Tenant scope is explicit on every call; the directory never resolves
/// variant or unit-of-measure references itself.
pub struct BarcodeDirectory<S: BarcodeStore> {
    store: S,
    engine: AllocationEngine,
}

impl<S: BarcodeStore> BarcodeDirectory<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            engine: AllocationEngine::new(),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a manually entered barcode value.
    ///
    /// Runs format validation, checks pack-level compatibility, rejects
    /// duplicates within the tenant, and stores the record in `Reserved`
    /// status. An optional GS1 Application Identifier payload is stored
    /// opaquely alongside the record. With `set_primary`, the primary swap
    /// for the barcode's (variant, pack level) happens as part of the same
    /// operation.
    #[allow(clippy::too_many_arguments)]
    pub fn create_manual(
        &self,
        tenant: &TenantId,
        variant: &VariantId,
        value: &str,
        barcode_type: BarcodeType,
        pack_level: PackLevel,
        unit_of_measure_id: Option<UomId>,
        ai_payload: Option<serde_json::Value>,
        set_primary: bool,
    ) -> Result<Barcode, DirectoryError> {
        validate::validate(value, barcode_type)?;

        if !barcode_type.supports_pack_level(pack_level) {
            return Err(AllocationError::PackLevelNotSupported {
                barcode_type,
                pack_level,
            }
            .into());
        }

        if self.store.value_exists(tenant, value) {
            return Err(DirectoryError::DuplicateValue(value.to_string()));
        }

        let mut barcode = Barcode::new(
            tenant.clone(),
            variant.clone(),
            value,
            barcode_type,
            pack_level,
        );
        barcode.unit_of_measure_id = unit_of_measure_id;
        barcode.ai_payload = ai_payload;
        let id = barcode.id.clone();

        // A concurrent insert may still win the race; the unique index is
        // authoritative.
        self.store.insert(barcode)?;

        if set_primary {
            self.set_primary(tenant, &id)?;
        }

        let created = self.store.get(tenant, &id)?;
        debug!(barcode = %id, value = %created.value, "manual barcode created");
        Ok(created)
    }

    /// Mint and persist new barcodes for a variant.
    ///
    /// Delegates to the allocation engine with a store-backed uniqueness
    /// probe. An insert losing a race to a concurrent writer counts as one
    /// more collision for that item, within the same retry budget. With
    /// `set_primary`, the first successfully created barcode is promoted.
    pub fn generate(
        &self,
        request: &AllocationRequest,
        set_primary: bool,
    ) -> Result<AllocationOutcome, DirectoryError> {
        let tenant = &request.tenant_id;
        let minted = self
            .engine
            .generate(request, |value| self.store.value_exists(tenant, value))?;

        let mut outcome = AllocationOutcome {
            created: Vec::new(),
            failures: minted.failures,
        };

        for barcode in minted.created {
            match self.persist_minted(request, barcode) {
                Ok(persisted) => outcome.created.push(persisted),
                Err(e) => outcome.failures.push(e),
            }
        }

        if set_primary {
            if let Some(first) = outcome.created.first() {
                let id = first.id.clone();
                self.set_primary(tenant, &id)?;
                outcome.created[0] = self.store.get(tenant, &id)?;
            }
        }

        Ok(outcome)
    }

    /// Insert a minted barcode, re-minting on uniqueness races.
    fn persist_minted(
        &self,
        request: &AllocationRequest,
        barcode: Barcode,
    ) -> Result<Barcode, AllocationError> {
        let tenant = &request.tenant_id;
        let mut candidate = barcode;

        for _ in 0..MAX_ATTEMPTS {
            match self.store.insert(candidate.clone()) {
                Ok(()) => return Ok(candidate),
                Err(StoreError::DuplicateValue(_)) => {
                    let mut single = request.clone();
                    single.count = 1;
                    let retry = self
                        .engine
                        .generate(&single, |value| self.store.value_exists(tenant, value))?;
                    match retry.created.into_iter().next() {
                        Some(reminted) => candidate = reminted,
                        None => break,
                    }
                }
                Err(StoreError::NotFound(_)) => break,
            }
        }
        Err(AllocationError::ExhaustedAttempts {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// All barcodes attached to a variant.
    pub fn list_by_variant(&self, tenant: &TenantId, variant: &VariantId) -> Vec<Barcode> {
        self.store.list_by_variant(tenant, variant)
    }

    /// Resolve a scanned or typed value to its record, if one exists.
    pub fn find_by_value(&self, tenant: &TenantId, value: &str) -> Option<Barcode> {
        self.store.find_by_value(tenant, value)
    }

    /// The designated primary barcode for a (variant, pack level), if any.
    pub fn primary_for(
        &self,
        tenant: &TenantId,
        variant: &VariantId,
        pack_level: PackLevel,
    ) -> Option<Barcode> {
        self.store.primary_for(tenant, variant, pack_level)
    }

    /// Make a barcode the sole primary for its (variant, pack level).
    pub fn set_primary(&self, tenant: &TenantId, id: &BarcodeId) -> Result<(), DirectoryError> {
        LifecycleManager::new(&self.store)
            .set_primary(tenant, id)
            .map_err(DirectoryError::from)
    }

    /// Move a barcode to a new lifecycle status.
    pub fn transition(
        &self,
        tenant: &TenantId,
        id: &BarcodeId,
        target: BarcodeStatus,
    ) -> Result<(), DirectoryError> {
        LifecycleManager::new(&self.store)
            .transition(tenant, id, target)
            .map_err(DirectoryError::from)
    }

    /// Apply a status change to many barcodes, reporting per-item outcomes.
    pub fn bulk_transition(
        &self,
        tenant: &TenantId,
        ids: &[BarcodeId],
        target: BarcodeStatus,
    ) -> BulkResult {
        LifecycleManager::new(&self.store).bulk_transition(tenant, ids, target)
    }

    /// Remove a barcode record.
    ///
    /// Refuses to delete an active primary: promote a replacement with
    /// [`set_primary`](Self::set_primary) first, then delete.
    pub fn delete(&self, tenant: &TenantId, id: &BarcodeId) -> Result<(), DirectoryError> {
        let barcode = self.store.get(tenant, id)?;

        if barcode.is_primary && barcode.status == BarcodeStatus::Active {
            return Err(DirectoryError::WouldOrphanPrimary(id.to_string()));
        }

        self.store.delete(tenant, id)?;
        debug!(barcode = %id, value = %barcode.value, "barcode deleted");
        Ok(())
    }

    /// Validate a candidate value without touching the store, suitable for
    /// live input feedback before submission.
    pub fn validate(&self, value: &str, barcode_type: BarcodeType) -> Result<(), FormatError> {
        validate::validate(value, barcode_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::Code128Template;
    use crate::error::LifecycleError;
    use crate::memory::MemoryStore;

    fn directory() -> BarcodeDirectory<MemoryStore> {
        BarcodeDirectory::new(MemoryStore::new())
    }

    fn tenant() -> TenantId {
        TenantId::new("t1")
    }

    fn variant() -> VariantId {
        VariantId::new("v1")
    }

    #[test]
    fn test_create_manual_happy_path() {
        let dir = directory();
        let bc = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                Some(UomId::new("uom-ea")),
                None,
                false,
            )
            .unwrap();

        assert_eq!(bc.status, BarcodeStatus::Reserved);
        assert_eq!(bc.unit_of_measure_id, Some(UomId::new("uom-ea")));
        assert_eq!(dir.list_by_variant(&tenant(), &variant()).len(), 1);
    }

    #[test]
    fn test_create_manual_rejects_bad_format() {
        let dir = directory();
        let err = dir
            .create_manual(
                &tenant(),
                &variant(),
                "123",
                BarcodeType::UpcA,
                PackLevel::Each,
                None,
                None,
                false,
            )
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::Format(FormatError::WrongLength {
                expected: 12,
                actual: 3
            })
        );
    }

    #[test]
    fn test_create_manual_rejects_duplicate() {
        let dir = directory();
        dir.create_manual(
            &tenant(),
            &variant(),
            "4006381333931",
            BarcodeType::Ean13,
            PackLevel::Each,
            None,
            None,
            false,
        )
        .unwrap();

        let err = dir
            .create_manual(
                &tenant(),
                &VariantId::new("v2"),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                false,
            )
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::DuplicateValue("4006381333931".to_string())
        );
    }

    #[test]
    fn test_create_manual_rejects_incompatible_pack_level() {
        let dir = directory();
        let err = dir
            .create_manual(
                &tenant(),
                &variant(),
                "96385074",
                BarcodeType::Ean8,
                PackLevel::Case,
                None,
                None,
                false,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::Allocation(AllocationError::PackLevelNotSupported { .. })
        ));
    }

    #[test]
    fn test_create_manual_with_primary() {
        let dir = directory();
        let first = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                true,
            )
            .unwrap();
        assert!(first.is_primary);

        let second = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333948",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                true,
            )
            .unwrap();
        assert!(second.is_primary);

        let primaries: Vec<_> = dir
            .list_by_variant(&tenant(), &variant())
            .into_iter()
            .filter(|bc| bc.is_primary)
            .collect();
        assert_eq!(primaries.len(), 1);
        assert_eq!(primaries[0].id, second.id);
    }

    #[test]
    fn test_create_manual_accepts_ean13_at_case_level() {
        let dir = directory();
        let bc = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Case,
                None,
                None,
                false,
            )
            .unwrap();
        assert_eq!(bc.pack_level, PackLevel::Case);
    }

    #[test]
    fn test_create_manual_stores_ai_payload() {
        let dir = directory();
        let payload = serde_json::json!({ "01": "04006381333931", "10": "LOT-7" });
        let bc = dir
            .create_manual(
                &tenant(),
                &variant(),
                "(01)04006381333931",
                BarcodeType::Gs1128,
                PackLevel::Case,
                None,
                Some(payload.clone()),
                false,
            )
            .unwrap();

        assert_eq!(bc.ai_payload, Some(payload));
        let reloaded = dir.find_by_value(&tenant(), "(01)04006381333931").unwrap();
        assert!(reloaded.ai_payload.is_some());
    }

    #[test]
    fn test_find_by_value() {
        let dir = directory();
        let bc = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                false,
            )
            .unwrap();

        let found = dir.find_by_value(&tenant(), "4006381333931").unwrap();
        assert_eq!(found.id, bc.id);
        assert!(dir.find_by_value(&tenant(), "96385074").is_none());
    }

    #[test]
    fn test_primary_for_tracks_swaps() {
        let dir = directory();
        assert!(dir
            .primary_for(&tenant(), &variant(), PackLevel::Each)
            .is_none());

        let first = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                true,
            )
            .unwrap();
        assert_eq!(
            dir.primary_for(&tenant(), &variant(), PackLevel::Each)
                .map(|bc| bc.id),
            Some(first.id)
        );

        let second = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333948",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                true,
            )
            .unwrap();
        assert_eq!(
            dir.primary_for(&tenant(), &variant(), PackLevel::Each)
                .map(|bc| bc.id),
            Some(second.id)
        );
    }

    #[test]
    fn test_generate_persists_batch() {
        let dir = directory();
        let request = AllocationRequest::new(
            tenant(),
            variant(),
            BarcodeType::Ean13,
            PackLevel::Each,
            5,
        );

        let outcome = dir.generate(&request, false).unwrap();
        assert_eq!(outcome.succeeded(), 5);
        assert!(outcome.is_complete());
        assert_eq!(dir.list_by_variant(&tenant(), &variant()).len(), 5);
    }

    #[test]
    fn test_generate_with_primary_promotes_first() {
        let dir = directory();
        let request = AllocationRequest::new(
            tenant(),
            variant(),
            BarcodeType::Ean13,
            PackLevel::Each,
            3,
        );

        let outcome = dir.generate(&request, true).unwrap();
        assert!(outcome.created[0].is_primary);
        assert!(!outcome.created[1].is_primary);
        assert!(!outcome.created[2].is_primary);
    }

    #[test]
    fn test_generate_code128_with_template() {
        let dir = directory();
        let mut request = AllocationRequest::new(
            tenant(),
            variant(),
            BarcodeType::Gs1128,
            PackLevel::Case,
            2,
        );
        request.template = Some(Code128Template::new("(01)0", 21));

        let outcome = dir.generate(&request, false).unwrap();
        assert_eq!(outcome.succeeded(), 2);
        for bc in &outcome.created {
            assert!(bc.value.starts_with("(01)0"));
        }
    }

    #[test]
    fn test_generated_values_survive_existing_records() {
        let dir = directory();
        dir.create_manual(
            &tenant(),
            &variant(),
            "4006381333931",
            BarcodeType::Ean13,
            PackLevel::Each,
            None,
            None,
            false,
        )
        .unwrap();

        let request = AllocationRequest::new(
            tenant(),
            variant(),
            BarcodeType::Ean13,
            PackLevel::Each,
            10,
        );
        let outcome = dir.generate(&request, false).unwrap();
        assert_eq!(outcome.succeeded(), 10);

        // 11 records, all distinct values
        let values: std::collections::HashSet<_> = dir
            .list_by_variant(&tenant(), &variant())
            .into_iter()
            .map(|bc| bc.value)
            .collect();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_delete_plain_barcode() {
        let dir = directory();
        let bc = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                false,
            )
            .unwrap();

        dir.delete(&tenant(), &bc.id).unwrap();
        assert!(dir.list_by_variant(&tenant(), &variant()).is_empty());
    }

    #[test]
    fn test_delete_refuses_active_primary() {
        let dir = directory();
        let bc = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                true,
            )
            .unwrap();
        dir.transition(&tenant(), &bc.id, BarcodeStatus::Active)
            .unwrap();

        assert_eq!(
            dir.delete(&tenant(), &bc.id),
            Err(DirectoryError::WouldOrphanPrimary(bc.id.to_string()))
        );

        // Promoting a replacement unblocks the delete.
        let replacement = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333948",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                true,
            )
            .unwrap();
        assert!(replacement.is_primary);
        dir.delete(&tenant(), &bc.id).unwrap();
    }

    #[test]
    fn test_delete_missing_barcode() {
        let dir = directory();
        assert_eq!(
            dir.delete(&tenant(), &BarcodeId::new("ghost")),
            Err(DirectoryError::NotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_lifecycle_passthroughs() {
        let dir = directory();
        let bc = dir
            .create_manual(
                &tenant(),
                &variant(),
                "4006381333931",
                BarcodeType::Ean13,
                PackLevel::Each,
                None,
                None,
                false,
            )
            .unwrap();

        dir.transition(&tenant(), &bc.id, BarcodeStatus::Active)
            .unwrap();
        let err = dir
            .transition(&tenant(), &bc.id, BarcodeStatus::Reserved)
            .unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::Lifecycle(LifecycleError::IllegalTransition { .. })
        ));
    }

    #[test]
    fn test_validate_passthrough() {
        let dir = directory();
        assert!(dir.validate("4006381333931", BarcodeType::Ean13).is_ok());
        assert_eq!(
            dir.validate("4006381333930", BarcodeType::Ean13),
            Err(FormatError::BadCheckDigit { expected: 1 })
        );
    }
}
