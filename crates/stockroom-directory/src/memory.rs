//! In-memory reference implementation of [`BarcodeStore`].

use crate::error::StoreError;
use crate::store::BarcodeStore;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use stockroom_barcode::barcode::Barcode;
use stockroom_barcode::ids::{BarcodeId, TenantId, VariantId};
use stockroom_barcode::pack::PackLevel;

#[derive(Default)]
struct TenantShard {
    /// Records keyed by id, with insertion order tracked separately.
    records: HashMap<BarcodeId, Barcode>,
    order: Vec<BarcodeId>,
    /// Unique index over values; mirrors a database unique constraint.
    values: HashSet<String>,
}

/// Thread-safe in-memory store.
///
/// A single `RwLock` write guard covers each mutating operation, which
/// gives insert-unique and swap-primary the check-then-act atomicity the
/// [`BarcodeStore`] contract requires. Deleted values stay in the unique
/// index so a number is never assigned twice, even after deletion.
#[derive(Default)]
pub struct MemoryStore {
    tenants: RwLock<HashMap<TenantId, TenantShard>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BarcodeStore for MemoryStore {
    fn insert(&self, barcode: Barcode) -> Result<(), StoreError> {
        let mut tenants = self.tenants.write().unwrap();
        let shard = tenants.entry(barcode.tenant_id.clone()).or_default();

        if shard.values.contains(&barcode.value) {
            return Err(StoreError::DuplicateValue(barcode.value));
        }

        shard.values.insert(barcode.value.clone());
        shard.order.push(barcode.id.clone());
        shard.records.insert(barcode.id.clone(), barcode);
        Ok(())
    }

    fn get(&self, tenant: &TenantId, id: &BarcodeId) -> Result<Barcode, StoreError> {
        let tenants = self.tenants.read().unwrap();
        tenants
            .get(tenant)
            .and_then(|shard| shard.records.get(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(&self, barcode: Barcode) -> Result<(), StoreError> {
        let mut tenants = self.tenants.write().unwrap();
        let shard = tenants
            .get_mut(&barcode.tenant_id)
            .ok_or_else(|| StoreError::NotFound(barcode.id.to_string()))?;

        match shard.records.get_mut(&barcode.id) {
            Some(slot) => {
                *slot = barcode;
                Ok(())
            }
            None => Err(StoreError::NotFound(barcode.id.to_string())),
        }
    }

    fn list_by_variant(&self, tenant: &TenantId, variant: &VariantId) -> Vec<Barcode> {
        let tenants = self.tenants.read().unwrap();
        let Some(shard) = tenants.get(tenant) else {
            return Vec::new();
        };
        shard
            .order
            .iter()
            .filter_map(|id| shard.records.get(id))
            .filter(|bc| &bc.variant_id == variant)
            .cloned()
            .collect()
    }

    fn find_by_value(&self, tenant: &TenantId, value: &str) -> Option<Barcode> {
        let tenants = self.tenants.read().unwrap();
        tenants
            .get(tenant)?
            .records
            .values()
            .find(|bc| bc.value == value)
            .cloned()
    }

    fn primary_for(
        &self,
        tenant: &TenantId,
        variant: &VariantId,
        pack_level: PackLevel,
    ) -> Option<Barcode> {
        let tenants = self.tenants.read().unwrap();
        tenants
            .get(tenant)?
            .records
            .values()
            .find(|bc| bc.is_primary && &bc.variant_id == variant && bc.pack_level == pack_level)
            .cloned()
    }

    fn value_exists(&self, tenant: &TenantId, value: &str) -> bool {
        let tenants = self.tenants.read().unwrap();
        tenants
            .get(tenant)
            .map(|shard| shard.values.contains(value))
            .unwrap_or(false)
    }

    fn swap_primary(
        &self,
        tenant: &TenantId,
        variant: &VariantId,
        pack_level: PackLevel,
        target: &BarcodeId,
    ) -> Result<(), StoreError> {
        let mut tenants = self.tenants.write().unwrap();
        let shard = tenants
            .get_mut(tenant)
            .ok_or_else(|| StoreError::NotFound(target.to_string()))?;

        if !shard.records.contains_key(target) {
            return Err(StoreError::NotFound(target.to_string()));
        }

        for bc in shard.records.values_mut() {
            if &bc.variant_id == variant && bc.pack_level == pack_level {
                let make_primary = &bc.id == target;
                if bc.is_primary != make_primary {
                    bc.is_primary = make_primary;
                    bc.touch();
                }
            }
        }
        Ok(())
    }

    fn delete(&self, tenant: &TenantId, id: &BarcodeId) -> Result<(), StoreError> {
        let mut tenants = self.tenants.write().unwrap();
        let shard = tenants
            .get_mut(tenant)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if shard.records.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        shard.order.retain(|existing| existing != id);
        // The value deliberately stays in the unique index: numbers are
        // never re-issued.
        Ok(())
    }
}
