//! Allocation of new barcode values.
//!
//! Values are drawn uniformly at random over the symbology's digit space
//! and checked against a caller-supplied uniqueness probe, retrying on
//! collision up to a bounded ceiling. Partial success is explicit: a batch
//! returns every value it could mint alongside a failure per value it
//! could not.

use crate::error::AllocationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stockroom_barcode::barcode::Barcode;
use stockroom_barcode::ids::{TenantId, UomId, VariantId};
use stockroom_barcode::pack::PackLevel;
use stockroom_barcode::symbology::BarcodeType;
use stockroom_barcode::validate::packaging_indicator_for;
use tracing::{debug, warn};

/// Retry ceiling per requested barcode.
pub const MAX_ATTEMPTS: u32 = 20;

/// Template for generating variable-length Code 128 family values:
/// a caller-supplied prefix padded with random digits to `length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code128Template {
    pub prefix: String,
    pub length: usize,
}

impl Code128Template {
    pub fn new(prefix: impl Into<String>, length: usize) -> Self {
        Self {
            prefix: prefix.into(),
            length,
        }
    }

    fn is_usable(&self) -> bool {
        !self.prefix.is_empty()
            && self.length > self.prefix.len()
            && self.length <= stockroom_barcode::validate::MAX_VARIABLE_LENGTH
            && self.prefix.bytes().all(|b| (0x20..=0x7e).contains(&b))
    }
}

/// A request to mint one or more barcodes for a variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub tenant_id: TenantId,
    pub variant_id: VariantId,
    pub barcode_type: BarcodeType,
    pub pack_level: PackLevel,
    pub count: u32,
    pub unit_of_measure_id: Option<UomId>,
    /// Required for Code 128 family types; ignored for GTIN types.
    pub template: Option<Code128Template>,
}

impl AllocationRequest {
    pub fn new(
        tenant_id: TenantId,
        variant_id: VariantId,
        barcode_type: BarcodeType,
        pack_level: PackLevel,
        count: u32,
    ) -> Self {
        Self {
            tenant_id,
            variant_id,
            barcode_type,
            pack_level,
            count,
            unit_of_measure_id: None,
            template: None,
        }
    }
}

/// Outcome of a batch allocation: minted barcodes plus per-item failures.
#[derive(Debug, Default)]
pub struct AllocationOutcome {
    /// Barcodes minted in `Reserved` status, not yet persisted.
    pub created: Vec<Barcode>,
    /// One entry per requested barcode that could not be minted.
    pub failures: Vec<AllocationError>,
}

impl AllocationOutcome {
    pub fn succeeded(&self) -> usize {
        self.created.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether every requested barcode was minted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generates barcode values unique within a tenant.
#[derive(Debug, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Mint `request.count` barcodes, probing each candidate for uniqueness.
    ///
    /// `taken` answers whether a candidate value is already assigned within
    /// the tenant; it is typically backed by the persistence layer's unique
    /// index. Precondition failures (unsupported pack level, missing
    /// template) reject the whole batch; per-item collision exhaustion is
    /// reported in the outcome without aborting the rest.
    pub fn generate<P>(
        &self,
        request: &AllocationRequest,
        taken: P,
    ) -> Result<AllocationOutcome, AllocationError>
    where
        P: Fn(&str) -> bool,
    {
        let spec = request.barcode_type.spec();

        if !spec.allows_pack_level(request.pack_level) {
            return Err(AllocationError::PackLevelNotSupported {
                barcode_type: request.barcode_type,
                pack_level: request.pack_level,
            });
        }

        if spec.fixed_length.is_none() {
            match &request.template {
                Some(template) if template.is_usable() => {}
                _ => return Err(AllocationError::ManualEntryRequired(request.barcode_type)),
            }
        }

        let mut outcome = AllocationOutcome::default();
        // Candidates minted earlier in this batch are not yet visible to
        // the probe, so they are tracked here as well.
        let mut batch_values: HashSet<String> = HashSet::new();

        for _ in 0..request.count {
            match self.mint_unique(request, &taken, &batch_values) {
                Ok(value) => {
                    batch_values.insert(value.clone());
                    let mut barcode = Barcode::new(
                        request.tenant_id.clone(),
                        request.variant_id.clone(),
                        value,
                        request.barcode_type,
                        request.pack_level,
                    );
                    barcode.unit_of_measure_id = request.unit_of_measure_id.clone();
                    outcome.created.push(barcode);
                }
                Err(e) => {
                    warn!(
                        barcode_type = request.barcode_type.as_str(),
                        tenant = %request.tenant_id,
                        "allocation gave up: {e}"
                    );
                    outcome.failures.push(e);
                }
            }
        }

        debug!(
            succeeded = outcome.succeeded(),
            failed = outcome.failed(),
            "allocation batch finished"
        );
        Ok(outcome)
    }

    fn mint_unique<P>(
        &self,
        request: &AllocationRequest,
        taken: &P,
        batch_values: &HashSet<String>,
    ) -> Result<String, AllocationError>
    where
        P: Fn(&str) -> bool,
    {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.mint_candidate(request);
            if !batch_values.contains(&candidate) && !taken(&candidate) {
                return Ok(candidate);
            }
        }
        Err(AllocationError::ExhaustedAttempts {
            attempts: MAX_ATTEMPTS,
        })
    }

    fn mint_candidate(&self, request: &AllocationRequest) -> String {
        match request.barcode_type.spec().fixed_length {
            Some(length) => {
                let payload = match request.barcode_type {
                    // ITF-14 payloads lead with the packaging indicator
                    // for the requested tier.
                    BarcodeType::Itf14 => {
                        let indicator = packaging_indicator_for(request.pack_level);
                        format!("{indicator}{}", random_digits(length - 2))
                    }
                    _ => random_digits(length - 1),
                };
                stockroom_barcode::checksum::complete(&payload)
                    .expect("payload is all digits")
            }
            None => {
                // Precondition: a usable template is present for
                // variable-length types.
                let template = request.template.as_ref().expect("template checked");
                let padding = template.length - template.prefix.len();
                format!("{}{}", template.prefix, random_digits(padding))
            }
        }
    }
}

fn random_digits(n: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_barcode::validate::{itf14_packaging_indicator, validate};

    fn request(barcode_type: BarcodeType, pack_level: PackLevel, count: u32) -> AllocationRequest {
        AllocationRequest::new(
            TenantId::new("t1"),
            VariantId::new("v1"),
            barcode_type,
            pack_level,
            count,
        )
    }

    #[test]
    fn test_generated_gtins_are_valid() {
        let engine = AllocationEngine::new();
        let outcome = engine
            .generate(&request(BarcodeType::Ean13, PackLevel::Each, 10), |_| false)
            .unwrap();

        assert_eq!(outcome.succeeded(), 10);
        assert!(outcome.is_complete());
        for bc in &outcome.created {
            assert_eq!(bc.value.len(), 13);
            assert_eq!(validate(&bc.value, BarcodeType::Ean13), Ok(()));
        }
    }

    #[test]
    fn test_itf14_carries_packaging_indicator() {
        let engine = AllocationEngine::new();
        let outcome = engine
            .generate(&request(BarcodeType::Itf14, PackLevel::Pallet, 5), |_| false)
            .unwrap();

        for bc in &outcome.created {
            assert_eq!(validate(&bc.value, BarcodeType::Itf14), Ok(()));
            assert_eq!(itf14_packaging_indicator(&bc.value), Some(3));
        }
    }

    #[test]
    fn test_pack_level_precondition() {
        let engine = AllocationEngine::new();
        let err = engine
            .generate(&request(BarcodeType::UpcA, PackLevel::Case, 1), |_| false)
            .unwrap_err();
        assert_eq!(
            err,
            AllocationError::PackLevelNotSupported {
                barcode_type: BarcodeType::UpcA,
                pack_level: PackLevel::Case,
            }
        );
    }

    #[test]
    fn test_code128_requires_template() {
        let engine = AllocationEngine::new();
        let err = engine
            .generate(&request(BarcodeType::Code128, PackLevel::Each, 1), |_| false)
            .unwrap_err();
        assert_eq!(err, AllocationError::ManualEntryRequired(BarcodeType::Code128));
    }

    #[test]
    fn test_code128_template_generation() {
        let engine = AllocationEngine::new();
        let mut req = request(BarcodeType::Code128, PackLevel::Each, 3);
        req.template = Some(Code128Template::new("WH1-", 12));

        let outcome = engine.generate(&req, |_| false).unwrap();
        assert_eq!(outcome.succeeded(), 3);
        for bc in &outcome.created {
            assert!(bc.value.starts_with("WH1-"));
            assert_eq!(bc.value.len(), 12);
            assert_eq!(validate(&bc.value, BarcodeType::Code128), Ok(()));
        }
    }

    #[test]
    fn test_unusable_template_rejected() {
        let engine = AllocationEngine::new();
        let mut req = request(BarcodeType::Gs1128, PackLevel::Case, 1);
        req.template = Some(Code128Template::new("LONG-PREFIX", 4));
        assert_eq!(
            engine.generate(&req, |_| false).unwrap_err(),
            AllocationError::ManualEntryRequired(BarcodeType::Gs1128)
        );
    }

    #[test]
    fn test_exhausted_probe_reports_all_failures() {
        let engine = AllocationEngine::new();
        let outcome = engine
            .generate(&request(BarcodeType::Ean13, PackLevel::Each, 5), |_| true)
            .unwrap();

        assert_eq!(outcome.succeeded(), 0);
        assert_eq!(outcome.failed(), 5);
        for failure in &outcome.failures {
            assert_eq!(
                *failure,
                AllocationError::ExhaustedAttempts {
                    attempts: MAX_ATTEMPTS
                }
            );
        }
    }

    #[test]
    fn test_minted_barcodes_start_reserved_and_not_primary() {
        use stockroom_barcode::barcode::BarcodeStatus;

        let engine = AllocationEngine::new();
        let outcome = engine
            .generate(&request(BarcodeType::Ean8, PackLevel::Each, 2), |_| false)
            .unwrap();

        for bc in &outcome.created {
            assert_eq!(bc.status, BarcodeStatus::Reserved);
            assert!(!bc.is_primary);
        }
    }

    #[test]
    fn test_batch_values_are_distinct() {
        let engine = AllocationEngine::new();
        let outcome = engine
            .generate(&request(BarcodeType::Ean8, PackLevel::Each, 50), |_| false)
            .unwrap();

        let values: std::collections::HashSet<_> =
            outcome.created.iter().map(|bc| bc.value.clone()).collect();
        assert_eq!(values.len(), outcome.succeeded());
    }
}
