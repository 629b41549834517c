//! The barcode entity and its lifecycle status machine.

use crate::ids::{BarcodeId, TenantId, UomId, VariantId};
use crate::pack::PackLevel;
use crate::symbology::BarcodeType;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a barcode.
///
/// Allowed transitions: `Reserved → Active`, `Reserved → Blocked`,
/// `Active → Deprecated`, `Active → Blocked`. `Deprecated` and `Blocked`
/// are terminal; reactivation means minting a new barcode record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarcodeStatus {
    /// Allocated but not yet in use.
    #[default]
    Reserved,
    /// In active use.
    Active,
    /// Replaced or retired; kept for historical reference.
    Deprecated,
    /// Blocked due to counterfeit or assignment error; never usable again.
    Blocked,
}

impl BarcodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeStatus::Reserved => "reserved",
            BarcodeStatus::Active => "active",
            BarcodeStatus::Deprecated => "deprecated",
            BarcodeStatus::Blocked => "blocked",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reserved" => Some(BarcodeStatus::Reserved),
            "active" => Some(BarcodeStatus::Active),
            "deprecated" => Some(BarcodeStatus::Deprecated),
            "blocked" => Some(BarcodeStatus::Blocked),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BarcodeStatus::Reserved => "Reserved",
            BarcodeStatus::Active => "Active",
            BarcodeStatus::Deprecated => "Deprecated",
            BarcodeStatus::Blocked => "Blocked",
        }
    }

    /// Statuses reachable from this one.
    pub fn valid_transitions(&self) -> &'static [BarcodeStatus] {
        match self {
            BarcodeStatus::Reserved => &[BarcodeStatus::Active, BarcodeStatus::Blocked],
            BarcodeStatus::Active => &[BarcodeStatus::Deprecated, BarcodeStatus::Blocked],
            BarcodeStatus::Deprecated | BarcodeStatus::Blocked => &[],
        }
    }

    /// Whether a transition to `target` is allowed.
    pub fn can_transition_to(&self, target: BarcodeStatus) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// Whether this status is terminal (no outgoing transitions).
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }

    /// Whether a barcode in this status can be scanned for operations.
    pub fn is_usable(&self) -> bool {
        *self == BarcodeStatus::Active
    }

    /// Whether a barcode in this status may carry the primary flag.
    pub fn can_be_primary(&self) -> bool {
        matches!(self, BarcodeStatus::Reserved | BarcodeStatus::Active)
    }
}

/// A merchandise barcode attached to a product variant.
///
/// The `value` is validated against its symbology before construction;
/// invalid values are rejected upstream and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Barcode {
    /// Unique barcode record identifier.
    pub id: BarcodeId,
    /// Tenant that owns this barcode; uniqueness of `value` is scoped here.
    pub tenant_id: TenantId,
    /// Owning product variant.
    pub variant_id: VariantId,
    /// The barcode value as printed/scanned.
    pub value: String,
    /// Symbology of the value.
    pub barcode_type: BarcodeType,
    /// Packaging tier the value identifies.
    pub pack_level: PackLevel,
    /// Optional opaque unit-of-measure reference; never dereferenced here.
    pub unit_of_measure_id: Option<UomId>,
    /// Whether this is the canonical barcode for its (variant, pack level).
    pub is_primary: bool,
    /// Opaque GS1 Application Identifier payload supplied by the caller;
    /// stored as-is, never decoded by the engine.
    pub ai_payload: Option<serde_json::Value>,
    /// Lifecycle status.
    pub status: BarcodeStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Barcode {
    /// Create a new barcode record in `Reserved` status.
    pub fn new(
        tenant_id: TenantId,
        variant_id: VariantId,
        value: impl Into<String>,
        barcode_type: BarcodeType,
        pack_level: PackLevel,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: BarcodeId::generate(),
            tenant_id,
            variant_id,
            value: value.into(),
            barcode_type,
            pack_level,
            unit_of_measure_id: None,
            is_primary: false,
            ai_payload: None,
            status: BarcodeStatus::Reserved,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this barcode may be promoted to primary.
    pub fn can_be_primary(&self) -> bool {
        self.status.can_be_primary() && self.barcode_type.supports_pack_level(self.pack_level)
    }

    /// The scope the primary-barcode invariant applies to.
    pub fn primary_scope(&self) -> (&VariantId, PackLevel) {
        (&self.variant_id, self.pack_level)
    }

    /// Display text combining symbology and value, e.g. "EAN-13 (4006381333931)".
    pub fn display_format(&self) -> String {
        format!("{} ({})", self.barcode_type.display_name(), self.value)
    }

    /// Mark the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
