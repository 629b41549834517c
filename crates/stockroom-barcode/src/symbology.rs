//! Supported barcode symbologies and their static properties.

use crate::pack::PackLevel;
use serde::{Deserialize, Serialize};

/// A supported barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarcodeType {
    /// Universal Product Code, 12 digits.
    UpcA,
    /// Compressed Universal Product Code, 8 digits.
    UpcE,
    /// European Article Number, 13 digits.
    Ean13,
    /// European Article Number, 8 digits.
    Ean8,
    /// Interleaved Two of Five carrying a GTIN-14, 14 digits.
    Itf14,
    /// High-density alphanumeric barcode, variable length.
    Code128,
    /// Code 128 carrying GS1 Application Identifiers, variable length.
    Gs1128,
}

/// Static properties of a symbology: length constraint, checksum rule,
/// and the packaging tiers it may be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbologySpec {
    /// Exact value length, or `None` for variable-length symbologies.
    pub fixed_length: Option<usize>,
    /// Whether values carry a trailing GTIN mod-10 check digit.
    pub uses_gtin_checksum: bool,
    /// Packaging tiers this symbology may be assigned to.
    pub allowed_pack_levels: &'static [PackLevel],
}

impl SymbologySpec {
    /// Whether `level` is a permitted packaging tier.
    pub fn allows_pack_level(&self, level: PackLevel) -> bool {
        self.allowed_pack_levels.contains(&level)
    }
}

const EACH_ONLY: &[PackLevel] = &[PackLevel::Each];
const CASE_AND_PALLET: &[PackLevel] = &[PackLevel::Case, PackLevel::Pallet];
const ALL_LEVELS: &[PackLevel] = &[
    PackLevel::Each,
    PackLevel::Inner,
    PackLevel::Case,
    PackLevel::Pallet,
];

impl BarcodeType {
    /// All supported symbologies.
    pub const ALL: [BarcodeType; 7] = [
        BarcodeType::UpcA,
        BarcodeType::UpcE,
        BarcodeType::Ean13,
        BarcodeType::Ean8,
        BarcodeType::Itf14,
        BarcodeType::Code128,
        BarcodeType::Gs1128,
    ];

    /// Look up the static properties of this symbology.
    pub fn spec(&self) -> SymbologySpec {
        match self {
            BarcodeType::UpcA => SymbologySpec {
                fixed_length: Some(12),
                uses_gtin_checksum: true,
                allowed_pack_levels: EACH_ONLY,
            },
            BarcodeType::UpcE => SymbologySpec {
                fixed_length: Some(8),
                uses_gtin_checksum: true,
                allowed_pack_levels: EACH_ONLY,
            },
            // EAN-13 doubles as a case code in practice; unlike the
            // other retail symbologies it is not tier-restricted.
            BarcodeType::Ean13 => SymbologySpec {
                fixed_length: Some(13),
                uses_gtin_checksum: true,
                allowed_pack_levels: ALL_LEVELS,
            },
            BarcodeType::Ean8 => SymbologySpec {
                fixed_length: Some(8),
                uses_gtin_checksum: true,
                allowed_pack_levels: EACH_ONLY,
            },
            BarcodeType::Itf14 => SymbologySpec {
                fixed_length: Some(14),
                uses_gtin_checksum: true,
                allowed_pack_levels: CASE_AND_PALLET,
            },
            BarcodeType::Code128 => SymbologySpec {
                fixed_length: None,
                uses_gtin_checksum: false,
                allowed_pack_levels: ALL_LEVELS,
            },
            BarcodeType::Gs1128 => SymbologySpec {
                fixed_length: None,
                uses_gtin_checksum: false,
                allowed_pack_levels: ALL_LEVELS,
            },
        }
    }

    /// Whether this symbology encodes a GTIN (fixed length, mod-10 checked).
    pub fn is_gtin(&self) -> bool {
        self.spec().uses_gtin_checksum
    }

    /// Whether `level` is a permitted packaging tier for this symbology.
    pub fn supports_pack_level(&self, level: PackLevel) -> bool {
        self.spec().allows_pack_level(level)
    }

    /// Preferred symbologies for a packaging tier, most common first.
    pub fn recommended_for(level: PackLevel) -> &'static [BarcodeType] {
        match level {
            PackLevel::Each => &[
                BarcodeType::UpcA,
                BarcodeType::Ean13,
                BarcodeType::UpcE,
                BarcodeType::Ean8,
                BarcodeType::Code128,
            ],
            PackLevel::Inner => &[
                BarcodeType::Ean13,
                BarcodeType::Code128,
                BarcodeType::Gs1128,
            ],
            PackLevel::Case => &[
                BarcodeType::Itf14,
                BarcodeType::Gs1128,
                BarcodeType::Code128,
            ],
            PackLevel::Pallet => &[BarcodeType::Itf14, BarcodeType::Gs1128],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeType::UpcA => "upc_a",
            BarcodeType::UpcE => "upc_e",
            BarcodeType::Ean13 => "ean_13",
            BarcodeType::Ean8 => "ean_8",
            BarcodeType::Itf14 => "itf_14",
            BarcodeType::Code128 => "code_128",
            BarcodeType::Gs1128 => "gs1_128",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "upc_a" => Some(BarcodeType::UpcA),
            "upc_e" => Some(BarcodeType::UpcE),
            "ean_13" => Some(BarcodeType::Ean13),
            "ean_8" => Some(BarcodeType::Ean8),
            "itf_14" => Some(BarcodeType::Itf14),
            "code_128" => Some(BarcodeType::Code128),
            "gs1_128" => Some(BarcodeType::Gs1128),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BarcodeType::UpcA => "UPC-A",
            BarcodeType::UpcE => "UPC-E",
            BarcodeType::Ean13 => "EAN-13",
            BarcodeType::Ean8 => "EAN-8",
            BarcodeType::Itf14 => "ITF-14",
            BarcodeType::Code128 => "Code 128",
            BarcodeType::Gs1128 => "GS1-128",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gtin_family_has_fixed_lengths() {
        assert_eq!(BarcodeType::UpcA.spec().fixed_length, Some(12));
        assert_eq!(BarcodeType::UpcE.spec().fixed_length, Some(8));
        assert_eq!(BarcodeType::Ean13.spec().fixed_length, Some(13));
        assert_eq!(BarcodeType::Ean8.spec().fixed_length, Some(8));
        assert_eq!(BarcodeType::Itf14.spec().fixed_length, Some(14));
    }

    #[test]
    fn test_code128_family_is_variable() {
        assert_eq!(BarcodeType::Code128.spec().fixed_length, None);
        assert_eq!(BarcodeType::Gs1128.spec().fixed_length, None);
        assert!(!BarcodeType::Code128.is_gtin());
        assert!(!BarcodeType::Gs1128.is_gtin());
    }

    #[test]
    fn test_pack_level_restrictions() {
        assert!(BarcodeType::UpcA.supports_pack_level(PackLevel::Each));
        assert!(!BarcodeType::UpcA.supports_pack_level(PackLevel::Case));
        for level in PackLevel::ALL {
            assert!(BarcodeType::Ean13.supports_pack_level(level));
        }
        assert!(BarcodeType::Itf14.supports_pack_level(PackLevel::Case));
        assert!(BarcodeType::Itf14.supports_pack_level(PackLevel::Pallet));
        assert!(!BarcodeType::Itf14.supports_pack_level(PackLevel::Each));
        for level in PackLevel::ALL {
            assert!(BarcodeType::Gs1128.supports_pack_level(level));
        }
    }

    #[test]
    fn test_recommendations_are_permitted() {
        for level in PackLevel::ALL {
            for ty in BarcodeType::recommended_for(level) {
                assert!(
                    ty.supports_pack_level(level),
                    "{} recommended but not permitted at {}",
                    ty.display_name(),
                    level.as_str()
                );
            }
        }
    }

    #[test]
    fn test_round_trip_str() {
        for ty in BarcodeType::ALL {
            assert_eq!(BarcodeType::from_str(ty.as_str()), Some(ty));
        }
        assert_eq!(BarcodeType::from_str("code_39"), None);
    }
}
