//! Packaging levels for barcode assignment.

use serde::{Deserialize, Serialize};

/// The packaging tier a barcode identifies, from individual unit up to
/// shipping pallet. Ordered by containment: `Each < Inner < Case < Pallet`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum PackLevel {
    /// Individual item/unit.
    #[default]
    Each,
    /// Inner packaging (e.g., 6-pack, dozen).
    Inner,
    /// Case or carton containing multiple inners or eaches.
    Case,
    /// Pallet containing multiple cases.
    Pallet,
}

impl PackLevel {
    /// All levels, lowest first.
    pub const ALL: [PackLevel; 4] = [
        PackLevel::Each,
        PackLevel::Inner,
        PackLevel::Case,
        PackLevel::Pallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackLevel::Each => "each",
            PackLevel::Inner => "inner",
            PackLevel::Case => "case",
            PackLevel::Pallet => "pallet",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "each" => Some(PackLevel::Each),
            "inner" => Some(PackLevel::Inner),
            "case" => Some(PackLevel::Case),
            "pallet" => Some(PackLevel::Pallet),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PackLevel::Each => "Each",
            PackLevel::Inner => "Inner Pack",
            PackLevel::Case => "Case",
            PackLevel::Pallet => "Pallet",
        }
    }

    /// Position in the containment hierarchy (1-indexed, `Each` lowest).
    pub fn hierarchy_level(&self) -> u8 {
        match self {
            PackLevel::Each => 1,
            PackLevel::Inner => 2,
            PackLevel::Case => 3,
            PackLevel::Pallet => 4,
        }
    }

    /// The next level up the hierarchy, if any.
    pub fn next_higher(&self) -> Option<PackLevel> {
        match self {
            PackLevel::Each => Some(PackLevel::Inner),
            PackLevel::Inner => Some(PackLevel::Case),
            PackLevel::Case => Some(PackLevel::Pallet),
            PackLevel::Pallet => None,
        }
    }

    /// The next level down the hierarchy, if any.
    pub fn next_lower(&self) -> Option<PackLevel> {
        match self {
            PackLevel::Each => None,
            PackLevel::Inner => Some(PackLevel::Each),
            PackLevel::Case => Some(PackLevel::Inner),
            PackLevel::Pallet => Some(PackLevel::Case),
        }
    }

    /// Whether counting at this level needs a unit-of-measure conversion
    /// back to eaches.
    pub fn requires_uom_conversion(&self) -> bool {
        *self != PackLevel::Each
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_ordering() {
        assert!(PackLevel::Each < PackLevel::Inner);
        assert!(PackLevel::Inner < PackLevel::Case);
        assert!(PackLevel::Case < PackLevel::Pallet);
    }

    #[test]
    fn test_next_higher_and_lower() {
        assert_eq!(PackLevel::Each.next_higher(), Some(PackLevel::Inner));
        assert_eq!(PackLevel::Pallet.next_higher(), None);
        assert_eq!(PackLevel::Each.next_lower(), None);
        assert_eq!(PackLevel::Pallet.next_lower(), Some(PackLevel::Case));
    }

    #[test]
    fn test_uom_conversion_required_above_each() {
        assert!(!PackLevel::Each.requires_uom_conversion());
        assert!(PackLevel::Inner.requires_uom_conversion());
        assert!(PackLevel::Pallet.requires_uom_conversion());
    }

    #[test]
    fn test_round_trip_str() {
        for level in PackLevel::ALL {
            assert_eq!(PackLevel::from_str(level.as_str()), Some(level));
        }
        assert_eq!(PackLevel::from_str("crate"), None);
    }
}
