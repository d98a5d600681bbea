//! Process stages of the double haploid life cycle

use serde::{Deserialize, Serialize};

/// Experimental process stage a column belongs to, derived from its name prefix.
///
/// Hardening and Baby Nursery rows expand many-to-one against the
/// Induction/Laboratory identifiers, which is why aggregates over the
/// first two stages run on a deduplicated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStage {
    Induction,
    Laboratory,
    Hardening,
    BabyNursery,
    /// Column without a recognised process prefix
    Other,
}

impl ProcessStage {
    /// Classify a column by its prefix (case-insensitive).
    pub fn from_column(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        if lower.starts_with("induction") {
            Self::Induction
        } else if lower.starts_with("laboratory") || lower.starts_with("lab ") {
            Self::Laboratory
        } else if lower.starts_with("hardening") {
            Self::Hardening
        } else if lower.starts_with("baby nursery") || lower.starts_with("baby_nursery") {
            Self::BabyNursery
        } else {
            Self::Other
        }
    }

    /// True for stages stored once per induction plant.
    pub fn is_plant_level(&self) -> bool {
        matches!(self, Self::Induction | Self::Laboratory)
    }
}

impl std::fmt::Display for ProcessStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Induction => write!(f, "Induction"),
            Self::Laboratory => write!(f, "Laboratory"),
            Self::Hardening => write!(f, "Hardening"),
            Self::BabyNursery => write!(f, "Baby Nursery"),
            Self::Other => write!(f, "Other"),
        }
    }
}
