//! Planting-number lookup
//!
//! The merged dataset stores the planting number as free text ("1st",
//! "Second", "P3", "4"). Scatter plots colour points by the ordinal, so
//! every spelling goes through one explicit table. Anything the table
//! does not recognise maps to [`PlantingNumber::Unmapped`] (ordinal 0)
//! instead of silently becoming a missing value.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Ordinal planting number of an induction batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlantingNumber {
    /// Fallback for blank or unrecognised labels
    Unmapped,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
}

fn numeric_label() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:p(?:lanting)?\s*[-_#]?\s*)?(\d+)\s*(?:st|nd|rd|th)?$").ok()
    })
    .as_ref()
}

impl PlantingNumber {
    /// Parse a raw planting label.
    pub fn parse(raw: &str) -> Self {
        let label = raw.trim().to_ascii_lowercase();
        match label.as_str() {
            "first" => return Self::First,
            "second" => return Self::Second,
            "third" => return Self::Third,
            "fourth" => return Self::Fourth,
            "fifth" => return Self::Fifth,
            "sixth" => return Self::Sixth,
            _ => {}
        }

        numeric_label()
            .and_then(|re| re.captures(&label))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map_or(Self::Unmapped, Self::from_ordinal)
    }

    /// Map an integer ordinal back to the enum; out-of-range is `Unmapped`.
    pub fn from_ordinal(n: u32) -> Self {
        match n {
            1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            4 => Self::Fourth,
            5 => Self::Fifth,
            6 => Self::Sixth,
            _ => Self::Unmapped,
        }
    }

    /// Integer used as the plot colour channel. `Unmapped` is 0.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Unmapped => 0,
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Fifth => 5,
            Self::Sixth => 6,
        }
    }

    pub fn is_mapped(&self) -> bool {
        !matches!(self, Self::Unmapped)
    }
}

impl std::fmt::Display for PlantingNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmapped => write!(f, "unmapped"),
            other => write!(f, "planting {}", other.ordinal()),
        }
    }
}
