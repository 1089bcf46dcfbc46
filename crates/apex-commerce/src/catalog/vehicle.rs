//! Vehicles and registration marks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A UK vehicle registration mark, normalized for lookup.
///
/// Normalization strips all whitespace and upper-cases, so `"ab12 cde"`
/// and `"AB12CDE"` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vrm(String);

impl Vrm {
    pub fn parse(input: &str) -> Self {
        Self(normalize_vrm(input))
    }

    /// The normalized key (e.g. `AB12CDE`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display form: current-style seven character plates are split
    /// `AB12 CDE`; anything else is shown as normalized.
    pub fn formatted(&self) -> String {
        if self.0.chars().count() == 7 {
            let split = self.0.char_indices().nth(4).map_or(self.0.len(), |(i, _)| i);
            let (area, serial) = self.0.split_at(split);
            format!("{} {}", area, serial)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for Vrm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

fn normalize_vrm(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Format user-entered registration text for display.
///
/// Seven-character registrations are re-spaced; any other input is
/// returned exactly as typed.
pub fn format_vrm(input: &str) -> String {
    let vrm = Vrm::parse(input);
    if vrm.0.chars().count() == 7 {
        vrm.formatted()
    } else {
        input.to_string()
    }
}

/// Vehicle details returned by a registration lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Registration as printed on the plate.
    pub vrm: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    /// Manufacturer engine code, the key for compatible parts.
    pub engine_code: String,
    pub engine_size: String,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: String,
    pub colour: String,
    pub doors: u8,
    /// MOT expiry date (ISO 8601).
    pub mot_expiry: String,
    pub tax_status: String,
}

impl Vehicle {
    /// One-line description, e.g. "2019 Volkswagen Golf GTI 2.0 TSI".
    pub fn description(&self) -> String {
        format!("{} {} {} {}", self.year, self.make, self.model, self.engine_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vrm_normalization() {
        assert_eq!(Vrm::parse(" ab12 cde ").as_str(), "AB12CDE");
        assert_eq!(Vrm::parse("MK67\tXYZ"), Vrm::parse("mk67xyz"));
    }

    #[test]
    fn test_vrm_formatted() {
        assert_eq!(Vrm::parse("ab12cde").formatted(), "AB12 CDE");
        assert_eq!(Vrm::parse("A1").formatted(), "A1");
    }

    #[test]
    fn test_format_vrm_keeps_unusual_input() {
        assert_eq!(format_vrm("wr21def"), "WR21 DEF");
        assert_eq!(format_vrm("k 1"), "k 1");
    }
}
